//! Formatting helpers

pub mod helper;

pub use helper::{
    format_ada, format_amount, format_number, format_price, format_usd, shorten_identifier,
};
