//! Aggregation core and the tracker that drives it

pub mod aggregator;
pub mod portfolio_tracker;

pub use aggregator::{aggregate, normalize_addresses};
pub use portfolio_tracker::PortfolioTracker;
