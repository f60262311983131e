//! Cardano Wallet Profiler Library
//!
//! Aggregates the fungible token holdings of several Cardano wallets into a
//! cross-wallet summary and per-wallet subtotals, valued in ADA and USD.

// Public modules - these are the API surface
pub mod access;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod providers;
pub mod report;
pub mod tracker;
pub mod traits;
pub mod utils;
pub mod wizard;

// Re-export commonly used items for easier access
pub use access::AccessGate;
pub use config::Settings;
pub use errors::{AggregationError, WizardError};
pub use models::{
    token::TokenPosition,
    portfolio::{PortfolioSummary, TokenAggregate, TokenBook, WalletAggregate},
};
pub use traits::{
    data_provider::PortfolioDataProvider,
    price_provider::PriceProvider,
    event_handler::PortfolioEventHandler,
};
pub use providers::{
    positions_provider::TapToolsDataProvider,
    price_provider::CoinGeckoPriceProvider,
};
pub use handlers::{
    console::ConsoleEventHandler,
    report::ReportEventHandler,
    composite::CompositeEventHandler,
};
pub use tracker::{aggregator::aggregate, portfolio_tracker::PortfolioTracker};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
