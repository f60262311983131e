//! Data models for the wallet profiler

pub mod token;
pub mod portfolio;

// Re-export for convenience
pub use token::{TokenPosition, UNKNOWN_TOKEN};
pub use portfolio::{
    PortfolioSummary, SkippedWallet, TokenAggregate, TokenBook, WalletAggregate, WalletHoldings,
};
