//! Data providers for fetching prices and wallet positions

pub mod positions_provider;
pub mod price_provider;

// Re-export for convenience
pub use positions_provider::{TapToolsDataProvider, DEFAULT_TAPTOOLS_POSITIONS_URL};
pub use price_provider::{CoinGeckoPriceProvider, DEFAULT_COINGECKO_URL};
