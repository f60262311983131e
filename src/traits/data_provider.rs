use async_trait::async_trait;
use crate::models::token::TokenPosition;

/// Core trait for fetching wallet positions
#[async_trait]
pub trait PortfolioDataProvider: Send + Sync {
    /// Fetch all fungible token positions held by a wallet address.
    ///
    /// An error means the wallet's data is unavailable; an empty list is a
    /// wallet that holds nothing.
    async fn fetch_positions(&self, address: &str) -> anyhow::Result<Vec<TokenPosition>>;
}
