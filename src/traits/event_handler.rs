use async_trait::async_trait;

use crate::errors::AggregationError;
use crate::models::portfolio::PortfolioSummary;

/// Handler for aggregation outcomes
#[async_trait]
pub trait PortfolioEventHandler: Send + Sync {
    /// Handle a completed summary
    async fn handle_summary(&self, summary: &PortfolioSummary);

    /// Handle a fatal aggregation failure
    async fn handle_error(&self, error: &AggregationError);
}
