use std::sync::Arc;

use tracing::{error, info};

use crate::errors::AggregationError;
use crate::models::portfolio::PortfolioSummary;
use crate::traits::{
    data_provider::PortfolioDataProvider,
    event_handler::PortfolioEventHandler,
    price_provider::PriceProvider,
};

use super::aggregator::{aggregate, normalize_addresses};

/// Main portfolio tracker
pub struct PortfolioTracker {
    data_provider: Arc<dyn PortfolioDataProvider>,
    price_provider: Arc<dyn PriceProvider>,
    event_handler: Arc<dyn PortfolioEventHandler>,
}

impl PortfolioTracker {
    /// Create a new portfolio tracker
    pub fn new(
        data_provider: Arc<dyn PortfolioDataProvider>,
        price_provider: Arc<dyn PriceProvider>,
        event_handler: Arc<dyn PortfolioEventHandler>,
    ) -> Self {
        Self {
            data_provider,
            price_provider,
            event_handler,
        }
    }

    /// Price the wallets, aggregate them and notify the handler of the outcome.
    ///
    /// The rate is fetched once per call. No wallet is fetched when it is
    /// unavailable.
    pub async fn profile(
        &self,
        addresses: &[String],
    ) -> Result<PortfolioSummary, AggregationError> {
        info!("{}", "=".repeat(80));
        info!("PORTFOLIO PROFILE");
        info!("{}", "=".repeat(80));
        info!("Wallets: {}", normalize_addresses(addresses).len());

        let fiat_rate = self.price_provider.get_ada_price().await;

        match aggregate(addresses, self.data_provider.as_ref(), fiat_rate).await {
            Ok(summary) => {
                info!(
                    "Timestamp: {}",
                    summary.timestamp.format("%Y-%m-%d %H:%M:%S UTC")
                );
                self.event_handler.handle_summary(&summary).await;
                Ok(summary)
            }
            Err(e) => {
                error!("Aggregation failed: {}", e);
                self.event_handler.handle_error(&e).await;
                Err(e)
            }
        }
    }
}

impl Clone for PortfolioTracker {
    fn clone(&self) -> Self {
        Self {
            data_provider: self.data_provider.clone(),
            price_provider: self.price_provider.clone(),
            event_handler: self.event_handler.clone(),
        }
    }
}
