use async_trait::async_trait;
use tracing::{error, info, warn};

use crate::errors::AggregationError;
use crate::models::portfolio::PortfolioSummary;
use crate::traits::event_handler::PortfolioEventHandler;
use crate::utils::helper::{format_ada, format_amount, format_price, format_usd};

/// Console logging event handler
pub struct ConsoleEventHandler;

impl ConsoleEventHandler {
    /// Create a new console event handler
    pub fn new() -> Self {
        Self
    }
}

impl Default for ConsoleEventHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PortfolioEventHandler for ConsoleEventHandler {
    async fn handle_summary(&self, summary: &PortfolioSummary) {
        info!("PORTFOLIO SUMMARY");
        info!("{}", "-".repeat(80));
        info!("ADA Price: {}", format_price(summary.fiat_rate));
        info!("Wallets: {}", summary.per_wallet.len());
        info!("Total Tokens: {}", summary.token_count());

        for (i, token) in summary.global_tokens.sorted_by_ada_value().iter().enumerate() {
            info!(
                "{}. {}: {} ({}, {})",
                i + 1,
                token.display_name(),
                format_amount(token.quantity),
                format_ada(token.ada_value),
                format_usd(token.usd_value)
            );
        }

        for skipped in &summary.skipped {
            warn!("No data for wallet {}: {}", skipped.address, skipped.reason);
        }

        info!("{}", "-".repeat(80));
        info!(
            "➤ Total Portfolio Value: {} / {}",
            format_ada(summary.total_ada_value),
            format_usd(summary.total_usd_value)
        );
        info!("{}", "=".repeat(80));
    }

    async fn handle_error(&self, error: &AggregationError) {
        error!("Portfolio profiler error: {}", error);
    }
}
