//! Cross-wallet aggregation of token positions.

use tracing::{debug, info, warn};

use crate::errors::AggregationError;
use crate::models::portfolio::{PortfolioSummary, SkippedWallet, TokenBook};
use crate::traits::data_provider::PortfolioDataProvider;

/// Trimmed, non-empty addresses in input order. Duplicates are kept.
pub fn normalize_addresses(addresses: &[String]) -> Vec<String> {
    addresses
        .iter()
        .map(|address| address.trim())
        .filter(|address| !address.is_empty())
        .map(str::to_string)
        .collect()
}

/// A rate is usable only if it is a finite positive number
pub fn usable_rate(fiat_rate: Option<f64>) -> Option<f64> {
    fiat_rate.filter(|rate| rate.is_finite() && *rate > 0.0)
}

/// Aggregate the positions of every address into a [`PortfolioSummary`].
///
/// Fails with [`AggregationError::PriceUnavailable`] before any fetch when the
/// rate is missing or unusable. Addresses whose fetch fails are left out of
/// the result and listed in `skipped`.
pub async fn aggregate(
    addresses: &[String],
    provider: &dyn PortfolioDataProvider,
    fiat_rate: Option<f64>,
) -> Result<PortfolioSummary, AggregationError> {
    let fiat_rate = usable_rate(fiat_rate).ok_or(AggregationError::PriceUnavailable)?;
    let mut summary = PortfolioSummary::new(fiat_rate);

    for address in normalize_addresses(addresses) {
        let positions = match provider.fetch_positions(&address).await {
            Ok(positions) => positions,
            Err(e) => {
                warn!("Skipping wallet {}: {:#}", address, e);
                summary.skipped.push(SkippedWallet {
                    address,
                    reason: format!("{:#}", e),
                });
                continue;
            }
        };

        debug!("Wallet {} returned {} positions", address, positions.len());

        let mut wallet = TokenBook::new();
        for position in &positions {
            wallet.absorb(position, fiat_rate);
        }

        summary.total_ada_value += wallet.total_ada_value();
        summary.total_usd_value += wallet.total_usd_value();
        summary.global_tokens.merge(&wallet);
        summary.per_wallet.entry(&address).merge(&wallet);
    }

    info!(
        "Aggregated {} wallets ({} skipped): {} tokens, {:.2} ADA, ${:.2}",
        summary.per_wallet.len(),
        summary.skipped.len(),
        summary.global_tokens.len(),
        summary.total_ada_value,
        summary.total_usd_value
    );

    Ok(summary)
}
