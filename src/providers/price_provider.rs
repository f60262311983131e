use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::traits::price_provider::PriceProvider;

pub const DEFAULT_COINGECKO_URL: &str =
    "https://api.coingecko.com/api/v3/simple/price?ids=cardano&vs_currencies=usd";

/// `{"cardano": {"usd": 0.35}}`
#[derive(Debug, Deserialize)]
struct SimplePriceResponse {
    cardano: Option<CoinPrice>,
}

#[derive(Debug, Deserialize)]
struct CoinPrice {
    usd: Option<f64>,
}

/// ADA/USD spot price from the CoinGecko simple price endpoint
pub struct CoinGeckoPriceProvider {
    client: Client,
    url: String,
}

impl CoinGeckoPriceProvider {
    /// Create a new CoinGecko price provider
    pub fn new(url: impl Into<String>, timeout: Duration) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build CoinGecko HTTP client")?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }

    /// Fetch price from external API
    async fn fetch_external_price(&self) -> anyhow::Result<f64> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .context("CoinGecko request failed")?;

        let status = response.status();
        if !status.is_success() {
            anyhow::bail!("CoinGecko API error {}", status);
        }

        let body: SimplePriceResponse = response
            .json()
            .await
            .context("Failed to decode CoinGecko response")?;

        body.cardano
            .and_then(|coin| coin.usd)
            .context("CoinGecko response has no cardano.usd price")
    }
}

#[async_trait]
impl PriceProvider for CoinGeckoPriceProvider {
    async fn get_ada_price(&self) -> Option<f64> {
        match self.fetch_external_price().await {
            Ok(price) if price.is_finite() && price > 0.0 => {
                debug!("ADA price: ${}", price);
                Some(price)
            }
            Ok(price) => {
                warn!("Ignoring unusable ADA price {}", price);
                None
            }
            Err(e) => {
                warn!("Error fetching Cardano price: {:#}", e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use httpmock::prelude::*;
    use serde_json::json;

    use super::*;

    fn provider(server: &MockServer) -> CoinGeckoPriceProvider {
        let url = format!(
            "{}?ids=cardano&vs_currencies=usd",
            server.url("/api/v3/simple/price")
        );
        CoinGeckoPriceProvider::new(url, Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn test_reads_cardano_usd_price() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/api/v3/simple/price")
                    .query_param("ids", "cardano")
                    .query_param("vs_currencies", "usd");
                then.status(200).json_body(json!({"cardano": {"usd": 0.35}}));
            })
            .await;

        assert_eq!(provider(&server).get_ada_price().await, Some(0.35));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_missing_price_is_unavailable() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/api/v3/simple/price");
                then.status(200).json_body(json!({"bitcoin": {"usd": 60000.0}}));
            })
            .await;

        assert_eq!(provider(&server).get_ada_price().await, None);
    }

    #[tokio::test]
    async fn test_error_status_is_unavailable() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/api/v3/simple/price");
                then.status(429).body("rate limited");
            })
            .await;

        assert_eq!(provider(&server).get_ada_price().await, None);
    }

    #[tokio::test]
    async fn test_zero_price_is_unavailable() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/api/v3/simple/price");
                then.status(200).json_body(json!({"cardano": {"usd": 0.0}}));
            })
            .await;

        assert_eq!(provider(&server).get_ada_price().await, None);
    }
}
