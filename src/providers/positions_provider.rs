use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info};

use crate::models::token::TokenPosition;
use crate::traits::data_provider::PortfolioDataProvider;

pub const DEFAULT_TAPTOOLS_POSITIONS_URL: &str =
    "https://openapi.taptools.io/api/v1/wallet/portfolio/positions";

const API_KEY_HEADER: &str = "x-api-key";

/// Body of the wallet portfolio positions endpoint. Only fungible tokens are read.
#[derive(Debug, Deserialize)]
struct PositionsResponse {
    #[serde(rename = "positionsFt")]
    positions_ft: Option<Vec<TokenPosition>>,
}

/// TapTools-backed wallet positions provider
pub struct TapToolsDataProvider {
    client: Client,
    url: String,
    api_key: String,
}

impl TapToolsDataProvider {
    /// Create a new TapTools data provider
    pub fn new(
        url: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build TapTools HTTP client")?;

        Ok(Self {
            client,
            url: url.into(),
            api_key: api_key.into(),
        })
    }
}

#[async_trait]
impl PortfolioDataProvider for TapToolsDataProvider {
    async fn fetch_positions(&self, address: &str) -> anyhow::Result<Vec<TokenPosition>> {
        debug!("Fetching positions for {}", address);

        let response = self
            .client
            .get(&self.url)
            .query(&[("address", address)])
            .header(API_KEY_HEADER, &self.api_key)
            .send()
            .await
            .with_context(|| format!("TapTools request failed for {}", address))?;

        let status = response.status();
        if !status.is_success() {
            anyhow::bail!("TapTools API error {} for {}", status, address);
        }

        let body: PositionsResponse = response
            .json()
            .await
            .with_context(|| format!("Failed to decode TapTools response for {}", address))?;

        let positions = body
            .positions_ft
            .with_context(|| format!("TapTools response for {} has no positionsFt", address))?;

        info!("Found {} token positions for {}", positions.len(), address);
        Ok(positions)
    }
}
