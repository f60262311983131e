//! Environment-driven settings.

use std::time::Duration;

use tracing::warn;

use crate::providers::{DEFAULT_COINGECKO_URL, DEFAULT_TAPTOOLS_POSITIONS_URL};

pub const DEFAULT_ACCESS_CODE: &str = "mysecretcode";
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 15;

/// Runtime settings for the profiler
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// TapTools API key sent as `x-api-key`
    pub taptools_api_key: String,
    /// Code the wizard asks for before wallet entry
    pub access_code: String,
    /// CoinGecko simple price endpoint
    pub coingecko_url: String,
    /// TapTools wallet positions endpoint
    pub taptools_positions_url: String,
    /// Timeout applied to every upstream request
    pub http_timeout: Duration,
}

impl Settings {
    /// Read settings from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read settings through `lookup`, falling back to defaults for unset keys
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let taptools_api_key = lookup("TAPTOOLS_API_KEY").unwrap_or_default();
        if taptools_api_key.is_empty() {
            warn!("TAPTOOLS_API_KEY is not set; wallet lookups will be rejected upstream");
        }

        let http_timeout_secs = match lookup("HTTP_TIMEOUT_SECS") {
            Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
                warn!(
                    "Invalid HTTP_TIMEOUT_SECS {:?}, using {}",
                    raw, DEFAULT_HTTP_TIMEOUT_SECS
                );
                DEFAULT_HTTP_TIMEOUT_SECS
            }),
            None => DEFAULT_HTTP_TIMEOUT_SECS,
        };

        Self {
            taptools_api_key,
            access_code: lookup("ACCESS_CODE").unwrap_or_else(|| DEFAULT_ACCESS_CODE.to_string()),
            coingecko_url: lookup("COINGECKO_URL")
                .unwrap_or_else(|| DEFAULT_COINGECKO_URL.to_string()),
            taptools_positions_url: lookup("TAPTOOLS_POSITIONS_URL")
                .unwrap_or_else(|| DEFAULT_TAPTOOLS_POSITIONS_URL.to_string()),
            http_timeout: Duration::from_secs(http_timeout_secs),
        }
    }
}
