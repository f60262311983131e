use serde::Deserialize;

/// Display key for positions that carry no usable identifier at all
pub const UNKNOWN_TOKEN: &str = "Unknown Token";

/// A single fungible token balance held by one wallet, as reported upstream.
///
/// Every field is optional: TapTools omits or nulls fields freely, and the
/// aggregation treats missing numbers as zero.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPosition {
    #[serde(default)]
    pub ticker: Option<String>,
    #[serde(default)]
    pub balance: Option<f64>,
    #[serde(default)]
    pub ada_value: Option<f64>,
    #[serde(default)]
    pub usd_value: Option<f64>,
    /// Policy id + hex asset name
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default)]
    pub fingerprint: Option<String>,
}

impl TokenPosition {
    /// Create a position with a ticker, balance and ADA value
    pub fn new(ticker: impl Into<String>, balance: f64, ada_value: f64) -> Self {
        Self {
            ticker: Some(ticker.into()),
            balance: Some(balance),
            ada_value: Some(ada_value),
            ..Self::default()
        }
    }

    /// Set a directly provided USD value
    pub fn with_usd_value(mut self, usd_value: f64) -> Self {
        self.usd_value = Some(usd_value);
        self
    }

    pub fn quantity(&self) -> f64 {
        self.balance.unwrap_or(0.0)
    }

    pub fn ada_value(&self) -> f64 {
        self.ada_value.unwrap_or(0.0)
    }

    /// USD value as reported, or derived from the ADA value at `fiat_rate`
    pub fn usd_value(&self, fiat_rate: f64) -> f64 {
        self.usd_value.unwrap_or_else(|| self.ada_value() * fiat_rate)
    }

    /// Key the position is grouped under.
    ///
    /// Ticker first, then unit, then fingerprint. Only positions with none of
    /// these collapse onto [`UNKNOWN_TOKEN`].
    pub fn grouping_key(&self) -> String {
        [&self.ticker, &self.unit, &self.fingerprint]
            .into_iter()
            .filter_map(|field| field.as_deref().map(str::trim))
            .find(|value| !value.is_empty())
            .unwrap_or(UNKNOWN_TOKEN)
            .to_string()
    }

    /// Ticker for display, with the sentinel for untickered tokens
    pub fn display_ticker(&self) -> &str {
        match self.ticker.as_deref().map(str::trim) {
            Some(ticker) if !ticker.is_empty() => ticker,
            _ => UNKNOWN_TOKEN,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_numbers_default_to_zero() {
        let position: TokenPosition = serde_json::from_str(r#"{"ticker": "HOSKY"}"#).unwrap();

        assert_eq!(position.quantity(), 0.0);
        assert_eq!(position.ada_value(), 0.0);
        assert_eq!(position.usd_value(0.35), 0.0);
    }

    #[test]
    fn test_null_fields_decode_as_absent() {
        let position: TokenPosition = serde_json::from_str(
            r#"{"ticker": null, "balance": 12.5, "adaValue": null, "usdValue": null, "price": 0.1}"#,
        )
        .unwrap();

        assert_eq!(position.ticker, None);
        assert_eq!(position.quantity(), 12.5);
        assert_eq!(position.ada_value, None);
    }

    #[test]
    fn test_usd_value_prefers_reported_value() {
        let position = TokenPosition::new("MIN", 10.0, 10.0).with_usd_value(4.0);
        assert_eq!(position.usd_value(0.35), 4.0);
    }

    #[test]
    fn test_grouping_key_falls_back_to_unit() {
        let position = TokenPosition {
            unit: Some("f43a62fdc3965df486de8a0d32fe800963589c41b38946602a0dc53541474958".into()),
            ..TokenPosition::default()
        };

        assert_eq!(
            position.grouping_key(),
            "f43a62fdc3965df486de8a0d32fe800963589c41b38946602a0dc53541474958"
        );
        assert_eq!(position.display_ticker(), UNKNOWN_TOKEN);
    }

    #[test]
    fn test_blank_ticker_is_treated_as_missing() {
        let position = TokenPosition {
            ticker: Some("  ".into()),
            fingerprint: Some("asset1abc".into()),
            ..TokenPosition::default()
        };
        assert_eq!(position.grouping_key(), "asset1abc");

        assert_eq!(TokenPosition::default().grouping_key(), UNKNOWN_TOKEN);
    }
}
