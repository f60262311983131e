use std::cmp::Ordering;
use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use super::token::TokenPosition;
use crate::utils::shorten_identifier;

/// Running totals for one token key
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TokenAggregate {
    /// Grouping key (ticker, unit or fingerprint)
    pub ticker: String,
    /// Human-readable name; differs from the key for untickered tokens
    pub label: String,
    pub quantity: f64,
    pub ada_value: f64,
    pub usd_value: f64,
}

impl TokenAggregate {
    /// Create an empty aggregate for a key with its display label
    pub fn new(ticker: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            ticker: ticker.into(),
            label: label.into(),
            ..Self::default()
        }
    }

    /// Label, followed by the shortened key when the two differ
    pub fn display_name(&self) -> String {
        if self.label.is_empty() || self.label == self.ticker {
            shorten_identifier(&self.ticker, 8)
        } else {
            format!("{} ({})", self.label, shorten_identifier(&self.ticker, 8))
        }
    }

    /// Fold one position into the running totals
    pub fn absorb(&mut self, position: &TokenPosition, fiat_rate: f64) {
        self.quantity += position.quantity();
        self.ada_value += position.ada_value();
        self.usd_value += position.usd_value(fiat_rate);
    }

    /// Add another aggregate of the same key
    pub fn merge(&mut self, other: &TokenAggregate) {
        self.quantity += other.quantity;
        self.ada_value += other.ada_value;
        self.usd_value += other.usd_value;
    }
}

/// Token key -> aggregate, for one scope (a wallet or the whole portfolio)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TokenBook {
    tokens: BTreeMap<String, TokenAggregate>,
}

impl TokenBook {
    /// Create an empty book
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold a position under its grouping key
    pub fn absorb(&mut self, position: &TokenPosition, fiat_rate: f64) {
        let key = position.grouping_key();
        self.tokens
            .entry(key.clone())
            .or_insert_with(|| TokenAggregate::new(key, position.display_ticker()))
            .absorb(position, fiat_rate);
    }

    /// Fold every aggregate of `other` into this book
    pub fn merge(&mut self, other: &TokenBook) {
        for (key, aggregate) in &other.tokens {
            self.tokens
                .entry(key.clone())
                .or_insert_with(|| TokenAggregate::new(key.clone(), aggregate.label.clone()))
                .merge(aggregate);
        }
    }

    /// Aggregate stored under `key`
    pub fn get(&self, key: &str) -> Option<&TokenAggregate> {
        self.tokens.get(key)
    }

    /// Aggregates in key order
    pub fn iter(&self) -> impl Iterator<Item = &TokenAggregate> {
        self.tokens.values()
    }

    /// Grouping keys in order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.tokens.keys().map(String::as_str)
    }

    /// Number of distinct tokens
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Check if the book holds any token
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Sum of ADA values across tokens
    pub fn total_ada_value(&self) -> f64 {
        self.tokens.values().map(|t| t.ada_value).sum()
    }

    /// Sum of USD values across tokens
    pub fn total_usd_value(&self) -> f64 {
        self.tokens.values().map(|t| t.usd_value).sum()
    }

    /// Aggregates ordered by ADA value, highest first. Ties keep key order.
    pub fn sorted_by_ada_value(&self) -> Vec<&TokenAggregate> {
        let mut tokens: Vec<&TokenAggregate> = self.tokens.values().collect();
        tokens.sort_by(|a, b| {
            b.ada_value
                .partial_cmp(&a.ada_value)
                .unwrap_or(Ordering::Equal)
        });
        tokens
    }
}

/// Holdings of a single wallet address
#[derive(Debug, Clone, PartialEq)]
pub struct WalletHoldings {
    pub address: String,
    pub tokens: TokenBook,
}

/// Per-wallet books, keyed by address in first-seen order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WalletAggregate {
    wallets: Vec<WalletHoldings>,
}

impl WalletAggregate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Book for `address`, created empty on first use
    pub fn entry(&mut self, address: &str) -> &mut TokenBook {
        let index = match self.wallets.iter().position(|w| w.address == address) {
            Some(index) => index,
            None => {
                self.wallets.push(WalletHoldings {
                    address: address.to_string(),
                    tokens: TokenBook::new(),
                });
                self.wallets.len() - 1
            }
        };
        &mut self.wallets[index].tokens
    }

    pub fn get(&self, address: &str) -> Option<&TokenBook> {
        self.wallets
            .iter()
            .find(|w| w.address == address)
            .map(|w| &w.tokens)
    }

    pub fn iter(&self) -> impl Iterator<Item = &WalletHoldings> {
        self.wallets.iter()
    }

    pub fn addresses(&self) -> impl Iterator<Item = &str> {
        self.wallets.iter().map(|w| w.address.as_str())
    }

    pub fn len(&self) -> usize {
        self.wallets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.wallets.is_empty()
    }
}

/// A wallet left out of the summary, with the reason its fetch failed
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedWallet {
    pub address: String,
    pub reason: String,
}

/// Result of one aggregation run
#[derive(Debug, Clone)]
pub struct PortfolioSummary {
    pub timestamp: DateTime<Utc>,
    pub total_ada_value: f64,
    pub total_usd_value: f64,
    pub global_tokens: TokenBook,
    pub per_wallet: WalletAggregate,
    pub fiat_rate: f64,
    pub skipped: Vec<SkippedWallet>,
}

impl PortfolioSummary {
    /// Create an empty summary priced at `fiat_rate`
    pub fn new(fiat_rate: f64) -> Self {
        Self {
            timestamp: Utc::now(),
            total_ada_value: 0.0,
            total_usd_value: 0.0,
            global_tokens: TokenBook::new(),
            per_wallet: WalletAggregate::new(),
            fiat_rate,
            skipped: Vec::new(),
        }
    }

    /// True when no wallet contributed any token
    pub fn is_empty(&self) -> bool {
        self.global_tokens.is_empty()
    }

    /// Number of distinct tokens across all wallets
    pub fn token_count(&self) -> usize {
        self.global_tokens.len()
    }
}
