//! Error types for aggregation and the wizard flow.

use thiserror::Error;

/// Fatal aggregation failures.
///
/// Per-wallet fetch failures are not errors at this level; they are logged and
/// recorded on the summary instead.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AggregationError {
    /// No usable ADA/USD rate could be obtained, so nothing was fetched
    #[error("ADA price unavailable")]
    PriceUnavailable,
}

/// Errors raised while advancing the wizard
#[derive(Error, Debug, Clone, PartialEq)]
pub enum WizardError {
    #[error("Access denied")]
    AccessDenied,

    #[error("Too many wallets: {given} given, at most {max} allowed")]
    TooManyWallets { max: usize, given: usize },

    #[error("Invalid transition: {input} while in {state}")]
    InvalidTransition {
        state: &'static str,
        input: &'static str,
    },
}
