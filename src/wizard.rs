//! Three-step access / wallet entry / results flow.
//!
//! Each step is a pure transition from the current state and one input to the
//! next state plus an [`Effect`] the caller must perform. The caller owns the
//! sequencing: it prompts for input, runs effects, and feeds their results
//! back as inputs.

use crate::access::AccessGate;
use crate::errors::{AggregationError, WizardError};
use crate::models::portfolio::PortfolioSummary;
use crate::tracker::aggregator::normalize_addresses;

/// Number of wallet slots offered on the entry step
pub const MAX_WALLETS: usize = 5;

#[derive(Debug, Clone)]
pub enum WizardState {
    AccessCode {
        failed_attempts: u32,
    },
    WalletEntry {
        addresses: Vec<String>,
    },
    Aggregating {
        addresses: Vec<String>,
    },
    Results {
        addresses: Vec<String>,
        outcome: Result<PortfolioSummary, AggregationError>,
    },
}

impl WizardState {
    pub fn start() -> Self {
        WizardState::AccessCode { failed_attempts: 0 }
    }

    /// 1-based step number shown to the user
    pub fn step_number(&self) -> u8 {
        match self {
            WizardState::AccessCode { .. } => 1,
            WizardState::WalletEntry { .. } => 2,
            WizardState::Aggregating { .. } | WizardState::Results { .. } => 3,
        }
    }

    fn name(&self) -> &'static str {
        match self {
            WizardState::AccessCode { .. } => "AccessCode",
            WizardState::WalletEntry { .. } => "WalletEntry",
            WizardState::Aggregating { .. } => "Aggregating",
            WizardState::Results { .. } => "Results",
        }
    }
}

#[derive(Debug, Clone)]
pub enum WizardInput {
    SubmitCode(String),
    SubmitWallets(Vec<String>),
    Aggregated(Result<PortfolioSummary, AggregationError>),
    Back,
}

impl WizardInput {
    fn name(&self) -> &'static str {
        match self {
            WizardInput::SubmitCode(_) => "SubmitCode",
            WizardInput::SubmitWallets(_) => "SubmitWallets",
            WizardInput::Aggregated(_) => "Aggregated",
            WizardInput::Back => "Back",
        }
    }
}

/// Work the caller performs after a transition
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    /// Aggregate these (already normalized) addresses and feed back `Aggregated`
    Aggregate(Vec<String>),
}

#[derive(Debug, Clone)]
pub struct Step {
    pub state: WizardState,
    pub effect: Effect,
}

impl Step {
    fn to(state: WizardState) -> Self {
        Self {
            state,
            effect: Effect::None,
        }
    }
}

/// Normalize wallet input and enforce the slot limit
pub fn check_wallets(addresses: &[String]) -> Result<Vec<String>, WizardError> {
    let valid = normalize_addresses(addresses);
    if valid.len() > MAX_WALLETS {
        return Err(WizardError::TooManyWallets {
            max: MAX_WALLETS,
            given: valid.len(),
        });
    }
    Ok(valid)
}

/// Wallet slots pre-filled from command-line addresses, padded with blanks
pub fn prefill_slots(addresses: &[String]) -> Result<Vec<String>, WizardError> {
    let mut slots = check_wallets(addresses)?;
    slots.resize(MAX_WALLETS, String::new());
    Ok(slots)
}

/// Advance the wizard by one input
pub fn advance(
    gate: &AccessGate,
    state: WizardState,
    input: WizardInput,
) -> Result<Step, WizardError> {
    match (state, input) {
        (WizardState::AccessCode { failed_attempts }, WizardInput::SubmitCode(code)) => {
            if gate.check(&code) {
                Ok(Step::to(WizardState::WalletEntry {
                    addresses: vec![String::new(); MAX_WALLETS],
                }))
            } else {
                Ok(Step::to(WizardState::AccessCode {
                    failed_attempts: failed_attempts + 1,
                }))
            }
        }
        (WizardState::WalletEntry { .. }, WizardInput::SubmitWallets(addresses)) => {
            let valid = check_wallets(&addresses)?;
            Ok(Step {
                state: WizardState::Aggregating { addresses },
                effect: Effect::Aggregate(valid),
            })
        }
        (WizardState::Aggregating { addresses }, WizardInput::Aggregated(outcome)) => {
            Ok(Step::to(WizardState::Results { addresses, outcome }))
        }
        (WizardState::Results { addresses, .. }, WizardInput::Back) => {
            Ok(Step::to(WizardState::WalletEntry { addresses }))
        }
        (state, input) => Err(WizardError::InvalidTransition {
            state: state.name(),
            input: input.name(),
        }),
    }
}
