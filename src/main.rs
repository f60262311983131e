use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use dialoguer::{Confirm, Input, Password};
use tokio::runtime::Runtime;
use tracing::level_filters::LevelFilter;
use tracing::{info, warn};

use cardano_wallet_profiler::wizard::{
    advance, prefill_slots, Effect, WizardInput, WizardState, MAX_WALLETS,
};
use cardano_wallet_profiler::{
    AccessGate, CoinGeckoPriceProvider, CompositeEventHandler, ConsoleEventHandler,
    PortfolioTracker, ReportEventHandler, Settings, TapToolsDataProvider, WizardError, VERSION,
};

/// Cardano wallet profiler: aggregate token holdings across wallets.
#[derive(Parser, Debug)]
#[command(name = "cardano-wallet-profiler", version)]
struct Cli {
    /// Wallet address to include (repeatable, at most five)
    #[arg(short, long = "wallet", value_name = "ADDRESS")]
    wallets: Vec<String>,

    /// Access code; together with --wallet the run is non-interactive
    #[arg(long)]
    access_code: Option<String>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so the report on stdout stays clean
    tracing_subscriber::fmt()
        .with_level(true)
        .with_target(false)
        .with_max_level(if cli.verbose { LevelFilter::DEBUG } else { LevelFilter::INFO })
        .with_file(true)
        .with_line_number(true)
        .with_writer(std::io::stderr)
        .init();

    dotenvy::dotenv().ok();

    let settings = Settings::from_env();
    info!("Cardano wallet profiler v{}", VERSION);
    info!("Price source: {}", settings.coingecko_url);
    info!("Positions source: {}", settings.taptools_positions_url);

    let price_provider = Arc::new(CoinGeckoPriceProvider::new(
        settings.coingecko_url.clone(),
        settings.http_timeout,
    )?);
    let data_provider = Arc::new(TapToolsDataProvider::new(
        settings.taptools_positions_url.clone(),
        settings.taptools_api_key.clone(),
        settings.http_timeout,
    )?);

    let mut handlers = CompositeEventHandler::new();
    handlers.add_handler(Arc::new(ConsoleEventHandler::new()));
    handlers.add_handler(Arc::new(ReportEventHandler::new()));

    let tracker = PortfolioTracker::new(data_provider, price_provider, Arc::new(handlers));
    let gate = AccessGate::new(settings.access_code.clone());
    let runtime = Runtime::new().context("Failed to start tokio runtime")?;

    // Reject an over-long --wallet list before any prompt can drop entries
    let prefill = prefill_slots(&cli.wallets)?;

    let mut state = WizardState::start();
    if let Some(code) = cli.access_code.clone() {
        state = advance(&gate, state, WizardInput::SubmitCode(code))?.state;
        if !matches!(state, WizardState::WalletEntry { .. }) {
            return Err(WizardError::AccessDenied.into());
        }
        if !cli.wallets.is_empty() {
            return run_once(&runtime, &tracker, &gate, state, cli.wallets);
        }
    }

    run_interactive(&runtime, &tracker, &gate, state, &prefill)
}

/// Submit the wallets once, render the outcome and exit
fn run_once(
    runtime: &Runtime,
    tracker: &PortfolioTracker,
    gate: &AccessGate,
    state: WizardState,
    wallets: Vec<String>,
) -> anyhow::Result<()> {
    let step = advance(gate, state, WizardInput::SubmitWallets(wallets))?;
    if let Effect::Aggregate(addresses) = step.effect {
        runtime.block_on(tracker.profile(&addresses))?;
    }
    Ok(())
}

/// Prompt-driven wizard; this loop owns the step sequencing
fn run_interactive(
    runtime: &Runtime,
    tracker: &PortfolioTracker,
    gate: &AccessGate,
    mut state: WizardState,
    prefill: &[String],
) -> anyhow::Result<()> {
    loop {
        let input = match &state {
            WizardState::AccessCode { failed_attempts } => {
                if *failed_attempts > 0 {
                    warn!("Incorrect access code. Please try again.");
                }
                println!("Step {}: Enter your Access Code to proceed.", state.step_number());
                let code = Password::new()
                    .with_prompt("Access Code")
                    .interact()?;
                WizardInput::SubmitCode(code)
            }
            WizardState::WalletEntry { addresses } => {
                println!(
                    "Step {}: Enter up to {} Cardano wallet addresses.",
                    state.step_number(),
                    MAX_WALLETS
                );
                let mut entered = Vec::with_capacity(MAX_WALLETS);
                for slot in 0..MAX_WALLETS {
                    let initial = addresses
                        .get(slot)
                        .filter(|a| !a.is_empty())
                        .or_else(|| prefill.get(slot).filter(|a| !a.is_empty()))
                        .cloned()
                        .unwrap_or_default();
                    let address: String = Input::new()
                        .with_prompt(format!("Wallet Address {}", slot + 1))
                        .with_initial_text(initial)
                        .allow_empty(true)
                        .interact_text()?;
                    entered.push(address);
                }
                WizardInput::SubmitWallets(entered)
            }
            WizardState::Aggregating { .. } => {
                anyhow::bail!("Wizard left waiting for an aggregation result")
            }
            WizardState::Results { .. } => {
                let back = Confirm::new()
                    .with_prompt("Go back to wallet input?")
                    .default(false)
                    .interact()?;
                if !back {
                    return Ok(());
                }
                WizardInput::Back
            }
        };

        let step = match advance(gate, state.clone(), input) {
            Ok(step) => step,
            Err(e @ WizardError::TooManyWallets { .. }) => {
                warn!("{}", e);
                continue;
            }
            Err(e) => return Err(e.into()),
        };
        state = step.state;

        if let Effect::Aggregate(addresses) = step.effect {
            println!("Step {}: Your Aggregated Portfolio Results", state.step_number());
            let outcome = runtime.block_on(tracker.profile(&addresses));
            state = advance(gate, state, WizardInput::Aggregated(outcome))?.state;
        }
    }
}
