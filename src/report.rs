//! Plain-text rendering of a [`PortfolioSummary`].

use prettytable::{format, Cell, Row, Table};

use crate::errors::AggregationError;
use crate::models::portfolio::{PortfolioSummary, TokenBook};
use crate::utils::helper::{format_ada, format_amount, format_price, format_usd, shorten_identifier};

pub const AGGREGATED_HEADING: &str = "Aggregated Token Data (Sorted by Highest ADA Value)";
pub const NO_TOKENS: &str = "No tokens found across the given wallets.";
pub const DISCLAIMER: &str = "Disclaimer: Data is sourced from third-party APIs (TapTools & CoinGecko). \
Please verify accuracy before making decisions. The app developers are not \
liable for any actions taken based on this data.";

/// Render the summary cards, the aggregated table and one table per wallet
pub fn render(summary: &PortfolioSummary) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "Portfolio generated {}\n\n",
        summary.timestamp.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    out.push_str(&summary_cards(summary).to_string());
    out.push('\n');

    out.push_str(AGGREGATED_HEADING);
    out.push('\n');
    if summary.global_tokens.is_empty() {
        out.push_str(NO_TOKENS);
        out.push('\n');
    } else {
        out.push_str(&token_table(&summary.global_tokens).to_string());
    }

    for wallet in summary.per_wallet.iter() {
        if wallet.tokens.is_empty() {
            continue;
        }
        out.push_str(&format!("\nToken Data for Wallet: {}\n", wallet.address));
        out.push_str(&token_table(&wallet.tokens).to_string());
    }

    if !summary.skipped.is_empty() {
        out.push_str("\nWallets without data:\n");
        for skipped in &summary.skipped {
            out.push_str(&format!(
                "  {} ({})\n",
                shorten_identifier(&skipped.address, 12),
                skipped.reason
            ));
        }
    }

    out.push('\n');
    out.push_str(DISCLAIMER);
    out.push('\n');
    out
}

/// Message shown instead of a report when the aggregation failed
pub fn render_unavailable(error: &AggregationError) -> String {
    format!(
        "Error retrieving data: {}. Please go back and try again.\n",
        error
    )
}

fn summary_cards(summary: &PortfolioSummary) -> Table {
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_BOX_CHARS);
    table.set_titles(Row::new(vec![
        Cell::new("ADA Price"),
        Cell::new("Total ADA Value"),
        Cell::new("Total USD Value"),
    ]));
    table.add_row(Row::new(vec![
        Cell::new(&format_price(summary.fiat_rate)),
        Cell::new(&format_ada(summary.total_ada_value)),
        Cell::new(&format_usd(summary.total_usd_value)),
    ]));
    table
}

fn token_table(book: &TokenBook) -> Table {
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_NO_LINESEP_WITH_TITLE);
    table.set_titles(Row::new(vec![
        Cell::new("Token"),
        Cell::new("Quantity"),
        Cell::new("ADA Value"),
        Cell::new("USD Value"),
    ]));

    for token in book.sorted_by_ada_value() {
        table.add_row(Row::new(vec![
            Cell::new(&token.display_name()),
            Cell::new(&format_amount(token.quantity)).style_spec("r"),
            Cell::new(&format_amount(token.ada_value)).style_spec("r"),
            Cell::new(&format_usd(token.usd_value)).style_spec("r"),
        ]));
    }
    table
}
