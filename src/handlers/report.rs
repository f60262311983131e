use std::io::Write;

use async_trait::async_trait;
use tracing::warn;

use crate::errors::AggregationError;
use crate::models::portfolio::PortfolioSummary;
use crate::report;
use crate::traits::event_handler::PortfolioEventHandler;

/// Writes the rendered report tables to stdout
pub struct ReportEventHandler;

impl ReportEventHandler {
    pub fn new() -> Self {
        Self
    }

    fn emit(&self, text: &str) {
        let mut stdout = std::io::stdout().lock();
        if let Err(e) = stdout.write_all(text.as_bytes()).and_then(|_| stdout.flush()) {
            warn!("Failed to write report: {}", e);
        }
    }
}

impl Default for ReportEventHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PortfolioEventHandler for ReportEventHandler {
    async fn handle_summary(&self, summary: &PortfolioSummary) {
        self.emit(&report::render(summary));
    }

    async fn handle_error(&self, error: &AggregationError) {
        self.emit(&report::render_unavailable(error));
    }
}
