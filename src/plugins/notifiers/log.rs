use async_trait::async_trait;

use crate::models::RestockEvent;
use crate::plugins::traits::AlertSink;
use crate::utils::telemetry::JOURNAL_TARGET;
use crate::Result;

/// Writes the alert summary to the log file journal.
#[derive(Debug, Default)]
pub struct LogSink;

impl LogSink {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl AlertSink for LogSink {
    fn name(&self) -> &str {
        "Log"
    }

    fn sink_type(&self) -> &str {
        "log"
    }

    async fn notify(&self, event: &RestockEvent) -> Result<()> {
        tracing::info!(target: JOURNAL_TARGET, "🚨 {}", event.summary());
        Ok(())
    }
}
