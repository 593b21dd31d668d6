use async_trait::async_trait;
use std::io::Write;

use crate::models::RestockEvent;
use crate::plugins::traits::AlertSink;
use crate::utils::error::{AppError, Result};

const RULE_WIDTH: usize = 60;

/// Prints a banner to stdout. Always enabled.
#[derive(Debug, Default)]
pub struct ConsoleSink;

impl ConsoleSink {
    pub fn new() -> Self {
        Self
    }

    pub fn render(event: &RestockEvent) -> String {
        let rule = "=".repeat(RULE_WIDTH);
        let mut banner = format!(
            "\n{rule}\n🚨🚨🚨 ALERT! PRODUCT IN STOCK! 🚨🚨🚨\n{rule}\n\n🏪 Store: {}\n📦 Product: {}\n",
            event.store_name(),
            event.product_name()
        );
        if let Some(price) = &event.price {
            banner.push_str(&format!("💰 Price: {price}\n"));
        }
        banner.push_str(&format!("🔗 {}\n\n{rule}", event.url()));
        banner
    }

    /// A closed or detached stdout surfaces here as an error instead of a panic.
    pub fn write_banner<W: Write>(out: &mut W, event: &RestockEvent) -> Result<()> {
        writeln!(out, "{}", Self::render(event))
            .and_then(|()| out.flush())
            .map_err(|e| AppError::sink("console", format!("failed to write banner: {e}")))
    }
}

#[async_trait]
impl AlertSink for ConsoleSink {
    fn name(&self) -> &str {
        "Console"
    }

    fn sink_type(&self) -> &str {
        "console"
    }

    async fn notify(&self, event: &RestockEvent) -> Result<()> {
        Self::write_banner(&mut std::io::stdout().lock(), event)
    }
}
