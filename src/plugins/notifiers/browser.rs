use async_trait::async_trait;
use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use crate::models::RestockEvent;
use crate::plugins::traits::AlertSink;
use crate::utils::error::{AppError, Result};

pub type Launcher = Arc<dyn Fn(&str) -> std::io::Result<()> + Send + Sync>;

/// Opens the product page in the default browser after a short delay.
pub struct BrowserSink {
    delay: Duration,
    launcher: Launcher,
}

impl BrowserSink {
    pub fn new(delay: Duration) -> Self {
        Self::with_launcher(delay, Arc::new(|url: &str| open::that_detached(url)))
    }

    pub fn with_launcher(delay: Duration, launcher: Launcher) -> Self {
        Self { delay, launcher }
    }
}

#[async_trait]
impl AlertSink for BrowserSink {
    fn name(&self) -> &str {
        "Browser"
    }

    fn sink_type(&self) -> &str {
        "browser"
    }

    async fn notify(&self, event: &RestockEvent) -> Result<()> {
        if !self.delay.is_zero() {
            // The countdown line is cosmetic; a closed stdout must not stop the launch.
            let countdown = writeln!(
                std::io::stdout().lock(),
                "🚀 Opening browser in {} seconds...",
                self.delay.as_secs()
            );
            if let Err(e) = countdown {
                tracing::debug!("Could not print browser countdown: {}", e);
            }
            tokio::time::sleep(self.delay).await;
        }

        (self.launcher)(event.url())
            .map_err(|e| AppError::sink(self.sink_type(), format!("failed to open {}: {e}", event.url())))
    }
}
