use async_trait::async_trait;

use super::run_command;
use crate::models::RestockEvent;
use crate::plugins::traits::AlertSink;
use crate::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NotifyStyle {
    AppleScript,
    NotifySend,
}

/// Native desktop notification through the platform's notification command.
#[derive(Debug)]
pub struct DesktopSink {
    program: String,
    style: NotifyStyle,
}

impl DesktopSink {
    pub fn new() -> Self {
        if cfg!(target_os = "macos") {
            Self {
                program: "osascript".to_string(),
                style: NotifyStyle::AppleScript,
            }
        } else {
            Self {
                program: "notify-send".to_string(),
                style: NotifyStyle::NotifySend,
            }
        }
    }

    /// Use `program` with `notify-send` style arguments: title, then body.
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            style: NotifyStyle::NotifySend,
        }
    }

    fn title(event: &RestockEvent) -> String {
        format!("🚨 {} - IN STOCK!", event.store_name())
    }

    fn args(&self, event: &RestockEvent) -> Vec<String> {
        let title = Self::title(event);
        let body = event.product_name().to_string();
        match self.style {
            NotifyStyle::AppleScript => vec![
                "-e".to_string(),
                format!(
                    "display notification \"{}\" with title \"{}\" sound name \"Glass\"",
                    escape_applescript(&body),
                    escape_applescript(&title)
                ),
            ],
            NotifyStyle::NotifySend => vec![title, body],
        }
    }
}

impl Default for DesktopSink {
    fn default() -> Self {
        Self::new()
    }
}

fn escape_applescript(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}

#[async_trait]
impl AlertSink for DesktopSink {
    fn name(&self) -> &str {
        "Desktop Notification"
    }

    fn sink_type(&self) -> &str {
        "desktop"
    }

    async fn notify(&self, event: &RestockEvent) -> Result<()> {
        run_command(self.sink_type(), &self.program, &self.args(event)).await
    }
}
