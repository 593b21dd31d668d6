// Alert sink implementations
pub mod browser;
pub mod console;
pub mod desktop;
pub mod discord;
pub mod history;
pub mod log;
pub mod sound;

pub use browser::BrowserSink;
pub use console::ConsoleSink;
pub use desktop::DesktopSink;
pub use discord::DiscordSink;
pub use history::HistorySink;
pub use log::LogSink;
pub use sound::SoundSink;

use tokio::process::Command;

use crate::utils::error::{AppError, Result};

/// Run an external program to completion, treating spawn failures and non-zero exits as errors.
pub(crate) async fn run_command(sink: &str, program: &str, args: &[String]) -> Result<()> {
    let status = Command::new(program)
        .args(args)
        .kill_on_drop(true)
        .status()
        .await
        .map_err(|e| AppError::sink(sink, format!("failed to run {program}: {e}")))?;

    if status.success() {
        Ok(())
    } else {
        Err(AppError::sink(sink, format!("{program} exited with {status}")))
    }
}
