use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing::Level;
use tracing_subscriber::filter::filter_fn;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::utils::error::{AppError, Result};

const DEFAULT_FILTER: &str = "restock_watcher=info";

/// Events with this target are written to the log file as well as the console.
pub const JOURNAL_TARGET: &str = "restock_watcher::journal";

/// Console output plus an append-only log file at `log_path`.
///
/// The file only receives warnings, errors and `JOURNAL_TARGET` events: poll errors, alerts
/// and lifecycle markers.
///
/// The returned guard flushes the file writer on drop; keep it alive for the life of the process.
pub fn init_tracing(log_path: &Path) -> Result<WorkerGuard> {
    let directory = match log_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let file_name = log_path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| AppError::Internal(format!("Invalid log path: {}", log_path.display())))?;

    let appender = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(file_name)
        .build(directory)
        .map_err(|e| AppError::Internal(format!("Failed to open log file: {e}")))?;
    let (file_writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_FILTER.into()))
        .with(fmt::layer().with_target(false))
        .with(
            fmt::layer()
                .with_writer(file_writer)
                .with_ansi(false)
                .with_target(false)
                .with_filter(filter_fn(|meta| {
                    *meta.level() <= Level::WARN || meta.target() == JOURNAL_TARGET
                })),
        )
        .try_init()
        .map_err(|e| AppError::Internal(format!("Failed to initialize tracing: {e}")))?;

    Ok(guard)
}
