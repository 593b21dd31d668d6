use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Watchlist error: {path}: {message}")]
    Watchlist { path: String, message: String },

    #[error("No detector registered for source: {source_kind}")]
    DetectorNotFound { source_kind: String },

    #[error("Sink error: {sink}: {message}")]
    Sink { sink: String, message: String },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn sink(sink: impl Into<String>, message: impl Into<String>) -> Self {
        AppError::Sink {
            sink: sink.into(),
            message: message.into(),
        }
    }
}

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, AppError>;
