use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum StockStatus {
    Available,
    Unavailable,
    /// Nothing on the page was conclusive. Never starts or ends a run.
    Unknown,
}

impl fmt::Display for StockStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StockStatus::Available => f.write_str("IN STOCK"),
            StockStatus::Unavailable => f.write_str("OUT OF STOCK"),
            StockStatus::Unknown => f.write_str("UNKNOWN"),
        }
    }
}

/// Result of classifying one fetched page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AvailabilityVerdict {
    pub status: StockStatus,
    pub price: Option<String>,
    pub note: Option<String>,
}

impl AvailabilityVerdict {
    pub fn available(price: Option<String>) -> Self {
        Self {
            status: StockStatus::Available,
            price,
            note: None,
        }
    }

    pub fn unavailable(price: Option<String>) -> Self {
        Self {
            status: StockStatus::Unavailable,
            price,
            note: None,
        }
    }

    pub fn unknown(price: Option<String>, note: impl Into<String>) -> Self {
        Self {
            status: StockStatus::Unknown,
            price,
            note: Some(note.into()),
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    pub fn is_available(&self) -> bool {
        self.status == StockStatus::Available
    }
}
