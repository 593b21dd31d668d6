use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::WatchItem;

/// Emitted once per not-available to available transition of an item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RestockEvent {
    pub item: WatchItem,
    pub price: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl RestockEvent {
    pub fn new(item: WatchItem, price: Option<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            item,
            price,
            timestamp,
        }
    }

    pub fn store_name(&self) -> &'static str {
        self.item.store_name()
    }

    pub fn product_name(&self) -> &str {
        &self.item.display_name
    }

    pub fn url(&self) -> &str {
        &self.item.url
    }

    pub fn price_or_unknown(&self) -> &str {
        self.price.as_deref().unwrap_or("Unknown")
    }

    /// Single-line summary used by log output.
    pub fn summary(&self) -> String {
        format!(
            "IN STOCK: {} - {} - {} - {}",
            self.store_name(),
            self.product_name(),
            self.price_or_unknown(),
            self.url()
        )
    }
}
