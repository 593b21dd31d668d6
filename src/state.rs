use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use crate::models::{AvailabilityVerdict, RestockEvent, StockStatus, WatchItem};

/// Last classified state of one item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ItemState {
    pub last_known_available: bool,
    pub last_price: Option<String>,
    pub last_checked_at: DateTime<Utc>,
}

/// Per-item availability memory that turns verdicts into restock events.
///
/// An event fires on the first `Available` verdict of each run. Only an `Unavailable` verdict
/// ends a run; `Unknown` verdicts leave the state untouched.
#[derive(Debug, Default)]
pub struct ItemStateTracker {
    states: HashMap<String, ItemState>,
}

impl ItemStateTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn observe(&mut self, item: &WatchItem, verdict: &AvailabilityVerdict) -> Option<RestockEvent> {
        self.observe_at(item, verdict, Utc::now())
    }

    pub fn observe_at(
        &mut self,
        item: &WatchItem,
        verdict: &AvailabilityVerdict,
        now: DateTime<Utc>,
    ) -> Option<RestockEvent> {
        let available = match verdict.status {
            StockStatus::Unknown => return None,
            StockStatus::Available => true,
            StockStatus::Unavailable => false,
        };

        let was_available = self
            .states
            .get(item.id())
            .is_some_and(|state| state.last_known_available);

        self.states.insert(
            item.id().to_string(),
            ItemState {
                last_known_available: available,
                last_price: verdict.price.clone(),
                last_checked_at: now,
            },
        );

        if available && !was_available {
            Some(RestockEvent::new(item.clone(), verdict.price.clone(), now))
        } else {
            None
        }
    }

    pub fn state(&self, id: &str) -> Option<&ItemState> {
        self.states.get(id)
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Drop state for items no longer watched. Returns how many entries were removed.
    pub fn retain_items(&mut self, items: &[WatchItem]) -> usize {
        let keep: HashSet<&str> = items.iter().map(WatchItem::id).collect();
        let before = self.states.len();
        self.states.retain(|id, _| keep.contains(id.as_str()));
        before - self.states.len()
    }
}
