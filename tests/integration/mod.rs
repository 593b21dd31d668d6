// Shared helpers for integration tests

pub mod end_to_end_tests;
pub mod fetcher_tests;
pub mod webhook_tests;

use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use restock_watcher::models::{RestockEvent, WatchItem};
use restock_watcher::plugins::{AlertDispatcher, AlertSink, DetectorRegistry};
use restock_watcher::scheduler::{MonitorSettings, StockMonitor};
use restock_watcher::scraper::{HttpFetcher, DEFAULT_USER_AGENT};
use restock_watcher::watchlist::Watchlist;

/// Sink that remembers every event it was handed.
#[derive(Default)]
pub struct RecordingSink {
    events: Mutex<Vec<RestockEvent>>,
}

impl RecordingSink {
    pub fn events(&self) -> Vec<RestockEvent> {
        self.events.lock().unwrap().clone()
    }
}

#[async_trait]
impl AlertSink for RecordingSink {
    fn name(&self) -> &str {
        "Recording"
    }

    fn sink_type(&self) -> &str {
        "recording"
    }

    async fn notify(&self, event: &RestockEvent) -> restock_watcher::Result<()> {
        self.events.lock().unwrap().push(event.clone());
        Ok(())
    }
}

pub fn test_fetcher() -> HttpFetcher {
    HttpFetcher::with_settings(DEFAULT_USER_AGENT, Duration::from_secs(2)).unwrap()
}

/// Settings with no delays, suitable for driving cycles by hand.
pub fn test_settings() -> MonitorSettings {
    MonitorSettings {
        check_interval: Duration::from_secs(30),
        item_delay: Duration::ZERO,
        retry_attempts: 0,
        retry_delay: Duration::from_millis(10),
        reload_watchlist: false,
    }
}

/// A monitor over `urls` using the real HTTP fetcher and a recording sink.
pub fn test_monitor(urls: &[String]) -> (StockMonitor, Arc<RecordingSink>) {
    let sink = Arc::new(RecordingSink::default());
    let mut dispatcher = AlertDispatcher::new(Duration::from_secs(2));
    dispatcher.add_sink(sink.clone());

    let items = urls.iter().map(|url| WatchItem::new(url.as_str())).collect();
    let monitor = StockMonitor::new(
        Watchlist::from_items(items),
        Arc::new(test_fetcher()),
        DetectorRegistry::with_default_detectors(),
        dispatcher,
        test_settings(),
    );
    (monitor, sink)
}
