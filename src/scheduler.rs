use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tokio_retry::strategy::FixedInterval;
use tokio_retry::RetryIf;
use tokio_util::sync::CancellationToken;

use crate::config::AppConfig;
use crate::models::{foreign_store_mention, RestockEvent, StockStatus, WatchItem};
use crate::plugins::{AlertDispatcher, DetectorRegistry, DispatchHandle, SinkOutcome};
use crate::scraper::{FetchResult, PageFetcher};
use crate::state::ItemStateTracker;
use crate::utils::telemetry::JOURNAL_TARGET;
use crate::watchlist::Watchlist;
use crate::Result;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonitorSettings {
    pub check_interval: Duration,
    pub item_delay: Duration,
    pub retry_attempts: u32,
    pub retry_delay: Duration,
    pub reload_watchlist: bool,
}

impl MonitorSettings {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            check_interval: Duration::from_secs(config.monitor.check_interval_secs),
            item_delay: Duration::from_secs(config.monitor.item_delay_secs),
            retry_attempts: config.scraper.retry_attempts,
            retry_delay: Duration::from_millis(config.scraper.retry_delay_ms),
            reload_watchlist: config.monitor.reload_watchlist,
        }
    }
}

impl Default for MonitorSettings {
    fn default() -> Self {
        Self::from_config(&AppConfig::default())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct MonitorStats {
    pub cycles: u64,
    pub checks: u64,
    pub available: u64,
    pub unavailable: u64,
    pub unknown: u64,
    pub errors: u64,
    pub restocks: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckOutcome {
    Available { price: Option<String> },
    Unavailable { price: Option<String> },
    Unknown { note: Option<String> },
    /// The page could not be fetched or classified. Item state was left as it was.
    Failed { error: String },
}

#[derive(Debug, Clone)]
pub struct ItemCheck {
    pub item: WatchItem,
    pub outcome: CheckOutcome,
    pub restock: Option<RestockEvent>,
}

#[derive(Debug, Clone, Default)]
pub struct CycleReport {
    pub checks: Vec<ItemCheck>,
    pub cancelled: bool,
}

impl CycleReport {
    pub fn restocks(&self) -> impl Iterator<Item = &RestockEvent> {
        self.checks.iter().filter_map(|check| check.restock.as_ref())
    }
}

/// Polls every watched item once per cycle, sequentially, and alerts on restocks.
pub struct StockMonitor {
    watchlist: Watchlist,
    fetcher: Arc<dyn PageFetcher>,
    registry: DetectorRegistry,
    tracker: ItemStateTracker,
    dispatcher: AlertDispatcher,
    settings: MonitorSettings,
    stats: MonitorStats,
    pending: Vec<DispatchHandle>,
}

impl StockMonitor {
    pub fn new(
        watchlist: Watchlist,
        fetcher: Arc<dyn PageFetcher>,
        registry: DetectorRegistry,
        dispatcher: AlertDispatcher,
        settings: MonitorSettings,
    ) -> Self {
        Self {
            watchlist,
            fetcher,
            registry,
            tracker: ItemStateTracker::new(),
            dispatcher,
            settings,
            stats: MonitorStats::default(),
            pending: Vec::new(),
        }
    }

    pub fn watchlist(&self) -> &Watchlist {
        &self.watchlist
    }

    pub fn tracker(&self) -> &ItemStateTracker {
        &self.tracker
    }

    pub fn stats(&self) -> &MonitorStats {
        &self.stats
    }

    /// Run cycles until `token` is cancelled, then wait for in-flight alerts.
    ///
    /// Only an unreadable watchlist ends the loop with an error.
    pub async fn run(&mut self, token: CancellationToken) -> Result<()> {
        let result = self.run_until_cancelled(&token).await;
        self.flush_alerts().await;
        result
    }

    async fn run_until_cancelled(&mut self, token: &CancellationToken) -> Result<()> {
        while !token.is_cancelled() {
            self.refresh_watchlist()?;

            let report = self.run_cycle(token).await;
            if report.cancelled {
                break;
            }

            tracing::info!(
                "⏳ Next check in {} seconds... (Ctrl+C to stop)",
                self.settings.check_interval.as_secs()
            );
            if sleep_or_cancel(token, self.settings.check_interval).await {
                break;
            }
        }

        Ok(())
    }

    /// One pass over the watchlist in order. Stops early, without error, once `token` is cancelled.
    pub async fn run_cycle(&mut self, token: &CancellationToken) -> CycleReport {
        let items = self.watchlist.items().to_vec();
        let mut report = CycleReport::default();

        for (index, item) in items.iter().enumerate() {
            if token.is_cancelled() {
                report.cancelled = true;
                break;
            }
            if index > 0 && !self.settings.item_delay.is_zero() && sleep_or_cancel(token, self.settings.item_delay).await {
                report.cancelled = true;
                break;
            }

            report.checks.push(self.check_item(item).await);
        }

        self.stats.cycles += 1;
        self.pending.retain(|handle| !handle.is_finished());
        self.log_cycle(&report);
        report
    }

    /// Fetch, classify and track a single item, dispatching alerts for a restock.
    pub async fn check_item(&mut self, item: &WatchItem) -> ItemCheck {
        tracing::info!("Checking: {} - {}", item.store_name(), item.display_name);
        self.stats.checks += 1;

        let verdict = match self.fetch(&item.url).await {
            FetchResult::Content(body) => self.registry.detect(item.source, &body).map_err(|e| e.to_string()),
            failure => Err(failure.to_string()),
        };

        let verdict = match verdict {
            Ok(verdict) => verdict,
            Err(error) => {
                self.stats.errors += 1;
                tracing::warn!("ERROR: {} - {} - {}", item.store_name(), item.display_name, error);
                return ItemCheck {
                    item: item.clone(),
                    outcome: CheckOutcome::Failed { error },
                    restock: None,
                };
            }
        };

        let outcome = match verdict.status {
            StockStatus::Available => {
                self.stats.available += 1;
                tracing::info!("   ✅ IN STOCK!");
                CheckOutcome::Available { price: verdict.price.clone() }
            }
            StockStatus::Unavailable => {
                self.stats.unavailable += 1;
                tracing::info!("   ❌ Out of stock");
                CheckOutcome::Unavailable { price: verdict.price.clone() }
            }
            StockStatus::Unknown => {
                self.stats.unknown += 1;
                tracing::info!(
                    "   ❓ Unknown: {}",
                    verdict.note.as_deref().unwrap_or("no signal on page")
                );
                CheckOutcome::Unknown { note: verdict.note.clone() }
            }
        };
        if let Some(price) = &verdict.price {
            tracing::info!("   💰 Price: {}", price);
        }

        let restock = self.tracker.observe(item, &verdict);
        if let Some(event) = &restock {
            self.stats.restocks += 1;
            self.pending.push(self.dispatcher.dispatch(event));
        }

        ItemCheck {
            item: item.clone(),
            outcome,
            restock,
        }
    }

    /// Wait for every alert dispatched so far. Each sink is already bounded by its timeout.
    pub async fn flush_alerts(&mut self) -> Vec<SinkOutcome> {
        let mut outcomes = Vec::new();
        for handle in self.pending.drain(..) {
            outcomes.extend(handle.wait().await);
        }
        outcomes
    }

    async fn fetch(&self, url: &str) -> FetchResult {
        if self.settings.retry_attempts == 0 {
            return self.fetcher.fetch(url).await;
        }

        let strategy = FixedInterval::new(self.settings.retry_delay).take(self.settings.retry_attempts as usize);
        let attempt = || {
            let fetcher = self.fetcher.clone();
            let url = url.to_string();
            async move {
                match fetcher.fetch(&url).await {
                    FetchResult::Content(body) => Ok(body),
                    failure => {
                        if failure.is_transient() {
                            tracing::debug!("Retrying {} after {}", url, failure);
                        }
                        Err(failure)
                    }
                }
            }
        };

        match RetryIf::spawn(strategy, attempt, FetchResult::is_transient).await {
            Ok(body) => FetchResult::Content(body),
            Err(failure) => failure,
        }
    }

    fn refresh_watchlist(&mut self) -> Result<()> {
        if !self.settings.reload_watchlist || !self.watchlist.refresh()? {
            return Ok(());
        }

        let removed = self.tracker.retain_items(self.watchlist.items());
        tracing::info!(
            target: JOURNAL_TARGET,
            "Watchlist reloaded: {} item(s), {} dropped",
            self.watchlist.len(),
            removed
        );
        for item in self.watchlist.items() {
            if let Some(store) = foreign_store_mention(&item.url) {
                tracing::warn!("{} mentions {} but is checked as {}", item.url, store, item.store_name());
            }
        }
        Ok(())
    }

    fn log_cycle(&self, report: &CycleReport) {
        let stats = &self.stats;
        tracing::info!(
            "Cycle {} complete: {} checked, {} restock(s) | totals: {} checks, {} in stock, {} out of stock, {} unknown, {} errors, {} restocks",
            stats.cycles,
            report.checks.len(),
            report.restocks().count(),
            stats.checks,
            stats.available,
            stats.unavailable,
            stats.unknown,
            stats.errors,
            stats.restocks
        );
    }
}

/// Returns true if cancelled before `duration` elapsed.
async fn sleep_or_cancel(token: &CancellationToken, duration: Duration) -> bool {
    tokio::select! {
        _ = token.cancelled() => true,
        _ = tokio::time::sleep(duration) => false,
    }
}
