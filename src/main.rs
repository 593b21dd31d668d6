use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use restock_watcher::config::AppConfig;
use restock_watcher::models::foreign_store_mention;
use restock_watcher::plugins::{AlertDispatcher, DetectorRegistry};
use restock_watcher::scheduler::{MonitorSettings, StockMonitor};
use restock_watcher::scraper::HttpFetcher;
use restock_watcher::utils::telemetry::{self, JOURNAL_TARGET};
use restock_watcher::watchlist::load_watchlist;

#[derive(Debug, Parser)]
#[command(name = "restock-watcher", version, about = "Watches product pages and alerts when they come back in stock")]
struct Cli {
    /// Configuration file (defaults to config/default.toml when present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Watchlist file, overriding monitor.watchlist_path
    #[arg(long)]
    watchlist: Option<PathBuf>,

    /// Check every item once, wait for alerts to finish, then exit
    #[arg(long)]
    once: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    dotenvy::dotenv().ok();

    let mut config = AppConfig::load(cli.config.as_deref())?;
    if let Some(path) = cli.watchlist {
        config.monitor.watchlist_path = path;
    }

    let _guard = telemetry::init_tracing(&config.storage.log_path)?;

    let rule = "=".repeat(60);
    println!("\n{rule}\n🛒 RESTOCK WATCHER - STARTING\n{rule}");

    let watchlist = load_watchlist(&config.monitor.watchlist_path)?;
    if watchlist.is_empty() {
        println!(
            "\n❌ No products in watchlist. Add URLs to {}",
            config.monitor.watchlist_path.display()
        );
        return Ok(());
    }
    for item in watchlist.items() {
        if let Some(store) = foreign_store_mention(&item.url) {
            warn!("{} mentions {} but is checked as {}", item.url, store, item.store_name());
        }
    }

    let fetcher = Arc::new(HttpFetcher::new(&config.scraper)?);
    let dispatcher = AlertDispatcher::from_config(&config)?;

    println!("\n🔍 Monitoring {} product(s)", watchlist.len());
    println!("⏰ Check interval: {} seconds", config.monitor.check_interval_secs);
    println!("🔔 Alerts: {}", dispatcher.sink_names().join(", "));
    println!(
        "🚀 Auto-open: {}",
        if config.alerts.auto_open_browser { "Enabled" } else { "Disabled" }
    );

    let mut monitor = StockMonitor::new(
        watchlist,
        fetcher,
        DetectorRegistry::with_default_detectors(),
        dispatcher,
        MonitorSettings::from_config(&config),
    );

    let token = CancellationToken::new();
    let shutdown = token.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("🛑 Monitor stopped by user");
            shutdown.cancel();
        }
    });

    info!(target: JOURNAL_TARGET, "=== Monitor Started ===");

    let result = if cli.once {
        monitor.run_cycle(&token).await;
        monitor.flush_alerts().await;
        Ok(())
    } else {
        monitor.run(token).await
    };

    match result {
        Ok(()) => {
            info!(target: JOURNAL_TARGET, "=== Monitor Stopped ===");
            Ok(())
        }
        Err(e) => {
            error!(target: JOURNAL_TARGET, "FATAL ERROR: {}", e);
            Err(e.into())
        }
    }
}
