use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use url::Url;

use crate::scraper::DEFAULT_USER_AGENT;

/// Shortest allowed pause between polling cycles.
pub const MIN_CHECK_INTERVAL_SECS: u64 = 30;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub monitor: MonitorConfig,
    pub scraper: ScraperConfig,
    pub alerts: AlertsConfig,
    pub notifications: NotificationsConfig,
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorConfig {
    pub check_interval_secs: u64,
    pub item_delay_secs: u64,
    pub watchlist_path: PathBuf,
    pub reload_watchlist: bool,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            check_interval_secs: 60,
            item_delay_secs: 2,
            watchlist_path: PathBuf::from("watchlist.txt"),
            reload_watchlist: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScraperConfig {
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub retry_attempts: u32,
    pub retry_delay_ms: u64,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            request_timeout_secs: 10,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            retry_attempts: 0,
            retry_delay_ms: 2000,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AlertsConfig {
    pub play_sound: bool,
    pub auto_open_browser: bool,
    pub browser_delay_secs: u64,
    pub desktop_notifications: bool,
    pub sink_timeout_secs: u64,
}

impl Default for AlertsConfig {
    fn default() -> Self {
        Self {
            play_sound: true,
            auto_open_browser: true,
            browser_delay_secs: 3,
            desktop_notifications: true,
            sink_timeout_secs: 15,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationsConfig {
    pub discord: DiscordConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscordConfig {
    pub webhook_url: Option<String>,
    pub username: Option<String>,
    pub timeout_secs: u64,
}

impl Default for DiscordConfig {
    fn default() -> Self {
        Self {
            webhook_url: None,
            username: None,
            timeout_secs: 5,
        }
    }
}

impl DiscordConfig {
    /// The configured webhook, treating an empty string as disabled.
    pub fn webhook(&self) -> Option<&str> {
        self.webhook_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub history_path: PathBuf,
    pub log_path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            history_path: PathBuf::from("restock_history.json"),
            log_path: PathBuf::from("stock_log.txt"),
        }
    }
}

impl AppConfig {
    /// Defaults, then `config/default.toml` (or `path`), then `RESTOCK__*` environment variables.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let builder = match path {
            Some(path) => Config::builder().add_source(File::from(path).required(true)),
            None => Config::builder().add_source(File::with_name("config/default").required(false)),
        };

        Self::from_builder(
            builder.add_source(
                Environment::with_prefix("RESTOCK")
                    .separator("__")
                    .try_parsing(true),
            ),
        )
    }

    /// Parse a TOML document on top of the defaults, without consulting the environment.
    pub fn from_toml_str(toml: &str) -> Result<Self, ConfigError> {
        Self::from_builder(Config::builder().add_source(File::from_str(toml, FileFormat::Toml)))
    }

    fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Self, ConfigError> {
        let config: AppConfig = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.monitor.check_interval_secs < MIN_CHECK_INTERVAL_SECS {
            return Err(ConfigError::Message(format!(
                "monitor.check_interval_secs must be at least {MIN_CHECK_INTERVAL_SECS}"
            )));
        }

        if self.scraper.request_timeout_secs == 0 {
            return Err(ConfigError::Message(
                "scraper.request_timeout_secs must be greater than 0".into(),
            ));
        }

        if self.alerts.sink_timeout_secs == 0 {
            return Err(ConfigError::Message(
                "alerts.sink_timeout_secs must be greater than 0".into(),
            ));
        }

        if self.alerts.auto_open_browser
            && self.alerts.sink_timeout_secs <= self.alerts.browser_delay_secs
        {
            return Err(ConfigError::Message(
                "alerts.sink_timeout_secs must exceed alerts.browser_delay_secs".into(),
            ));
        }

        if let Some(webhook) = self.notifications.discord.webhook() {
            match Url::parse(webhook) {
                Ok(url) if matches!(url.scheme(), "http" | "https") => {}
                _ => {
                    return Err(ConfigError::Message(
                        "Invalid notifications.discord.webhook_url".into(),
                    ));
                }
            }
        }

        Ok(())
    }
}
