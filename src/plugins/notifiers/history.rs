use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

use crate::models::RestockEvent;
use crate::plugins::traits::AlertSink;
use crate::utils::error::{AppError, Result};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HistoryRecord {
    pub timestamp: DateTime<Utc>,
    pub store: String,
    pub product: String,
    pub url: String,
    pub price: Option<String>,
}

impl From<&RestockEvent> for HistoryRecord {
    fn from(event: &RestockEvent) -> Self {
        Self {
            timestamp: event.timestamp,
            store: event.store_name().to_string(),
            product: event.product_name().to_string(),
            url: event.url().to_string(),
            price: event.price.clone(),
        }
    }
}

/// Appends each event to a pretty-printed JSON array on disk.
///
/// A file that exists but is not a JSON array is moved aside to `<name>.corrupt` and a fresh
/// list is started in its place.
pub struct HistorySink {
    path: PathBuf,
    lock: Mutex<()>,
}

impl HistorySink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_entries(&self) -> Result<Vec<serde_json::Value>> {
        let contents = match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        if contents.trim().is_empty() {
            return Ok(Vec::new());
        }

        match serde_json::from_str(&contents) {
            Ok(entries) => Ok(entries),
            Err(e) => {
                let backup = self.corrupt_path();
                tracing::warn!(
                    "{} is not a JSON array ({}); moving it to {} and starting a new history",
                    self.path.display(),
                    e,
                    backup.display()
                );
                tokio::fs::rename(&self.path, &backup).await.map_err(|e| {
                    AppError::sink("history", format!("failed to move aside {}: {e}", self.path.display()))
                })?;
                Ok(Vec::new())
            }
        }
    }

    fn corrupt_path(&self) -> PathBuf {
        let mut name = self.path.clone().into_os_string();
        name.push(".corrupt");
        PathBuf::from(name)
    }
}

#[async_trait]
impl AlertSink for HistorySink {
    fn name(&self) -> &str {
        "History"
    }

    fn sink_type(&self) -> &str {
        "history"
    }

    async fn notify(&self, event: &RestockEvent) -> Result<()> {
        let _guard = self.lock.lock().await;

        let mut entries = self.read_entries().await?;
        entries.push(serde_json::to_value(HistoryRecord::from(event))?);

        let serialized = serde_json::to_string_pretty(&entries)?;
        tokio::fs::write(&self.path, serialized).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::WatchItem;
    use std::sync::Arc;

    fn event(url: &str, price: Option<&str>) -> RestockEvent {
        RestockEvent::new(WatchItem::new(url), price.map(str::to_string), Utc::now())
    }

    async fn read_records(path: &Path) -> Vec<HistoryRecord> {
        let contents = tokio::fs::read_to_string(path).await.unwrap();
        serde_json::from_str(&contents).unwrap()
    }

    #[tokio::test]
    async fn test_creates_file_and_appends() {
        let dir = tempfile::tempdir().unwrap();
        let sink = HistorySink::new(dir.path().join("restock_history.json"));

        sink.notify(&event("https://www.bestbuy.com/site/booster-bundle/1.p", Some("$26.94")))
            .await
            .unwrap();
        sink.notify(&event("https://shop.example.org/elite-box", None)).await.unwrap();

        let records = read_records(sink.path()).await;
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].store, "Best Buy");
        assert_eq!(records[0].product, "Booster Bundle");
        assert_eq!(records[0].price.as_deref(), Some("$26.94"));
        assert_eq!(records[1].store, "Generic");
        assert!(records[1].price.is_none());
    }

    #[tokio::test]
    async fn test_file_is_pretty_printed() {
        let dir = tempfile::tempdir().unwrap();
        let sink = HistorySink::new(dir.path().join("history.json"));
        sink.notify(&event("https://shop.example.org/elite-box", None)).await.unwrap();

        let contents = tokio::fs::read_to_string(sink.path()).await.unwrap();
        assert!(contents.starts_with("[\n"));
        assert!(contents.contains("  {"));
    }

    #[tokio::test]
    async fn test_corrupt_file_starts_fresh_history() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.json");
        tokio::fs::write(&path, "{not json").await.unwrap();

        let sink = HistorySink::new(&path);
        sink.notify(&event("https://shop.example.org/elite-box", Some("$59.99")))
            .await
            .unwrap();

        let records = read_records(&path).await;
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].url, "https://shop.example.org/elite-box");

        let backup = dir.path().join("history.json.corrupt");
        assert_eq!(tokio::fs::read_to_string(&backup).await.unwrap(), "{not json");

        sink.notify(&event("https://shop.example.org/second-box", None)).await.unwrap();
        assert_eq!(read_records(&path).await.len(), 2);
    }

    #[tokio::test]
    async fn test_non_array_json_starts_fresh_history() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.json");
        tokio::fs::write(&path, r#"{"store": "Target"}"#).await.unwrap();

        let sink = HistorySink::new(&path);
        sink.notify(&event("https://shop.example.org/elite-box", None)).await.unwrap();

        assert_eq!(read_records(&path).await.len(), 1);
    }

    #[tokio::test]
    async fn test_concurrent_appends_are_serialized() {
        let dir = tempfile::tempdir().unwrap();
        let sink = Arc::new(HistorySink::new(dir.path().join("history.json")));

        let tasks: Vec<_> = (0..8)
            .map(|i| {
                let sink = sink.clone();
                tokio::spawn(async move {
                    sink.notify(&event(&format!("https://shop.example.org/product-{i}"), None))
                        .await
                })
            })
            .collect();
        for task in tasks {
            task.await.unwrap().unwrap();
        }

        assert_eq!(read_records(sink.path()).await.len(), 8);
    }
}
