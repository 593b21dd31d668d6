use futures::future::join_all;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

use super::notifiers::{
    BrowserSink, ConsoleSink, DesktopSink, DiscordSink, HistorySink, LogSink, SoundSink,
};
use super::traits::AlertSink;
use crate::config::AppConfig;
use crate::models::RestockEvent;
use crate::Result;

pub type SinkRef = Arc<dyn AlertSink>;

/// What happened to one sink for one event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SinkOutcome {
    pub sink: String,
    pub error: Option<String>,
}

impl SinkOutcome {
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// In-flight deliveries of one event, one task per sink.
pub struct DispatchHandle {
    tasks: Vec<(String, JoinHandle<SinkOutcome>)>,
}

impl DispatchHandle {
    pub fn is_finished(&self) -> bool {
        self.tasks.iter().all(|(_, task)| task.is_finished())
    }

    pub async fn wait(self) -> Vec<SinkOutcome> {
        let (names, tasks): (Vec<String>, Vec<_>) = self.tasks.into_iter().unzip();

        join_all(tasks)
            .await
            .into_iter()
            .zip(names)
            .map(|(joined, sink)| match joined {
                Ok(outcome) => outcome,
                Err(e) => SinkOutcome {
                    sink,
                    error: Some(format!("sink task failed: {e}")),
                },
            })
            .collect()
    }
}

/// Fans a restock event out to every enabled sink.
///
/// Sinks run concurrently, each bounded by `sink_timeout`. A failing, slow or panicking sink
/// affects neither the other sinks nor the caller.
pub struct AlertDispatcher {
    sinks: Vec<SinkRef>,
    sink_timeout: Duration,
}

impl AlertDispatcher {
    pub fn new(sink_timeout: Duration) -> Self {
        Self {
            sinks: Vec::new(),
            sink_timeout,
        }
    }

    /// Console, log and history always; the rest as configured.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let alerts = &config.alerts;
        let mut dispatcher = Self::new(Duration::from_secs(alerts.sink_timeout_secs));

        dispatcher.add_sink(Arc::new(ConsoleSink::new()));
        dispatcher.add_sink(Arc::new(LogSink::new()));
        dispatcher.add_sink(Arc::new(HistorySink::new(&config.storage.history_path)));

        if alerts.play_sound {
            dispatcher.add_sink(Arc::new(SoundSink::new()));
        }
        if alerts.desktop_notifications {
            dispatcher.add_sink(Arc::new(DesktopSink::new()));
        }
        if alerts.auto_open_browser {
            dispatcher.add_sink(Arc::new(BrowserSink::new(Duration::from_secs(
                alerts.browser_delay_secs,
            ))));
        }
        if let Some(discord) = DiscordSink::from_config(&config.notifications.discord)? {
            dispatcher.add_sink(Arc::new(discord));
        }

        Ok(dispatcher)
    }

    pub fn add_sink(&mut self, sink: SinkRef) {
        tracing::debug!("Registering alert sink: {}", sink.name());
        self.sinks.push(sink);
    }

    pub fn sink_names(&self) -> Vec<String> {
        self.sinks.iter().map(|sink| sink.name().to_string()).collect()
    }

    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }

    /// Start delivering `event` and return immediately. Must be called within a Tokio runtime.
    pub fn dispatch(&self, event: &RestockEvent) -> DispatchHandle {
        let event = Arc::new(event.clone());

        let tasks = self
            .sinks
            .iter()
            .map(|sink| {
                let name = sink.name().to_string();
                let task = tokio::spawn(deliver(
                    sink.clone(),
                    event.clone(),
                    self.sink_timeout,
                ));
                (name, task)
            })
            .collect();

        DispatchHandle { tasks }
    }
}

async fn deliver(sink: SinkRef, event: Arc<RestockEvent>, limit: Duration) -> SinkOutcome {
    let name = sink.name().to_string();

    let error = match tokio::time::timeout(limit, sink.notify(&event)).await {
        Ok(Ok(())) => None,
        Ok(Err(e)) => Some(e.to_string()),
        Err(_) => Some(format!("timed out after {}s", limit.as_secs_f32())),
    };

    if let Some(error) = &error {
        tracing::warn!("ERROR: alert sink {} failed for {}: {}", name, event.url(), error);
    }

    SinkOutcome { sink: name, error }
}
