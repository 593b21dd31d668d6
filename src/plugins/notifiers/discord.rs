use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;
use std::time::Duration;

use crate::config::DiscordConfig;
use crate::models::RestockEvent;
use crate::plugins::traits::AlertSink;
use crate::utils::error::{AppError, Result};

const EMBED_COLOR: u32 = 3066993; // green

pub struct DiscordSink {
    client: Client,
    webhook_url: String,
    username: Option<String>,
}

impl DiscordSink {
    pub fn new(webhook_url: impl Into<String>, username: Option<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(DiscordSink {
            client,
            webhook_url: webhook_url.into(),
            username,
        })
    }

    /// `None` when no webhook is configured.
    pub fn from_config(config: &DiscordConfig) -> Result<Option<Self>> {
        match config.webhook() {
            Some(url) => Ok(Some(Self::new(
                url,
                config.username.clone(),
                Duration::from_secs(config.timeout_secs),
            )?)),
            None => Ok(None),
        }
    }

    fn create_embed(&self, event: &RestockEvent) -> serde_json::Value {
        json!({
            "title": format!("{} - {}", event.store_name(), event.product_name()),
            "url": event.url(),
            "color": EMBED_COLOR,
            "fields": [
                {
                    "name": "Price",
                    "value": event.price_or_unknown(),
                    "inline": true
                },
                {
                    "name": "Store",
                    "value": event.store_name(),
                    "inline": true
                }
            ],
            "timestamp": event.timestamp.to_rfc3339()
        })
    }

    fn create_webhook_payload(&self, event: &RestockEvent) -> serde_json::Value {
        let mut payload = json!({
            "content": "🚨 **IN STOCK!**",
            "embeds": [self.create_embed(event)]
        });

        if let Some(username) = &self.username {
            payload["username"] = json!(username);
        }

        payload
    }
}

#[async_trait]
impl AlertSink for DiscordSink {
    fn name(&self) -> &str {
        "Discord Webhook"
    }

    fn sink_type(&self) -> &str {
        "discord"
    }

    async fn notify(&self, event: &RestockEvent) -> Result<()> {
        let payload = self.create_webhook_payload(event);

        let response = self
            .client
            .post(&self.webhook_url)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(AppError::sink(self.sink_type(), format!("webhook returned {status}")))
        }
    }
}
