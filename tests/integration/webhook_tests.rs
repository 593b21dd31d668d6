use chrono::{TimeZone, Utc};
use serde_json::Value;
use std::time::Duration;

use restock_watcher::models::{RestockEvent, WatchItem};
use restock_watcher::plugins::notifiers::DiscordSink;
use restock_watcher::plugins::AlertSink;
use restock_watcher::AppError;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn event() -> RestockEvent {
    RestockEvent::new(
        WatchItem::new("https://www.bestbuy.com/site/surging-sparks-booster-bundle/6789012.p"),
        Some("$26.94".to_string()),
        Utc.with_ymd_and_hms(2026, 5, 1, 18, 0, 0).unwrap(),
    )
}

#[tokio::test]
async fn webhook_receives_embed_payload() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/webhooks/1/token"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let sink = DiscordSink::new(
        format!("{}/api/webhooks/1/token", server.uri()),
        Some("Restock Bot".to_string()),
        Duration::from_secs(2),
    )
    .unwrap();
    tokio_test::assert_ok!(sink.notify(&event()).await);

    let requests = server.received_requests().await.unwrap();
    let payload: Value = serde_json::from_slice(&requests[0].body).unwrap();

    assert_eq!(payload["content"], "🚨 **IN STOCK!**");
    assert_eq!(payload["username"], "Restock Bot");
    let embed = &payload["embeds"][0];
    assert_eq!(embed["title"], "Best Buy - Surging Sparks Booster Bundle");
    assert_eq!(embed["url"], "https://www.bestbuy.com/site/surging-sparks-booster-bundle/6789012.p");
    assert_eq!(embed["color"], 3066993);
    assert_eq!(embed["fields"][0]["value"], "$26.94");
    assert_eq!(embed["fields"][1]["value"], "Best Buy");
    assert_eq!(embed["timestamp"], "2026-05-01T18:00:00+00:00");
}

#[tokio::test]
async fn webhook_rejection_is_a_sink_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(400))
        .mount(&server)
        .await;

    let sink = DiscordSink::new(server.uri(), None, Duration::from_secs(2)).unwrap();
    let result = sink.notify(&event()).await;

    assert!(matches!(result, Err(AppError::Sink { .. })));
}

#[tokio::test]
async fn slow_webhook_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(204).set_delay(Duration::from_secs(3)))
        .mount(&server)
        .await;

    let sink = DiscordSink::new(server.uri(), None, Duration::from_millis(200)).unwrap();
    let result = sink.notify(&event()).await;

    assert!(matches!(result, Err(AppError::Http(_))));
}
