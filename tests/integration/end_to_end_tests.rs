use std::sync::Arc;
use std::time::Duration;

use restock_watcher::models::{SourceKind, WatchItem};
use restock_watcher::plugins::notifiers::HistorySink;
use restock_watcher::plugins::{AlertDispatcher, DetectorRegistry};
use restock_watcher::scheduler::{CheckOutcome, StockMonitor};
use restock_watcher::watchlist::load_watchlist;
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::{test_fetcher, test_monitor, test_settings, RecordingSink};

const SOLD_OUT_PAGE: &str = "<html><body><h1>Elite Trainer Box</h1><p>Sold out</p></body></html>";
const IN_STOCK_PAGE: &str = r#"<html><body>
    <h1>Elite Trainer Box</h1>
    <span class="price">$24.99</span>
    <button>Add to cart</button>
</body></html>"#;

async fn mount_sold_out_then_in_stock(server: &MockServer, route: &str) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_string(SOLD_OUT_PAGE))
        .up_to_n_times(1)
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_string(IN_STOCK_PAGE))
        .mount(server)
        .await;
}

#[tokio::test]
async fn restock_alerts_once_per_transition() {
    let server = MockServer::start().await;
    mount_sold_out_then_in_stock(&server, "/product/elite-trainer-box").await;

    let url = format!("{}/product/elite-trainer-box", server.uri());
    assert_eq!(WatchItem::new(url.as_str()).source, SourceKind::Generic);

    let (mut monitor, sink) = test_monitor(&[url.clone()]);
    let token = CancellationToken::new();

    // First poll: sold out, no event.
    let first = monitor.run_cycle(&token).await;
    assert!(matches!(first.checks[0].outcome, CheckOutcome::Unavailable { .. }));
    assert_eq!(first.restocks().count(), 0);

    // Second poll: add to cart with a price, one event.
    let second = monitor.run_cycle(&token).await;
    assert_eq!(
        second.checks[0].outcome,
        CheckOutcome::Available { price: Some("$24.99".to_string()) }
    );
    assert_eq!(second.restocks().count(), 1);

    // Third poll: identical content, no new event.
    let third = monitor.run_cycle(&token).await;
    assert_eq!(third.restocks().count(), 0);

    monitor.flush_alerts().await;
    let events = sink.events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].url(), url);
    assert_eq!(events[0].price.as_deref(), Some("$24.99"));
    assert_eq!(events[0].product_name(), "Elite Trainer Box");
}

#[tokio::test]
async fn unreachable_item_does_not_block_others() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/broken-product"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/working-product"))
        .respond_with(ResponseTemplate::new(200).set_body_string(IN_STOCK_PAGE))
        .mount(&server)
        .await;

    let urls = vec![
        format!("{}/broken-product", server.uri()),
        format!("{}/working-product", server.uri()),
    ];
    let (mut monitor, sink) = test_monitor(&urls);

    let report = monitor.run_cycle(&CancellationToken::new()).await;
    monitor.flush_alerts().await;

    assert!(matches!(report.checks[0].outcome, CheckOutcome::Failed { .. }));
    assert!(matches!(report.checks[1].outcome, CheckOutcome::Available { .. }));
    assert!(monitor.tracker().state(&urls[0]).is_none());
    assert_eq!(sink.events().len(), 1);
}

#[tokio::test]
async fn restock_is_written_to_history_file() {
    let server = MockServer::start().await;
    mount_sold_out_then_in_stock(&server, "/product/booster-bundle").await;

    let dir = tempfile::tempdir().unwrap();
    let watchlist_path = dir.path().join("watchlist.txt");
    let history_path = dir.path().join("restock_history.json");
    std::fs::write(
        &watchlist_path,
        format!("# cards\n\n{}/product/booster-bundle\n", server.uri()),
    )
    .unwrap();

    let recorder = Arc::new(RecordingSink::default());
    let mut dispatcher = AlertDispatcher::new(Duration::from_secs(2));
    dispatcher.add_sink(Arc::new(HistorySink::new(&history_path)));
    dispatcher.add_sink(recorder.clone());

    let mut monitor = StockMonitor::new(
        load_watchlist(&watchlist_path).unwrap(),
        Arc::new(test_fetcher()),
        DetectorRegistry::with_default_detectors(),
        dispatcher,
        test_settings(),
    );

    let token = CancellationToken::new();
    monitor.run_cycle(&token).await;
    monitor.run_cycle(&token).await;
    let outcomes = monitor.flush_alerts().await;

    assert_eq!(outcomes.len(), 2);
    assert!(outcomes.iter().all(|outcome| outcome.is_success()));

    let history: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&history_path).unwrap()).unwrap();
    let records = history.as_array().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["store"], "Generic");
    assert_eq!(records[0]["product"], "Booster Bundle");
    assert_eq!(records[0]["price"], "$24.99");
    assert_eq!(recorder.events().len(), 1);
}
