use std::time::Duration;

use restock_watcher::scraper::{FetchResult, HttpFetcher, PageFetcher, DEFAULT_USER_AGENT};
use wiremock::matchers::{header, header_exists, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::test_fetcher;

#[tokio::test]
async fn fetcher_returns_page_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/product"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>Add to Cart</html>"))
        .mount(&server)
        .await;

    let result = test_fetcher().fetch(&format!("{}/product", server.uri())).await;
    assert_eq!(result, FetchResult::Content("<html>Add to Cart</html>".to_string()));
}

#[tokio::test]
async fn fetcher_sends_browser_identity() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(header_exists("user-agent"))
        .and(header("upgrade-insecure-requests", "1"))
        .and(header_exists("accept"))
        .and(header_exists("accept-language"))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .expect(1)
        .mount(&server)
        .await;

    let result = test_fetcher().fetch(&server.uri()).await;
    assert!(matches!(result, FetchResult::Content(_)));
}

#[tokio::test]
async fn fetcher_maps_non_ok_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_string("not here"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/throttled"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let fetcher = test_fetcher();
    assert_eq!(
        fetcher.fetch(&format!("{}/missing", server.uri())).await,
        FetchResult::HttpError(404)
    );
    let throttled = fetcher.fetch(&format!("{}/throttled", server.uri())).await;
    assert_eq!(throttled, FetchResult::HttpError(429));
    assert!(throttled.is_transient());
}

#[tokio::test]
async fn fetcher_treats_other_success_codes_as_errors() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    assert_eq!(test_fetcher().fetch(&server.uri()).await, FetchResult::HttpError(204));
}

#[tokio::test]
async fn fetcher_times_out_as_network_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("late")
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let fetcher = HttpFetcher::with_settings(DEFAULT_USER_AGENT, Duration::from_millis(200)).unwrap();
    let result = fetcher.fetch(&server.uri()).await;
    assert!(matches!(result, FetchResult::NetworkError(_)));
}
