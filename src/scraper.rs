use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, UPGRADE_INSECURE_REQUESTS};
use reqwest::StatusCode;
use std::fmt;
use std::time::{Duration, Instant};

use crate::config::ScraperConfig;
use crate::Result;

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Outcome of one GET. Failures are values, not errors: the caller decides what they mean.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchResult {
    Content(String),
    NetworkError(String),
    HttpError(u16),
}

impl FetchResult {
    /// Worth retrying within the same poll: connection trouble, throttling, server errors.
    pub fn is_transient(&self) -> bool {
        match self {
            FetchResult::Content(_) => false,
            FetchResult::NetworkError(_) => true,
            FetchResult::HttpError(status) => *status == 429 || (500..600).contains(status),
        }
    }
}

impl fmt::Display for FetchResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchResult::Content(body) => write!(f, "{} bytes", body.len()),
            FetchResult::NetworkError(detail) => write!(f, "network error: {detail}"),
            FetchResult::HttpError(status) => write!(f, "HTTP {status}"),
        }
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> FetchResult;
}

/// Fetches pages with a desktop browser identity and a bounded timeout. Never retries.
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(config: &ScraperConfig) -> Result<Self> {
        Self::with_settings(&config.user_agent, Duration::from_secs(config.request_timeout_secs))
    }

    pub fn with_settings(user_agent: &str, timeout: Duration) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8"),
        );
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.5"));
        headers.insert(UPGRADE_INSECURE_REQUESTS, HeaderValue::from_static("1"));

        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .default_headers(headers)
            .timeout(timeout)
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> FetchResult {
        let start_time = Instant::now();

        let response = match self.client.get(url).send().await {
            Ok(response) => response,
            Err(e) => return FetchResult::NetworkError(e.to_string()),
        };

        let status = response.status();
        if status != StatusCode::OK {
            tracing::debug!("GET {} returned {}", url, status);
            return FetchResult::HttpError(status.as_u16());
        }

        match response.text().await {
            Ok(body) => {
                tracing::debug!(
                    "GET {} returned {} bytes in {}ms",
                    url,
                    body.len(),
                    start_time.elapsed().as_millis()
                );
                FetchResult::Content(body)
            }
            Err(e) => FetchResult::NetworkError(e.to_string()),
        }
    }
}
