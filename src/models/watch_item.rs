use serde::{Deserialize, Serialize};
use url::Url;

use crate::models::source::{classify, SourceKind};

const MAX_DISPLAY_NAME_CHARS: usize = 50;

/// One tracked product page. The URL is the identity; everything else is derived from it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WatchItem {
    pub url: String,
    pub source: SourceKind,
    pub display_name: String,
}

impl WatchItem {
    pub fn new(url: impl Into<String>) -> Self {
        let url = url.into();
        Self {
            source: classify(&url),
            display_name: derive_display_name(&url),
            url,
        }
    }

    pub fn id(&self) -> &str {
        &self.url
    }

    pub fn store_name(&self) -> &'static str {
        self.source.store_name()
    }
}

/// Best-effort product name from the URL path: the last segment that looks like a slug.
pub fn derive_display_name(url: &str) -> String {
    let (host, path) = match Url::parse(url) {
        Ok(parsed) => (
            parsed.host_str().map(str::to_owned),
            parsed.path().to_string(),
        ),
        Err(_) => (None, url.to_string()),
    };

    let slug = path
        .split('/')
        .rev()
        .map(strip_extension)
        .find(|segment| looks_like_slug(segment));

    match slug {
        Some(segment) => title_case(&segment.replace(['-', '_'], " "))
            .chars()
            .take(MAX_DISPLAY_NAME_CHARS)
            .collect(),
        None => host.unwrap_or_else(|| "Unnamed product".to_string()),
    }
}

fn strip_extension(segment: &str) -> &str {
    match segment.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()) => stem,
        _ => segment,
    }
}

fn looks_like_slug(segment: &str) -> bool {
    segment.chars().count() > 5
        && !segment.starts_with("A-")
        && !segment.chars().all(|c| c.is_ascii_digit())
        && segment.chars().filter(|c| c.is_alphabetic()).count() >= 3
}

fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}
