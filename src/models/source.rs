use serde::{Deserialize, Serialize};
use std::fmt;
use url::Url;

/// Retail site a watched URL belongs to. Selects the detector used for its pages.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    Target,
    BestBuy,
    PokemonCenter,
    GameStop,
    Amazon,
    Generic,
}

impl SourceKind {
    pub const ALL: [SourceKind; 6] = [
        SourceKind::Target,
        SourceKind::BestBuy,
        SourceKind::PokemonCenter,
        SourceKind::GameStop,
        SourceKind::Amazon,
        SourceKind::Generic,
    ];

    pub fn store_name(&self) -> &'static str {
        match self {
            SourceKind::Target => "Target",
            SourceKind::BestBuy => "Best Buy",
            SourceKind::PokemonCenter => "Pokemon Center",
            SourceKind::GameStop => "GameStop",
            SourceKind::Amazon => "Amazon",
            SourceKind::Generic => "Generic",
        }
    }

    fn domain(&self) -> Option<&'static str> {
        match self {
            SourceKind::Target => Some("target.com"),
            SourceKind::BestBuy => Some("bestbuy.com"),
            SourceKind::PokemonCenter => Some("pokemoncenter.com"),
            SourceKind::GameStop => Some("gamestop.com"),
            SourceKind::Amazon => Some("amazon.com"),
            SourceKind::Generic => None,
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.store_name())
    }
}

/// Map a URL to its source. Total: anything unrecognized is `Generic`.
///
/// Matching is a case-insensitive substring test against the host. When the URL cannot be
/// parsed (no scheme, for instance) the whole lower-cased string is used instead.
pub fn classify(url: &str) -> SourceKind {
    let haystack = match Url::parse(url).ok().and_then(|u| u.host_str().map(str::to_owned)) {
        Some(host) => host.to_ascii_lowercase(),
        None => url.to_ascii_lowercase(),
    };

    match_domain(&haystack).unwrap_or(SourceKind::Generic)
}

/// A store domain that appears somewhere in the URL but did not decide its classification,
/// e.g. an affiliate redirector carrying a Target link in its query string.
pub fn foreign_store_mention(url: &str) -> Option<SourceKind> {
    let classified = classify(url);
    let lowered = url.to_ascii_lowercase();

    SourceKind::ALL
        .iter()
        .copied()
        .filter(|kind| *kind != classified)
        .find(|kind| kind.domain().is_some_and(|domain| lowered.contains(domain)))
}

fn match_domain(haystack: &str) -> Option<SourceKind> {
    SourceKind::ALL
        .iter()
        .copied()
        .find(|kind| kind.domain().is_some_and(|domain| haystack.contains(domain)))
}
