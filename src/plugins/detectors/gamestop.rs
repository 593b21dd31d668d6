use scraper::Selector;
use std::sync::LazyLock;

use crate::models::{AvailabilityVerdict, SourceKind};
use crate::plugins::detectors::page::detect_by_control_label;
use crate::plugins::traits::StockDetector;

const UNAVAILABLE_PHRASES: &[&str] = &["not available", "out of stock"];
const CART_PHRASES: &[&str] = &["add to cart"];

static CART_CONTROLS: LazyLock<Selector> = LazyLock::new(|| Selector::parse("button").unwrap());

pub struct GameStopDetector;

impl GameStopDetector {
    pub fn new() -> Self {
        GameStopDetector
    }
}

impl Default for GameStopDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl StockDetector for GameStopDetector {
    fn name(&self) -> &str {
        "GameStop Detector"
    }

    fn source(&self) -> SourceKind {
        SourceKind::GameStop
    }

    fn detect(&self, content: &str) -> AvailabilityVerdict {
        detect_by_control_label(content, UNAVAILABLE_PHRASES, &CART_CONTROLS, CART_PHRASES)
    }
}
