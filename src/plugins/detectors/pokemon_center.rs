use scraper::Selector;
use std::sync::LazyLock;

use crate::models::{AvailabilityVerdict, SourceKind};
use crate::plugins::detectors::page::detect_by_control_label;
use crate::plugins::detectors::ADD_TO_CART_PHRASES;
use crate::plugins::traits::StockDetector;

const UNAVAILABLE_PHRASES: &[&str] = &["out of stock"];

static CART_CONTROLS: LazyLock<Selector> = LazyLock::new(|| Selector::parse("button").unwrap());

pub struct PokemonCenterDetector;

impl PokemonCenterDetector {
    pub fn new() -> Self {
        PokemonCenterDetector
    }
}

impl Default for PokemonCenterDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl StockDetector for PokemonCenterDetector {
    fn name(&self) -> &str {
        "Pokemon Center Detector"
    }

    fn source(&self) -> SourceKind {
        SourceKind::PokemonCenter
    }

    fn detect(&self, content: &str) -> AvailabilityVerdict {
        detect_by_control_label(content, UNAVAILABLE_PHRASES, &CART_CONTROLS, ADD_TO_CART_PHRASES)
    }
}
