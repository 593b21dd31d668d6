use scraper::Selector;
use std::sync::LazyLock;

use crate::models::{AvailabilityVerdict, SourceKind};
use crate::plugins::detectors::page::detect_by_control_label;
use crate::plugins::detectors::{ADD_TO_CART_PHRASES, OUT_OF_STOCK_PHRASES};
use crate::plugins::traits::StockDetector;

// Target renders its fulfillment buttons as both <button> and clickable <div>.
static CART_CONTROLS: LazyLock<Selector> = LazyLock::new(|| Selector::parse("button, div").unwrap());

pub struct TargetDetector;

impl TargetDetector {
    pub fn new() -> Self {
        TargetDetector
    }
}

impl Default for TargetDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl StockDetector for TargetDetector {
    fn name(&self) -> &str {
        "Target Detector"
    }

    fn source(&self) -> SourceKind {
        SourceKind::Target
    }

    fn detect(&self, content: &str) -> AvailabilityVerdict {
        detect_by_control_label(content, OUT_OF_STOCK_PHRASES, &CART_CONTROLS, ADD_TO_CART_PHRASES)
    }
}
