use crate::models::{AvailabilityVerdict, SourceKind};
use crate::plugins::detectors::page::Page;
use crate::plugins::detectors::{IN_STOCK_PHRASES, OUT_OF_STOCK_PHRASES};
use crate::plugins::traits::StockDetector;

/// Phrase-only detection for sites without known markup.
///
/// Unlike the store detectors this checks the in-stock phrases first, and it never claims a
/// negative it has no evidence for: a page matching neither phrase set is `Unknown`.
pub struct GenericDetector {
    source: SourceKind,
}

impl GenericDetector {
    pub fn new() -> Self {
        Self::for_source(SourceKind::Generic)
    }

    /// Use the phrase strategy for a recognized store whose markup is not modelled.
    pub fn for_source(source: SourceKind) -> Self {
        GenericDetector { source }
    }
}

impl Default for GenericDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl StockDetector for GenericDetector {
    fn name(&self) -> &str {
        "Generic Detector"
    }

    fn source(&self) -> SourceKind {
        self.source
    }

    fn detect(&self, content: &str) -> AvailabilityVerdict {
        let page = Page::parse(content);
        let price = page.price();

        if let Some(phrase) = page.first_phrase(IN_STOCK_PHRASES) {
            return AvailabilityVerdict::available(price).with_note(format!("matched \"{phrase}\""));
        }

        if let Some(phrase) = page.first_phrase(OUT_OF_STOCK_PHRASES) {
            return AvailabilityVerdict::unavailable(price).with_note(format!("matched \"{phrase}\""));
        }

        AvailabilityVerdict::unknown(price, "Unable to determine stock status")
    }
}
