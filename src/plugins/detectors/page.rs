use scraper::{Html, Selector};

use crate::models::AvailabilityVerdict;
use crate::plugins::detectors::price::extract_price;

/// Labels longer than this are page chrome or containers, not a cart control.
const MAX_CONTROL_TEXT_CHARS: usize = 80;

/// A fetched page parsed once for all the checks a detector runs against it.
pub struct Page {
    document: Html,
    lowered: String,
}

impl Page {
    pub fn parse(content: &str) -> Self {
        Self {
            document: Html::parse_document(content),
            lowered: content.to_lowercase(),
        }
    }

    /// First phrase, in list order, found anywhere in the lower-cased markup.
    pub fn first_phrase<'p>(&self, phrases: &[&'p str]) -> Option<&'p str> {
        phrases
            .iter()
            .copied()
            .find(|phrase| self.lowered.contains(phrase))
    }

    pub fn contains(&self, selector: &Selector) -> bool {
        self.document.select(selector).next().is_some()
    }

    /// Whether some element matching `selector` carries a short label containing one of
    /// `phrases` (case-insensitive).
    pub fn control_labelled(&self, selector: &Selector, phrases: &[&str]) -> bool {
        self.document.select(selector).any(|element| {
            let label = element
                .text()
                .flat_map(str::split_whitespace)
                .collect::<Vec<_>>()
                .join(" ");
            if label.is_empty() || label.chars().count() > MAX_CONTROL_TEXT_CHARS {
                return false;
            }
            let label = label.to_lowercase();
            phrases.iter().any(|phrase| label.contains(phrase))
        })
    }

    pub fn price(&self) -> Option<String> {
        extract_price(&self.document)
    }
}

/// Unavailability phrases first, then a labelled cart control; a page with neither is treated
/// as out of stock.
pub fn detect_by_control_label(
    content: &str,
    unavailable_phrases: &[&str],
    controls: &Selector,
    control_phrases: &[&str],
) -> AvailabilityVerdict {
    let page = Page::parse(content);
    let price = page.price();

    if let Some(phrase) = page.first_phrase(unavailable_phrases) {
        return AvailabilityVerdict::unavailable(price).with_note(format!("matched \"{phrase}\""));
    }

    if page.control_labelled(controls, control_phrases) {
        return AvailabilityVerdict::available(price);
    }

    AvailabilityVerdict::unavailable(price).with_note("no add-to-cart control found")
}
