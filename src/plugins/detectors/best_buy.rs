use scraper::Selector;
use std::sync::LazyLock;

use crate::models::{AvailabilityVerdict, SourceKind};
use crate::plugins::detectors::page::Page;
use crate::plugins::traits::StockDetector;

const UNAVAILABLE_PHRASES: &[&str] = &["sold out", "coming soon"];

static ADD_TO_CART_BUTTON: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(r#"button[data-button-state="ADD_TO_CART"]"#).unwrap());

/// Best Buy exposes the cart button state as a data attribute, so presence is structural.
pub struct BestBuyDetector;

impl BestBuyDetector {
    pub fn new() -> Self {
        BestBuyDetector
    }
}

impl Default for BestBuyDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl StockDetector for BestBuyDetector {
    fn name(&self) -> &str {
        "Best Buy Detector"
    }

    fn source(&self) -> SourceKind {
        SourceKind::BestBuy
    }

    fn detect(&self, content: &str) -> AvailabilityVerdict {
        let page = Page::parse(content);
        let price = page.price();

        if let Some(phrase) = page.first_phrase(UNAVAILABLE_PHRASES) {
            return AvailabilityVerdict::unavailable(price).with_note(format!("matched \"{phrase}\""));
        }

        if page.contains(&ADD_TO_CART_BUTTON) {
            return AvailabilityVerdict::available(price);
        }

        AvailabilityVerdict::unavailable(price).with_note("no ADD_TO_CART button state")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::StockStatus;
    use rstest::rstest;

    #[rstest]
    #[case(r#"<button data-button-state="ADD_TO_CART">Add to Cart</button>"#, StockStatus::Available)]
    #[case(r#"<button data-button-state="SOLD_OUT">Sold Out</button>"#, StockStatus::Unavailable)]
    #[case(r#"<button data-button-state="COMING_SOON">Coming Soon</button>"#, StockStatus::Unavailable)]
    #[case("<button>Add to Cart</button>", StockStatus::Unavailable)]
    #[case("<<<not html", StockStatus::Unavailable)]
    fn test_best_buy_detection(#[case] html: &str, #[case] expected: StockStatus) {
        assert_eq!(BestBuyDetector::new().detect(html).status, expected);
    }

    #[test]
    fn test_phrase_beats_button() {
        let html = r#"<button data-button-state="ADD_TO_CART">Add</button><p>Sold out</p>"#;
        assert_eq!(BestBuyDetector::new().detect(html).status, StockStatus::Unavailable);
    }

    #[test]
    fn test_best_buy_price() {
        let html = r#"<div class="priceView-customer-price"><span>$59.99</span></div>
                      <button data-button-state="ADD_TO_CART">Add to Cart</button>"#;
        let verdict = BestBuyDetector::new().detect(html);
        assert_eq!(verdict.status, StockStatus::Available);
        assert_eq!(verdict.price.as_deref(), Some("$59.99"));
    }
}
