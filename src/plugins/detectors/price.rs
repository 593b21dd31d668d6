use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;

static PRICE_DIGITS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d{1,3}(?:,\d{3})+|\d+)(\.\d+)?").unwrap());

static ITEMPROP_PRICE: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(
        r#"span[itemprop="price"], div[itemprop="price"], p[itemprop="price"], meta[itemprop="price"]"#,
    )
    .unwrap()
});

static TEXT_BLOCKS: LazyLock<Selector> = LazyLock::new(|| Selector::parse("span, div, p").unwrap());

/// Find a price on the page, independent of availability.
///
/// Candidates in priority order: an `itemprop="price"` element, an element whose class mentions
/// "price", an element whose `data-testid` mentions "price". The first candidate of each kind
/// that yields digits wins. Prices are returned as `$` followed by the digits, thousands
/// separators dropped.
pub fn extract_price(document: &Html) -> Option<String> {
    let semantic = document.select(&ITEMPROP_PRICE).next();
    let by_class = first_block_with_attr(document, "class");
    let by_test_id = first_block_with_attr(document, "data-testid");

    [semantic, by_class, by_test_id]
        .into_iter()
        .flatten()
        .find_map(|element| price_from_text(&element_price_text(element)))
}

/// Format the first number in `text` as a dollar amount.
pub fn price_from_text(text: &str) -> Option<String> {
    let captures = PRICE_DIGITS.captures(text)?;
    let whole = captures.get(1)?.as_str().replace(',', "");
    let fraction = captures.get(2).map(|m| m.as_str()).unwrap_or("");
    Some(format!("${whole}{fraction}"))
}

fn first_block_with_attr<'a>(document: &'a Html, attr: &str) -> Option<ElementRef<'a>> {
    document.select(&TEXT_BLOCKS).find(|element| {
        element
            .value()
            .attr(attr)
            .is_some_and(|value| value.to_lowercase().contains("price"))
    })
}

fn element_price_text(element: ElementRef<'_>) -> String {
    match element.value().attr("content") {
        Some(content) if !content.trim().is_empty() => content.to_string(),
        _ => element.text().collect::<String>(),
    }
}
