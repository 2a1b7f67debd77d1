//! DOM signal extraction: disclosure keywords and monetization indicators.

use disclosure_engine::patterns;
use lazy_static::lazy_static;
use scraper::{Html, Selector};
use shared_types::PAGE_TEXT_LIMIT;

/// Detection caps, matching what a reviewer can usefully scan.
const MAX_AFFILIATE_LINKS: usize = 10;
const MAX_CODE_MATCHES: usize = 5;
const ECHOED_CODES: usize = 3;
const MAX_BUY_LINKS: usize = 5;

lazy_static! {
    static ref TITLE: Selector = Selector::parse("title").unwrap();
    static ref META_DESCRIPTION: Selector = Selector::parse(r#"meta[name="description"]"#).unwrap();
    static ref META_AUTHOR: Selector = Selector::parse(r#"meta[name="author"]"#).unwrap();
    static ref BODY: Selector = Selector::parse("body").unwrap();
    static ref ANCHOR: Selector = Selector::parse("a").unwrap();
}

/// Observable signals scanned out of one page snapshot.
#[derive(Debug, Clone, Default)]
pub struct PageSignals {
    pub title: String,
    pub meta_description: String,
    pub author: String,
    /// Collapsed body text, truncated to [`PAGE_TEXT_LIMIT`] characters.
    pub body_text: String,
    pub has_text_disclosure: bool,
    /// Display strings in detection order: links, discount codes, buy-links.
    pub affiliate_indicators: Vec<String>,
}

/// Scan a raw HTML document for the signals the classifier consumes.
pub fn scan(html: &str) -> PageSignals {
    let document = Html::parse_document(html);

    let title = document
        .select(&TITLE)
        .next()
        .map(|t| collapse_whitespace(&t.text().collect::<String>()))
        .unwrap_or_default();

    let meta_description = meta_content(&document, &META_DESCRIPTION);
    let author = meta_content(&document, &META_AUTHOR);

    let full_text = document
        .select(&BODY)
        .next()
        .map(|body| collapse_whitespace(&body.text().collect::<Vec<_>>().join(" ")))
        .unwrap_or_default();
    let body_text: String = full_text.chars().take(PAGE_TEXT_LIMIT).collect();

    // Keyword presence is checked against the full text, not the truncated
    // copy: a disclosure at the very bottom of a long post still counts as
    // "present somewhere".
    let has_text_disclosure = patterns::contains_disclosure_keyword(&full_text);

    let mut affiliate_indicators = Vec::new();

    let affiliate_links: Vec<String> = document
        .select(&ANCHOR)
        .filter_map(|a| a.value().attr("href"))
        .filter(|href| patterns::AFFILIATE_URL.is_match(href))
        .take(MAX_AFFILIATE_LINKS)
        .map(str::to_string)
        .collect();
    if !affiliate_links.is_empty() {
        affiliate_indicators.push(format!("affiliate links: {} found", affiliate_links.len()));
    }

    let codes: Vec<&str> = patterns::DISCOUNT_CODE
        .find_iter(&full_text)
        .take(MAX_CODE_MATCHES)
        .map(|m| m.as_str())
        .collect();
    if !codes.is_empty() {
        affiliate_indicators.push(format!(
            "discount/coupon codes found: {}",
            codes[..codes.len().min(ECHOED_CODES)].join(", ")
        ));
    }

    let buy_links = document
        .select(&ANCHOR)
        .filter(|a| {
            let text = a.text().collect::<String>();
            patterns::BUY_TEXT.is_match(&text)
        })
        .take(MAX_BUY_LINKS)
        .count();
    if buy_links > 0 {
        affiliate_indicators.push(format!("purchase links: {buy_links} found"));
    }

    PageSignals {
        title,
        meta_description,
        author,
        body_text,
        has_text_disclosure,
        affiliate_indicators,
    }
}

fn meta_content(document: &Html, selector: &Selector) -> String {
    document
        .select(selector)
        .next()
        .and_then(|m| m.value().attr("content"))
        .unwrap_or_default()
        .to_string()
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
