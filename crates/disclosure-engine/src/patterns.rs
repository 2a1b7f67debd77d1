//! Keyword tables and detection patterns for disclosure and monetization signals

use lazy_static::lazy_static;
use regex::Regex;

/// Markers accepted as a disclosure of an economic interest, anywhere in the
/// page text. Mixed Korean/English because the monitored content is; matched
/// case-insensitively against lowercased text.
pub const DISCLOSURE_KEYWORDS: &[&str] = &[
    "#광고",
    "#ad",
    "광고포함",
    "광고 포함",
    "협찬",
    "유료광고",
    "경제적 대가",
    "소정의 원고료",
    "대가를 받",
    "협찬을 받",
    "#sponsored",
    "sponsored",
    "paid partnership",
    "파트너십",
    "제휴 링크",
];

/// The stricter marker set that must appear in the opening portion of a post
/// for the disclosure to count as properly positioned.
pub const OPENING_KEYWORDS: &[&str] = &["#광고", "#ad", "협찬", "유료광고"];

/// How many characters of page text count as the "opening portion".
pub const OPENING_WINDOW_CHARS: usize = 500;

lazy_static! {
    /// URL query markers that indicate affiliate/tracking links.
    pub static ref AFFILIATE_URL: Regex =
        Regex::new(r"(?i)ref=|affiliate|aff_id|utm_|click_id|partner|tracking").unwrap();

    /// Discount/coupon code offers followed by a redeemable token.
    pub static ref DISCOUNT_CODE: Regex = Regex::new(
        r"(?i)(할인\s*코드|쿠폰\s*코드|discount\s*code|coupon\s*code)[:\s]*[A-Za-z0-9]+"
    )
    .unwrap();

    /// Anchor text that solicits a purchase.
    pub static ref BUY_TEXT: Regex = Regex::new(r"(?i)구매|buy|shop|purchase|주문").unwrap();
}

/// True when any disclosure keyword appears anywhere in `text`.
pub fn contains_disclosure_keyword(text: &str) -> bool {
    let lower = text.to_lowercase();
    DISCLOSURE_KEYWORDS
        .iter()
        .any(|kw| lower.contains(&kw.to_lowercase()))
}

/// True when an opening-set keyword appears within the first
/// [`OPENING_WINDOW_CHARS`] characters of `text`.
///
/// Character count, not bytes: the window must not split a Hangul code point
/// and must measure the same span a reader sees.
pub fn disclosure_in_opening(text: &str) -> bool {
    let opening: String = text.chars().take(OPENING_WINDOW_CHARS).collect();
    let lower = opening.to_lowercase();
    OPENING_KEYWORDS
        .iter()
        .any(|kw| lower.contains(&kw.to_lowercase()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_korean_disclosure_marker() {
        assert!(contains_disclosure_keyword("이 포스팅은 #광고 입니다"));
    }

    #[test]
    fn detects_english_marker_case_insensitively() {
        assert!(contains_disclosure_keyword("This post is #Sponsored by ACME"));
    }

    #[test]
    fn ignores_clean_text() {
        assert!(!contains_disclosure_keyword("오늘의 일상 기록"));
    }

    #[test]
    fn opening_window_counts_characters_not_bytes() {
        // 490 multi-byte Hangul chars put the marker past 500 *bytes* but
        // still inside the 500-*character* window.
        let padding: String = std::iter::repeat('가').take(490).collect();
        let text = format!("{padding}#ad");
        assert!(disclosure_in_opening(&text));
    }

    #[test]
    fn marker_past_window_is_not_in_opening() {
        let padding: String = std::iter::repeat('a').take(800).collect();
        let text = format!("{padding} #광고");
        assert!(!disclosure_in_opening(&text));
    }

    #[test]
    fn affiliate_url_pattern_matches_tracking_params() {
        for href in [
            "https://shop.example.com/item?aff_id=99",
            "https://example.com/p?utm_source=blog",
            "https://r.example.com/ref=abc123",
        ] {
            assert!(AFFILIATE_URL.is_match(href), "{href}");
        }
        assert!(!AFFILIATE_URL.is_match("https://example.com/about"));
    }

    #[test]
    fn discount_code_pattern_requires_token() {
        assert!(DISCOUNT_CODE.is_match("할인 코드: SUMMER10"));
        assert!(DISCOUNT_CODE.is_match("Discount code WELCOME"));
        assert!(!DISCOUNT_CODE.is_match("할인 코드는 곧 공개됩니다:"));
    }
}
