//! Property-based tests for the violation classifier.
//!
//! Exercises the classifier over arbitrary evidence configurations using
//! proptest: repeated calls never drift, the no-disclosure case always
//! dominates, and a clean verdict is only reachable through a real,
//! well-positioned disclosure.

use disclosure_engine::classify;
use proptest::prelude::*;
use shared_types::{Confidence, Evidence, ImageDisclosure, Severity};

fn arb_confidence() -> impl Strategy<Value = Confidence> {
    prop_oneof![
        Just(Confidence::Low),
        Just(Confidence::Medium),
        Just(Confidence::High),
        Just(Confidence::Unknown),
    ]
}

fn arb_image_disclosure() -> impl Strategy<Value = ImageDisclosure> {
    (
        any::<bool>(),
        proptest::collection::vec("[a-z가-힣 ]{0,40}", 0..5),
        arb_confidence(),
    )
        .prop_map(|(found, details, confidence)| ImageDisclosure {
            found,
            details,
            confidence,
        })
}

fn arb_evidence() -> impl Strategy<Value = Evidence> {
    (
        "[a-z가-힣#@ ]{0,600}",
        any::<bool>(),
        proptest::collection::vec("[a-z0-9: ]{1,30}", 0..4),
        proptest::option::of(arb_image_disclosure()),
        proptest::option::of("[a-z ]{1,40}"),
        proptest::option::of("[a-z ]{1,40}"),
    )
        .prop_map(
            |(page_text, has_text_disclosure, indicators, image, analysis_err, capture_err)| {
                let mut ev = Evidence::empty("https://example.com/post", chrono::Utc::now());
                ev.page_text = page_text;
                ev.has_text_disclosure = has_text_disclosure;
                ev.affiliate_indicators = indicators;
                ev.image_disclosure = image;
                ev.image_analysis_error = analysis_err;
                ev.capture_error = capture_err;
                ev
            },
        )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// classify(e) == classify(e): no hidden randomness, no clock dependence.
    #[test]
    fn classification_never_drifts(ev in arb_evidence()) {
        prop_assert_eq!(classify(&ev), classify(&ev));
    }

    /// Monetization signals with no disclosure of any kind are always High,
    /// regardless of every other field.
    #[test]
    fn no_disclosure_always_dominates(ev in arb_evidence()) {
        let image_found = ev.image_disclosure.as_ref().map(|i| i.found).unwrap_or(false);
        prop_assume!(!ev.affiliate_indicators.is_empty());
        prop_assume!(!ev.has_text_disclosure && !image_found);

        prop_assert_eq!(classify(&ev).severity, Severity::High);
    }

    /// Severity::None is only reachable when a disclosure was actually found
    /// and it sits in the opening window (the image path can never be None).
    #[test]
    fn clean_verdict_requires_positioned_disclosure(ev in arb_evidence()) {
        let c = classify(&ev);
        if c.severity == Severity::None {
            prop_assert!(ev.has_text_disclosure);
            prop_assert!(disclosure_engine::patterns::disclosure_in_opening(&ev.page_text));
        }
    }

    /// A classification is always produced, even for all-empty evidence with
    /// a capture error.
    #[test]
    fn total_over_degraded_evidence(err in "[a-z ]{1,60}") {
        let mut ev = Evidence::empty("https://example.com", chrono::Utc::now());
        ev.capture_error = Some(err);
        prop_assert_eq!(classify(&ev).severity, Severity::NeedsManualReview);
    }

    /// The image-analysis failure note never alters the verdict.
    #[test]
    fn analysis_note_is_inert(ev in arb_evidence(), note in "[a-z ]{1,40}") {
        let baseline = classify(&ev);
        let mut with_note = ev;
        with_note.image_analysis_error = Some(note);
        let c = classify(&with_note);
        prop_assert_eq!(c.severity, baseline.severity);
        prop_assert_eq!(c.violation_types, baseline.violation_types);
    }
}
