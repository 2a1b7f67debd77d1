//! Severity decision table: page signals in, violation classification out.

use shared_types::{
    Classification, Confidence, DisclosureSource, Evidence, Severity, ViolationType,
};

use crate::patterns;

/// Maximum number of image-disclosure samples echoed into a recommendation.
const MAX_SAMPLE_DETAILS: usize = 3;

/// Classify one capture's evidence.
///
/// Pure and total: absent fields count as absent, nothing panics, and the
/// same evidence always yields the same classification. Branch priority
/// (first match wins):
///
/// 1. monetization signals with no disclosure at all — the worst case
/// 2. monetization signals with a weak, mispositioned, or image-only
///    disclosure — graded by how the disclosure was found
/// 3. no monetization signals — defer to a human
pub fn classify(evidence: &Evidence) -> Classification {
    let has_affiliate = !evidence.affiliate_indicators.is_empty();
    let image = evidence.image_disclosure.as_ref();
    let image_found = image.map(|i| i.found).unwrap_or(false);
    let disclosed = evidence.has_text_disclosure || image_found;

    let mut classification = if has_affiliate && !disclosed {
        undisclosed()
    } else if has_affiliate && image_found {
        // Image findings take precedence over text: the sticker is what the
        // consumer actually sees.
        let confidence = image.map(|i| i.confidence).unwrap_or(Confidence::Unknown);
        let details = image.map(|i| i.details.as_slice()).unwrap_or_default();
        if confidence == Confidence::Low {
            image_low_visibility(details)
        } else {
            image_confirmed(details)
        }
    } else if has_affiliate {
        if patterns::disclosure_in_opening(&evidence.page_text) {
            adequate()
        } else {
            mispositioned()
        }
    } else {
        needs_manual_review()
    };

    // A failed image analysis is reported, never judged.
    if let Some(reason) = &evidence.image_analysis_error {
        classification.analysis_note = Some(reason.clone());
    }

    classification
}

fn undisclosed() -> Classification {
    Classification {
        severity: Severity::High,
        violation_types: vec![ViolationType::UndisclosedMaterialConnection],
        recommendation: "Affiliate links or discount codes were detected, but no \
            economic-interest disclosure (\"#광고\", \"협찬\", or an equivalent marker) was \
            found in the content. This indicates a likely violation of Article 3(1) of the \
            Act on Fair Labeling and Advertising and of the Endorsement Guidelines."
            .to_string(),
        disclosure_source: DisclosureSource::None,
        analysis_note: None,
    }
}

fn image_low_visibility(details: &[String]) -> Classification {
    Classification {
        severity: Severity::Medium,
        violation_types: vec![ViolationType::DisclosurePositionInadequate],
        recommendation: format!(
            "An advertising disclosure in image or sticker form was found, but its \
             visibility is low.\nDetected marks: {}\nUnder the 2024 revision of the \
             Endorsement Guidelines, the disclosure must be clearly recognizable to \
             consumers.",
            sample_details(details)
        ),
        disclosure_source: DisclosureSource::Image,
        analysis_note: None,
    }
}

fn image_confirmed(details: &[String]) -> Classification {
    Classification {
        severity: Severity::Low,
        violation_types: Vec::new(),
        recommendation: format!(
            "An advertising disclosure in image or sticker form was confirmed.\nDetected \
             marks: {}\nBecause the mark is an image rather than text, a manual check that \
             its visibility is sufficient is still recommended.",
            sample_details(details)
        ),
        disclosure_source: DisclosureSource::Image,
        analysis_note: None,
    }
}

fn mispositioned() -> Classification {
    Classification {
        severity: Severity::Medium,
        violation_types: vec![ViolationType::DisclosurePositionInadequate],
        recommendation: "An advertising disclosure is present but sits below the opening \
            portion of the post. The 2024 revision of the Endorsement Guidelines requires \
            the disclosure in the title or the opening portion."
            .to_string(),
        disclosure_source: DisclosureSource::Text,
        analysis_note: None,
    }
}

fn adequate() -> Classification {
    Classification {
        severity: Severity::None,
        violation_types: Vec::new(),
        recommendation: "Adequate advertising disclosure confirmed.".to_string(),
        disclosure_source: DisclosureSource::Text,
        analysis_note: None,
    }
}

fn needs_manual_review() -> Classification {
    Classification {
        severity: Severity::NeedsManualReview,
        violation_types: Vec::new(),
        recommendation: "Automatic detection found no affiliate indicators. Review the \
            content manually to judge whether an economic relationship exists."
            .to_string(),
        disclosure_source: DisclosureSource::None,
        analysis_note: None,
    }
}

fn sample_details(details: &[String]) -> String {
    if details.is_empty() {
        return "(no detail provided)".to_string();
    }
    details
        .iter()
        .take(MAX_SAMPLE_DETAILS)
        .cloned()
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use shared_types::ImageDisclosure;

    fn evidence() -> Evidence {
        Evidence::empty("https://blog.example.com/post/42", chrono::Utc::now())
    }

    fn with_affiliate(mut ev: Evidence) -> Evidence {
        ev.affiliate_indicators = vec!["affiliate links: 3 found".to_string()];
        ev
    }

    #[test]
    fn affiliate_without_disclosure_is_high() {
        let ev = with_affiliate(evidence());
        let c = classify(&ev);
        assert_eq!(c.severity, Severity::High);
        assert_eq!(
            c.violation_types,
            vec![ViolationType::UndisclosedMaterialConnection]
        );
        assert_eq!(c.disclosure_source, DisclosureSource::None);
    }

    #[test]
    fn disclosure_past_opening_window_is_medium() {
        let mut ev = with_affiliate(evidence());
        ev.has_text_disclosure = true;
        let padding: String = std::iter::repeat('a').take(800).collect();
        ev.page_text = format!("{padding} #광고 포함 게시물입니다");
        let c = classify(&ev);
        assert_eq!(c.severity, Severity::Medium);
        assert_eq!(
            c.violation_types,
            vec![ViolationType::DisclosurePositionInadequate]
        );
        assert_eq!(c.disclosure_source, DisclosureSource::Text);
    }

    #[test]
    fn disclosure_in_opening_window_is_clean() {
        let mut ev = with_affiliate(evidence());
        ev.has_text_disclosure = true;
        ev.page_text = "#광고 오늘 소개할 제품은...".to_string();
        let c = classify(&ev);
        assert_eq!(c.severity, Severity::None);
        assert!(c.violation_types.is_empty());
        assert_eq!(c.recommendation, "Adequate advertising disclosure confirmed.");
    }

    #[test]
    fn low_confidence_image_disclosure_is_medium() {
        let mut ev = with_affiliate(evidence());
        ev.image_disclosure = Some(ImageDisclosure {
            found: true,
            details: vec![
                "[sticker] AD (top, small)".to_string(),
                "[banner] 협찬 (bottom, small)".to_string(),
                "[watermark] sponsored (middle, unclear)".to_string(),
                "[sticker] 광고 (sidebar, small)".to_string(),
            ],
            confidence: Confidence::Low,
        });
        let c = classify(&ev);
        assert_eq!(c.severity, Severity::Medium);
        assert_eq!(c.disclosure_source, DisclosureSource::Image);
        // At most three samples are echoed.
        assert!(c.recommendation.contains("[sticker] AD"));
        assert!(!c.recommendation.contains("sidebar"));
    }

    #[test]
    fn confident_image_disclosure_is_low() {
        let mut ev = with_affiliate(evidence());
        ev.image_disclosure = Some(ImageDisclosure {
            found: true,
            details: vec!["[sticker] 광고 (top, clear)".to_string()],
            confidence: Confidence::High,
        });
        let c = classify(&ev);
        assert_eq!(c.severity, Severity::Low);
        assert!(c.violation_types.is_empty());
    }

    #[test]
    fn image_finding_wins_over_text_position() {
        // Text disclosure buried at the bottom would be Medium, but a clear
        // image sticker is what the consumer sees.
        let mut ev = with_affiliate(evidence());
        ev.has_text_disclosure = true;
        ev.page_text = format!("{} #협찬", "x".repeat(900));
        ev.image_disclosure = Some(ImageDisclosure {
            found: true,
            details: vec!["[sticker] AD (top, clear)".to_string()],
            confidence: Confidence::Medium,
        });
        let c = classify(&ev);
        assert_eq!(c.severity, Severity::Low);
        assert_eq!(c.disclosure_source, DisclosureSource::Image);
    }

    #[test]
    fn no_affiliate_signals_defers_to_manual_review() {
        let c = classify(&evidence());
        assert_eq!(c.severity, Severity::NeedsManualReview);
        assert!(c.violation_types.is_empty());
    }

    #[test]
    fn failed_capture_still_classifies() {
        let mut ev = evidence();
        ev.capture_error = Some("navigation timed out".to_string());
        let c = classify(&ev);
        assert_eq!(c.severity, Severity::NeedsManualReview);
    }

    #[test]
    fn analysis_failure_is_noted_but_never_changes_severity() {
        let mut ev = with_affiliate(evidence());
        let baseline = classify(&ev);
        ev.image_analysis_error = Some("no vision credential configured".to_string());
        let c = classify(&ev);
        assert_eq!(c.severity, baseline.severity);
        assert_eq!(
            c.analysis_note.as_deref(),
            Some("no vision credential configured")
        );
    }

    #[test]
    fn classification_is_deterministic() {
        let mut ev = with_affiliate(evidence());
        ev.has_text_disclosure = true;
        ev.page_text = format!("{} #ad", "y".repeat(700));
        assert_eq!(classify(&ev), classify(&ev));
    }
}
