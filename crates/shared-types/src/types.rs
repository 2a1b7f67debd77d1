use std::path::PathBuf;

use chrono::{DateTime, Utc};

/// Maximum number of page-text characters retained on an [`Evidence`].
pub const PAGE_TEXT_LIMIT: usize = 5000;

/// Result of one capture attempt against a suspect URL.
///
/// Immutable once constructed. A new capture in the same session replaces
/// the whole record; nothing here is ever written to durable storage.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Evidence {
    pub source_url: String,
    pub captured_at: DateTime<Utc>,
    pub page_title: String,
    /// Body text, truncated to [`PAGE_TEXT_LIMIT`] characters at capture time.
    pub page_text: String,
    pub meta_description: String,
    pub author: String,
    /// True when any disclosure keyword appears anywhere in the page text.
    pub has_text_disclosure: bool,
    /// Display strings in detection order: links, discount codes, buy-links.
    /// Advisory text only; the classifier consumes presence, not content.
    pub affiliate_indicators: Vec<String>,
    pub image_disclosure: Option<ImageDisclosure>,
    /// Why image analysis was skipped or failed, if it was. Advisory only;
    /// must never influence severity.
    pub image_analysis_error: Option<String>,
    pub screenshot_path: Option<PathBuf>,
    pub capture_error: Option<String>,
}

impl Evidence {
    /// An evidence record for a capture attempt that produced no signals.
    pub fn empty(source_url: &str, captured_at: DateTime<Utc>) -> Self {
        Self {
            source_url: source_url.to_string(),
            captured_at,
            page_title: String::new(),
            page_text: String::new(),
            meta_description: String::new(),
            author: String::new(),
            has_text_disclosure: false,
            affiliate_indicators: Vec::new(),
            image_disclosure: None,
            image_analysis_error: None,
            screenshot_path: None,
            capture_error: None,
        }
    }
}

/// Findings of the image-based disclosure analysis, if it ran.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ImageDisclosure {
    pub found: bool,
    /// Human-readable descriptions of each detected mark, detection order.
    pub details: Vec<String>,
    pub confidence: Confidence,
}

/// Confidence reported by the vision collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    Low,
    Medium,
    High,
    Unknown,
}

/// Assessed likelihood/seriousness of a disclosure-law violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Severity {
    None,
    Low,
    Medium,
    High,
    Unknown,
    NeedsManualReview,
}

impl Severity {
    pub fn label(&self) -> &'static str {
        match self {
            Severity::None => "None",
            Severity::Low => "Low",
            Severity::Medium => "Medium",
            Severity::High => "High",
            Severity::Unknown => "Unknown",
            Severity::NeedsManualReview => "Needs manual review",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Where the disclosure marker was found, if anywhere. Derived by the
/// classifier, never set by the extractor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisclosureSource {
    None,
    Text,
    Image,
}

/// Closed violation taxonomy. Drives the legal-basis lookup and the
/// fixed-form checklist page.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum ViolationType {
    UndisclosedMaterialConnection,
    DisclosurePositionInadequate,
    FalseOrExaggerated,
    Deceptive,
    UnfairComparison,
    Other,
}

impl ViolationType {
    /// Every taxonomy member, in checklist order.
    pub const ALL: [ViolationType; 6] = [
        ViolationType::UndisclosedMaterialConnection,
        ViolationType::DisclosurePositionInadequate,
        ViolationType::FalseOrExaggerated,
        ViolationType::Deceptive,
        ViolationType::UnfairComparison,
        ViolationType::Other,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ViolationType::UndisclosedMaterialConnection => {
                "Undisclosed economic interest (hidden advertising)"
            }
            ViolationType::DisclosurePositionInadequate => {
                "Disclosure present but inadequately positioned or visible"
            }
            ViolationType::FalseOrExaggerated => "False or exaggerated advertising",
            ViolationType::Deceptive => "Deceptive advertising",
            ViolationType::UnfairComparison => "Unfair comparative advertising",
            ViolationType::Other => "Other",
        }
    }
}

impl std::fmt::Display for ViolationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Derived classification of one [`Evidence`]. Never edited by a user;
/// a deterministic function of its evidence.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Classification {
    pub severity: Severity,
    /// Ordered, duplicate-free domain tags.
    pub violation_types: Vec<ViolationType>,
    pub recommendation: String,
    pub disclosure_source: DisclosureSource,
    /// Non-fatal note about a failed image analysis. Never changes severity.
    pub analysis_note: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn severity_serializes_kebab_case() {
        let json = serde_json::to_string(&Severity::NeedsManualReview).unwrap();
        assert_eq!(json, "\"needs-manual-review\"");
    }

    #[test]
    fn violation_type_roundtrips() {
        for vt in ViolationType::ALL {
            let json = serde_json::to_string(&vt).unwrap();
            let back: ViolationType = serde_json::from_str(&json).unwrap();
            assert_eq!(vt, back);
        }
    }

    #[test]
    fn empty_evidence_has_no_signals() {
        let ev = Evidence::empty("https://example.com/post/1", chrono::Utc::now());
        assert!(!ev.has_text_disclosure);
        assert!(ev.affiliate_indicators.is_empty());
        assert!(ev.image_disclosure.is_none());
    }
}
