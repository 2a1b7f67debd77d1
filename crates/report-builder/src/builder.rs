//! The report data builder.

use std::collections::BTreeMap;
use std::path::PathBuf;

use shared_types::{
    Classification, Evidence, EvidenceBundle, IdentityDisclosure, LayoutVariant, ReportRecord,
    Reporter, Respondent, ViolationDetails, ViolationType,
};

use crate::legal;
use crate::screenshots;

/// User-entered description of the violation being reported.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ViolationInput {
    #[serde(rename = "type")]
    pub kind: ViolationType,
    pub media: String,
    pub date: String,
    pub url: String,
    pub description: String,
    pub identity_disclosure: Option<IdentityDisclosure>,
    #[serde(default)]
    pub additional_notes: String,
}

/// All mandatory fields missing from a build attempt, in form order.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("missing mandatory fields: {}", .missing.join(", "))]
pub struct ValidationError {
    pub missing: Vec<String>,
}

/// Assemble and validate the canonical report record.
///
/// Validation collects *every* missing mandatory field for the chosen layout
/// variant before failing, so the caller can surface one combined message.
pub fn build(
    reporter: &Reporter,
    respondent: &Respondent,
    violation: &ViolationInput,
    evidence: Option<&Evidence>,
    classification: Option<&Classification>,
    manual_screenshots: &[PathBuf],
    variant: LayoutVariant,
) -> Result<ReportRecord, ValidationError> {
    let missing = missing_fields(reporter, respondent, violation, variant);
    if !missing.is_empty() {
        return Err(ValidationError { missing });
    }

    let (primary, extras) = screenshots::select_screenshots(
        evidence.and_then(|e| e.screenshot_path.as_deref()),
        manual_screenshots,
    );

    let record = ReportRecord {
        reporter: reporter.clone(),
        respondent: respondent.clone(),
        violation: ViolationDetails {
            kind: violation.kind,
            media: violation.media.clone(),
            date: violation.date.clone(),
            url: violation.url.clone(),
            description: violation.description.clone(),
            legal_basis_citation: legal::citation_for(violation.kind).to_string(),
        },
        checklist: checklist_for(variant, violation.kind, classification),
        identity_disclosure: violation
            .identity_disclosure
            .unwrap_or(IdentityDisclosure::Private),
        evidence: EvidenceBundle {
            primary_screenshot: primary,
            extra_screenshots: extras,
            source_url: evidence
                .map(|e| e.source_url.clone())
                .unwrap_or_else(|| violation.url.clone()),
            captured_at: evidence.map(|e| e.captured_at),
            analysis_text: compose_analysis(classification, evidence),
            affiliate_indicators: evidence
                .map(|e| e.affiliate_indicators.clone())
                .unwrap_or_default(),
            additional_notes: violation.additional_notes.clone(),
        },
    };

    Ok(record)
}

/// Compose the analysis block quoted in the document: recommendation text
/// first, then a labeled block of indicator bullet lines. Also used to
/// prefill the user-editable violation description.
pub fn compose_analysis(
    classification: Option<&Classification>,
    evidence: Option<&Evidence>,
) -> String {
    let mut out = String::new();

    if let Some(classification) = classification {
        out.push_str(&classification.recommendation);
        if let Some(note) = &classification.analysis_note {
            out.push_str(&format!("\n(Image analysis note: {note})"));
        }
    }

    if let Some(evidence) = evidence {
        if !evidence.affiliate_indicators.is_empty() {
            if !out.is_empty() {
                out.push_str("\n\n");
            }
            out.push_str("[Automatically detected indicators]");
            for indicator in &evidence.affiliate_indicators {
                out.push_str(&format!("\n- {indicator}"));
            }
        }
        if let Some(image) = &evidence.image_disclosure {
            if !image.details.is_empty() {
                if !out.is_empty() {
                    out.push_str("\n\n");
                }
                out.push_str("[Image disclosure marks]");
                for detail in &image.details {
                    out.push_str(&format!("\n- {detail}"));
                }
            }
        }
    }

    out
}

fn missing_fields(
    reporter: &Reporter,
    respondent: &Respondent,
    violation: &ViolationInput,
    variant: LayoutVariant,
) -> Vec<String> {
    let mut missing = Vec::new();
    let mut require = |value: &str, name: &str| {
        if value.trim().is_empty() {
            missing.push(name.to_string());
        }
    };

    require(&reporter.name, "reporter name");
    require(&reporter.address, "reporter address");
    require(&reporter.phone, "reporter phone");
    require(&respondent.business_name, "respondent business name");
    if variant == LayoutVariant::FixedForm {
        require(&violation.media, "advertising media");
        require(&violation.date, "advertising date");
    }
    require(&violation.url, "violation URL");
    require(&violation.description, "violation description");
    if variant == LayoutVariant::FixedForm && violation.identity_disclosure.is_none() {
        missing.push("identity disclosure preference".to_string());
    }

    missing
}

/// Checklist for the fixed-form variant: every taxonomy code, ticked for the
/// reported type and anything the classifier tagged. Narrative documents
/// carry no checklist.
fn checklist_for(
    variant: LayoutVariant,
    reported: ViolationType,
    classification: Option<&Classification>,
) -> BTreeMap<ViolationType, bool> {
    let mut checklist = BTreeMap::new();
    if variant != LayoutVariant::FixedForm {
        return checklist;
    }
    for vt in ViolationType::ALL {
        checklist.insert(vt, vt == reported);
    }
    if let Some(classification) = classification {
        for vt in &classification.violation_types {
            checklist.insert(*vt, true);
        }
    }
    checklist
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use shared_types::{DisclosureSource, Severity};

    fn reporter() -> Reporter {
        Reporter {
            name: "Hong Gildong".into(),
            address: "12 Teheran-ro, Gangnam-gu, Seoul".into(),
            phone: "010-1234-5678".into(),
            ..Default::default()
        }
    }

    fn respondent() -> Respondent {
        Respondent {
            business_name: "@daily_reviews".into(),
            website: "https://instagram.com/daily_reviews".into(),
            ..Default::default()
        }
    }

    fn violation() -> ViolationInput {
        ViolationInput {
            kind: ViolationType::UndisclosedMaterialConnection,
            media: "Instagram".into(),
            date: "2026-02-01".into(),
            url: "https://instagram.com/p/abc".into(),
            description: "Affiliate links without any ad disclosure.".into(),
            identity_disclosure: Some(IdentityDisclosure::Private),
            additional_notes: String::new(),
        }
    }

    fn classification() -> Classification {
        Classification {
            severity: Severity::High,
            violation_types: vec![ViolationType::UndisclosedMaterialConnection],
            recommendation: "No economic-interest disclosure was found.".into(),
            disclosure_source: DisclosureSource::None,
            analysis_note: None,
        }
    }

    #[test]
    fn collects_all_missing_fields_in_one_error() {
        let mut reporter = reporter();
        reporter.phone = String::new();
        let mut respondent = respondent();
        respondent.business_name = "  ".into();

        let err = build(
            &reporter,
            &respondent,
            &violation(),
            None,
            None,
            &[],
            LayoutVariant::Narrative,
        )
        .unwrap_err();

        assert_eq!(
            err.missing,
            vec![
                "reporter phone".to_string(),
                "respondent business name".to_string()
            ]
        );
        assert!(err.to_string().contains("reporter phone"));
        assert!(err.to_string().contains("respondent business name"));
    }

    #[test]
    fn fixed_form_requires_media_date_and_identity_preference() {
        let mut violation = violation();
        violation.media = String::new();
        violation.date = String::new();
        violation.identity_disclosure = None;

        let err = build(
            &reporter(),
            &respondent(),
            &violation,
            None,
            None,
            &[],
            LayoutVariant::FixedForm,
        )
        .unwrap_err();

        assert_eq!(
            err.missing,
            vec![
                "advertising media".to_string(),
                "advertising date".to_string(),
                "identity disclosure preference".to_string()
            ]
        );
    }

    #[test]
    fn narrative_does_not_require_form_only_fields() {
        let mut violation = violation();
        violation.media = String::new();
        violation.identity_disclosure = None;

        let record = build(
            &reporter(),
            &respondent(),
            &violation,
            None,
            None,
            &[],
            LayoutVariant::Narrative,
        )
        .unwrap();
        assert!(record.checklist.is_empty());
        assert_eq!(record.identity_disclosure, IdentityDisclosure::Private);
    }

    #[test]
    fn looks_up_legal_basis_from_violation_type() {
        let record = build(
            &reporter(),
            &respondent(),
            &violation(),
            None,
            None,
            &[],
            LayoutVariant::Narrative,
        )
        .unwrap();
        assert!(record
            .violation
            .legal_basis_citation
            .contains("Article 3(1)1"));
    }

    #[test]
    fn checklist_ticks_reported_and_classified_types() {
        let mut violation = violation();
        violation.kind = ViolationType::Deceptive;

        let record = build(
            &reporter(),
            &respondent(),
            &violation,
            None,
            Some(&classification()),
            &[],
            LayoutVariant::FixedForm,
        )
        .unwrap();

        assert_eq!(record.checklist.len(), ViolationType::ALL.len());
        assert_eq!(record.checklist[&ViolationType::Deceptive], true);
        assert_eq!(
            record.checklist[&ViolationType::UndisclosedMaterialConnection],
            true
        );
        assert_eq!(record.checklist[&ViolationType::UnfairComparison], false);
    }

    #[test]
    fn analysis_text_keeps_recommendation_before_indicators() {
        let mut evidence =
            Evidence::empty("https://instagram.com/p/abc", chrono::Utc::now());
        evidence.affiliate_indicators = vec![
            "affiliate links: 3 found".to_string(),
            "purchase links: 2 found".to_string(),
        ];

        let text = compose_analysis(Some(&classification()), Some(&evidence));
        let recommendation_at = text.find("No economic-interest").unwrap();
        let indicators_at = text.find("[Automatically detected indicators]").unwrap();
        assert!(recommendation_at < indicators_at);
        assert!(text.contains("- affiliate links: 3 found"));
    }

    #[test]
    fn promotes_first_upload_when_no_auto_screenshot() {
        let uploads = vec![PathBuf::from("/up/a.png"), PathBuf::from("/up/b.png")];
        let record = build(
            &reporter(),
            &respondent(),
            &violation(),
            None,
            None,
            &uploads,
            LayoutVariant::Narrative,
        )
        .unwrap();
        assert_eq!(
            record.evidence.primary_screenshot,
            Some(PathBuf::from("/up/a.png"))
        );
        assert_eq!(
            record.evidence.extra_screenshots,
            vec![PathBuf::from("/up/b.png")]
        );
    }
}
