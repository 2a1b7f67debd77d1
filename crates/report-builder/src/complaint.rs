//! Plain-text complaint summary for pasting into the regulator's web portal.

use shared_types::ReportRecord;

/// Render the portal paste-in text for a built report.
///
/// Mirrors the structure of the generated document: respondent, violation
/// facts, legal basis, description, detected indicators, analysis, notes.
pub fn complaint_text(record: &ReportRecord) -> String {
    let v = &record.violation;
    let r = &record.respondent;
    let e = &record.evidence;

    let mut lines = vec![
        "[ Unfair labeling/advertising complaint ]".to_string(),
        String::new(),
        format!("- Respondent: {}", r.business_name),
        format!("- Respondent website/SNS: {}", r.website),
        String::new(),
        format!("- Violation type: {}", v.kind),
        format!("- Advertising media: {}", v.media),
        format!("- Advertising date: {}", v.date),
        format!("- Advertising URL: {}", v.url),
        String::new(),
        format!("- Legal basis: {}", v.legal_basis_citation),
        String::new(),
        "- Violation detail:".to_string(),
        v.description.clone(),
        String::new(),
    ];

    if !e.affiliate_indicators.is_empty() {
        lines.push("- Automatically detected affiliate indicators:".to_string());
        for indicator in &e.affiliate_indicators {
            lines.push(format!("  - {indicator}"));
        }
        lines.push(String::new());
    }

    if !e.analysis_text.is_empty() {
        lines.push(format!("- Automated analysis: {}", e.analysis_text));
        lines.push(String::new());
    }

    if !e.additional_notes.is_empty() {
        lines.push(format!("- Additional notes: {}", e.additional_notes));
        lines.push(String::new());
    }

    lines.push(
        "* The full complaint document and evidence screenshots are attached as files."
            .to_string(),
    );
    lines.push(
        "* This complaint is filed under the Act on Fair Labeling and Advertising.".to_string(),
    );

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_types::{
        EvidenceBundle, IdentityDisclosure, Reporter, Respondent, ViolationDetails, ViolationType,
    };
    use std::collections::BTreeMap;

    fn record() -> ReportRecord {
        ReportRecord {
            reporter: Reporter {
                name: "Hong Gildong".into(),
                ..Default::default()
            },
            respondent: Respondent {
                business_name: "@daily_reviews".into(),
                website: "https://instagram.com/daily_reviews".into(),
                ..Default::default()
            },
            violation: ViolationDetails {
                kind: ViolationType::UndisclosedMaterialConnection,
                media: "Instagram".into(),
                date: "2026-02-01".into(),
                url: "https://instagram.com/p/abc".into(),
                description: "Affiliate links without disclosure.".into(),
                legal_basis_citation: "Act on Fair Labeling and Advertising, Article 3".into(),
            },
            checklist: BTreeMap::new(),
            identity_disclosure: IdentityDisclosure::Private,
            evidence: EvidenceBundle {
                primary_screenshot: None,
                extra_screenshots: Vec::new(),
                source_url: "https://instagram.com/p/abc".into(),
                captured_at: None,
                analysis_text: String::new(),
                affiliate_indicators: vec!["affiliate links: 3 found".into()],
                additional_notes: String::new(),
            },
        }
    }

    #[test]
    fn includes_core_facts_and_indicators() {
        let text = complaint_text(&record());
        assert!(text.contains("@daily_reviews"));
        assert!(text.contains("Undisclosed economic interest"));
        assert!(text.contains("  - affiliate links: 3 found"));
        assert!(text.contains("attached as files"));
    }

    #[test]
    fn omits_empty_sections() {
        let mut record = record();
        record.evidence.affiliate_indicators.clear();
        let text = complaint_text(&record);
        assert!(!text.contains("affiliate indicators"));
        assert!(!text.contains("Additional notes"));
    }
}
