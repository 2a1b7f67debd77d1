//! The canonical report record consumed by the document renderer.

use std::collections::BTreeMap;
use std::path::PathBuf;

use chrono::{DateTime, Utc};

use crate::types::ViolationType;

/// Which of the two document layouts governs mandatory fields and rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LayoutVariant {
    /// Flowing multi-section complaint document.
    Narrative,
    /// Multi-page fixed-grid replica of the official paper form.
    FixedForm,
}

/// The complainant's relationship to the respondent business.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Relationship {
    Consumer,
    GovernmentAgency,
    CivicGroup,
    Competitor,
    MemberBusiness,
    Other(String),
}

impl Relationship {
    pub fn label(&self) -> &str {
        match self {
            Relationship::Consumer => "Consumer",
            Relationship::GovernmentAgency => "Government agency",
            Relationship::CivicGroup => "Civic group",
            Relationship::Competitor => "Competitor",
            Relationship::MemberBusiness => "Member business",
            Relationship::Other(text) => text,
        }
    }
}

/// Whether the complainant's identity may be shared with the respondent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IdentityDisclosure {
    Public,
    Private,
    PublicAfterAction,
}

impl IdentityDisclosure {
    pub fn label(&self) -> &'static str {
        match self {
            IdentityDisclosure::Public => "May be disclosed",
            IdentityDisclosure::Private => "Must not be disclosed",
            IdentityDisclosure::PublicAfterAction => "May be disclosed once action is taken",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Reporter {
    pub name: String,
    pub birth_date: String,
    pub address: String,
    pub phone: String,
    pub mobile: String,
    pub fax: String,
    pub email: String,
    pub relationship: Option<Relationship>,
}

#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Respondent {
    pub business_name: String,
    pub representative: String,
    pub address: String,
    pub phone: String,
    pub website: String,
    pub department: String,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ViolationDetails {
    #[serde(rename = "type")]
    pub kind: ViolationType,
    pub media: String,
    pub date: String,
    pub url: String,
    pub description: String,
    pub legal_basis_citation: String,
}

/// Everything the evidence block of the document needs.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct EvidenceBundle {
    pub primary_screenshot: Option<PathBuf>,
    /// Upload order preserved; rendered as successive labeled attachments.
    pub extra_screenshots: Vec<PathBuf>,
    pub source_url: String,
    pub captured_at: Option<DateTime<Utc>>,
    pub analysis_text: String,
    pub affiliate_indicators: Vec<String>,
    pub additional_notes: String,
}

/// The canonical object submitted to the document renderer. Built once per
/// generation, immutable, discarded with the session.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ReportRecord {
    pub reporter: Reporter,
    pub respondent: Respondent,
    pub violation: ViolationDetails,
    /// Violation-code checkboxes; populated for the fixed-form variant only.
    /// BTreeMap so the checklist page renders in a stable order.
    pub checklist: BTreeMap<ViolationType, bool>,
    pub identity_disclosure: IdentityDisclosure,
    pub evidence: EvidenceBundle,
}
