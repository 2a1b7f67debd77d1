pub mod report;
pub mod types;

pub use report::{
    EvidenceBundle, IdentityDisclosure, LayoutVariant, Relationship, ReportRecord, Reporter,
    Respondent, ViolationDetails,
};
pub use types::{
    Classification, Confidence, DisclosureSource, Evidence, ImageDisclosure, Severity,
    ViolationType, PAGE_TEXT_LIMIT,
};
