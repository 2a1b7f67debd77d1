//! Report assembly: user input + evidence + classification in, a validated
//! canonical [`shared_types::ReportRecord`] out.
//!
//! The builder owns everything between the classifier and the document
//! renderer: aggregate mandatory-field validation, the legal-basis lookup,
//! the primary-screenshot selection policy, and the composition of analysis
//! text. It performs no I/O beyond an existence check on screenshot paths.

pub mod builder;
pub mod complaint;
pub mod legal;
pub mod screenshots;

pub use builder::{build, compose_analysis, ValidationError, ViolationInput};
pub use complaint::complaint_text;
pub use legal::citation_for;
pub use screenshots::select_screenshots;
