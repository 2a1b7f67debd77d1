//! Complaint document rendering.
//!
//! Turns a validated [`shared_types::ReportRecord`] into a downloadable
//! artifact in one of two layouts: a flowing narrative complaint document,
//! or a multi-page fixed-grid replica of the official paper form. Documents
//! are Typst templates compiled entirely in memory; screenshots referenced
//! by the record are loaded as binary assets, and a missing file degrades to
//! a placeholder line instead of failing the render.

pub mod compiler;
pub mod report;
pub mod templates;
pub mod world;

pub use compiler::{
    compile, compile_with_timeout, Diagnostic, OutputFormat, RenderArtifact, RenderError,
    RenderRequest,
};
pub use report::{render_report, RenderedDocument};
