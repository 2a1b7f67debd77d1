//! Typst compilation with timeout handling and displayable errors.

pub mod errors;
pub mod output;
pub mod render;

pub use errors::{Diagnostic, RenderError};
pub use output::OutputFormat;
pub use render::{compile, compile_with_timeout};

use std::collections::HashMap;

/// A render job: template or raw source, inputs, and binary assets.
#[derive(Debug, Clone)]
pub struct RenderRequest {
    /// Raw Typst source, or a `typst://templates/<name>` URI.
    pub source: String,
    /// Values exposed to the template via `sys.inputs`.
    pub inputs: HashMap<String, serde_json::Value>,
    /// Binary assets addressable from the template by virtual path.
    pub assets: HashMap<String, Vec<u8>>,
    pub format: OutputFormat,
    /// Pixels per inch for PNG export.
    pub ppi: Option<u32>,
}

impl RenderRequest {
    /// A request for an embedded template by name.
    pub fn for_template(name: &str, format: OutputFormat) -> Self {
        Self {
            source: format!("typst://templates/{name}"),
            inputs: HashMap::new(),
            assets: HashMap::new(),
            format,
            ppi: None,
        }
    }
}

/// The rendered artifact.
#[derive(Debug, Clone)]
pub struct RenderArtifact {
    pub bytes: Vec<u8>,
    pub mime_type: &'static str,
    pub page_count: usize,
}
