//! Embedded complaint templates and their metadata.

pub mod embedded;
pub mod registry;

pub use embedded::{get_embedded_template, list_embedded_templates};
pub use registry::{list_templates, TemplateInfo};

use crate::compiler::RenderError;

/// Resolve a template name to its Typst source.
pub fn get_template_source(name: &str) -> Result<String, RenderError> {
    embedded::get_embedded_template(name)
        .ok_or_else(|| RenderError::TemplateNotFound(name.to_string()))
}
