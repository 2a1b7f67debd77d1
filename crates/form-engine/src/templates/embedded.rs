//! Embedded template loader.
//!
//! Templates are loaded from external files at compile time and embedded in
//! the binary.

/// Narrative complaint document - loaded from templates/complaint_narrative.typ
const NARRATIVE_TEMPLATE: &str = include_str!("../../templates/complaint_narrative.typ");

/// Fixed-grid official form replica - loaded from templates/complaint_form.typ
const FIXED_FORM_TEMPLATE: &str = include_str!("../../templates/complaint_form.typ");

/// Get an embedded template by name.
pub fn get_embedded_template(name: &str) -> Option<String> {
    match name {
        "complaint_narrative" => Some(NARRATIVE_TEMPLATE.to_string()),
        "complaint_form" => Some(FIXED_FORM_TEMPLATE.to_string()),
        _ => None,
    }
}

/// List all available embedded template names.
pub fn list_embedded_templates() -> Vec<&'static str> {
    vec!["complaint_narrative", "complaint_form"]
}
