//! Template registry and metadata.

use serde::{Deserialize, Serialize};

/// Information about an available template.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateInfo {
    /// Template name (used in URIs).
    pub name: String,
    /// Human-readable description.
    pub description: String,
    /// Full URI for this template.
    pub uri: String,
    /// Required input fields.
    pub required_inputs: Vec<String>,
    /// Optional input fields.
    pub optional_inputs: Vec<String>,
}

/// List all available templates.
pub fn list_templates() -> Vec<TemplateInfo> {
    vec![
        TemplateInfo {
            name: "complaint_narrative".to_string(),
            description: "Flowing complaint document: complainant, respondent, violation, \
                          evidence with embedded screenshots, submission guidance, signature \
                          block"
                .to_string(),
            uri: "typst://templates/complaint_narrative".to_string(),
            required_inputs: vec![
                "reporter_name".to_string(),
                "reporter_address".to_string(),
                "reporter_phone".to_string(),
                "respondent_name".to_string(),
                "violation_type".to_string(),
                "violation_url".to_string(),
                "violation_description".to_string(),
                "legal_basis".to_string(),
            ],
            optional_inputs: vec![
                "reporter_birth_date".to_string(),
                "reporter_mobile".to_string(),
                "reporter_fax".to_string(),
                "reporter_email".to_string(),
                "reporter_relationship".to_string(),
                "respondent_representative".to_string(),
                "respondent_address".to_string(),
                "respondent_phone".to_string(),
                "respondent_website".to_string(),
                "respondent_department".to_string(),
                "violation_media".to_string(),
                "violation_date".to_string(),
                "identity_disclosure".to_string(),
                "analysis_text".to_string(),
                "affiliate_indicators".to_string(),
                "additional_notes".to_string(),
                "source_url".to_string(),
                "captured_at".to_string(),
                "generated_on".to_string(),
                "primary_image".to_string(),
                "primary_image_status".to_string(),
                "extra_images".to_string(),
            ],
        },
        TemplateInfo {
            name: "complaint_form".to_string(),
            description: "Fixed-grid replica of the official report form: main form page, \
                          violation checklist page, free-text statement page, one page per \
                          evidence image"
                .to_string(),
            uri: "typst://templates/complaint_form".to_string(),
            required_inputs: vec![
                "reporter_name".to_string(),
                "reporter_address".to_string(),
                "reporter_phone".to_string(),
                "respondent_name".to_string(),
                "violation_type".to_string(),
                "violation_media".to_string(),
                "violation_date".to_string(),
                "violation_url".to_string(),
                "violation_description".to_string(),
                "violation_description_full".to_string(),
                "legal_basis".to_string(),
                "identity_disclosure".to_string(),
                "checklist".to_string(),
            ],
            optional_inputs: vec![
                "reporter_birth_date".to_string(),
                "reporter_mobile".to_string(),
                "reporter_fax".to_string(),
                "reporter_email".to_string(),
                "reporter_relationship".to_string(),
                "respondent_representative".to_string(),
                "respondent_address".to_string(),
                "respondent_phone".to_string(),
                "respondent_website".to_string(),
                "respondent_department".to_string(),
                "analysis_text".to_string(),
                "affiliate_indicators".to_string(),
                "additional_notes".to_string(),
                "source_url".to_string(),
                "captured_at".to_string(),
                "primary_image".to_string(),
                "primary_image_status".to_string(),
                "extra_images".to_string(),
            ],
        },
    ]
}
