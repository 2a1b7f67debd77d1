//! Mapping from the canonical report record to a rendered document.

use std::collections::HashMap;
use std::path::Path;

use shared_types::{LayoutVariant, ReportRecord};

use crate::compiler::{compile_with_timeout, OutputFormat, RenderError, RenderRequest};

/// Wall-clock budget for one document compilation.
const RENDER_TIMEOUT_MS: u64 = 20_000;

/// Character caps for the fixed-form grid. The paper form's cells cannot
/// grow, so over-long values are ellipsized before injection and the
/// template clips whatever still does not fit.
const FORM_CELL_CHARS: usize = 90;
const FORM_URL_CHARS: usize = 120;
const FORM_SUMMARY_CHARS: usize = 700;

/// A rendered complaint document.
#[derive(Debug, Clone)]
pub struct RenderedDocument {
    pub bytes: Vec<u8>,
    pub mime_type: &'static str,
    pub page_count: usize,
}

/// Render a validated report record in the requested layout and format.
///
/// Screenshots referenced by the record are read here; a file that has gone
/// missing degrades to a placeholder line in the document rather than a
/// failed render.
pub async fn render_report(
    record: &ReportRecord,
    variant: LayoutVariant,
    format: OutputFormat,
) -> Result<RenderedDocument, RenderError> {
    let request = build_request(record, variant, format);
    let artifact = compile_with_timeout(request, RENDER_TIMEOUT_MS).await?;
    Ok(RenderedDocument {
        bytes: artifact.bytes,
        mime_type: artifact.mime_type,
        page_count: artifact.page_count,
    })
}

fn template_for(variant: LayoutVariant) -> &'static str {
    match variant {
        LayoutVariant::Narrative => "complaint_narrative",
        LayoutVariant::FixedForm => "complaint_form",
    }
}

fn build_request(
    record: &ReportRecord,
    variant: LayoutVariant,
    format: OutputFormat,
) -> RenderRequest {
    let mut request = RenderRequest::for_template(template_for(variant), format);
    let fixed = variant == LayoutVariant::FixedForm;

    let cap = |text: &str, max: usize| -> serde_json::Value {
        if fixed {
            ellipsize(text, max).into()
        } else {
            text.into()
        }
    };

    let reporter = &record.reporter;
    let respondent = &record.respondent;
    let violation = &record.violation;
    let evidence = &record.evidence;

    let inputs = &mut request.inputs;
    inputs.insert("reporter_name".into(), cap(&reporter.name, FORM_CELL_CHARS));
    inputs.insert(
        "reporter_birth_date".into(),
        cap(&reporter.birth_date, FORM_CELL_CHARS),
    );
    inputs.insert(
        "reporter_address".into(),
        cap(&reporter.address, FORM_CELL_CHARS),
    );
    inputs.insert("reporter_phone".into(), cap(&reporter.phone, FORM_CELL_CHARS));
    inputs.insert(
        "reporter_mobile".into(),
        cap(&reporter.mobile, FORM_CELL_CHARS),
    );
    inputs.insert("reporter_fax".into(), cap(&reporter.fax, FORM_CELL_CHARS));
    inputs.insert("reporter_email".into(), cap(&reporter.email, FORM_CELL_CHARS));
    inputs.insert(
        "reporter_relationship".into(),
        cap(
            reporter
                .relationship
                .as_ref()
                .map(|r| r.label())
                .unwrap_or(""),
            FORM_CELL_CHARS,
        ),
    );

    inputs.insert(
        "respondent_name".into(),
        cap(&respondent.business_name, FORM_CELL_CHARS),
    );
    inputs.insert(
        "respondent_representative".into(),
        cap(&respondent.representative, FORM_CELL_CHARS),
    );
    inputs.insert(
        "respondent_address".into(),
        cap(&respondent.address, FORM_CELL_CHARS),
    );
    inputs.insert(
        "respondent_phone".into(),
        cap(&respondent.phone, FORM_CELL_CHARS),
    );
    inputs.insert(
        "respondent_website".into(),
        cap(&respondent.website, FORM_URL_CHARS),
    );
    inputs.insert(
        "respondent_department".into(),
        cap(&respondent.department, FORM_CELL_CHARS),
    );

    inputs.insert(
        "violation_type".into(),
        cap(violation.kind.label(), FORM_CELL_CHARS),
    );
    inputs.insert(
        "violation_media".into(),
        cap(&violation.media, FORM_CELL_CHARS),
    );
    inputs.insert("violation_date".into(), cap(&violation.date, FORM_CELL_CHARS));
    inputs.insert("violation_url".into(), cap(&violation.url, FORM_URL_CHARS));
    inputs.insert(
        "legal_basis".into(),
        violation.legal_basis_citation.clone().into(),
    );
    inputs.insert(
        "violation_description".into(),
        cap(&violation.description, FORM_SUMMARY_CHARS),
    );
    // The statement page always carries the full text.
    inputs.insert(
        "violation_description_full".into(),
        violation.description.clone().into(),
    );
    inputs.insert(
        "identity_disclosure".into(),
        record.identity_disclosure.label().into(),
    );

    inputs.insert("analysis_text".into(), evidence.analysis_text.clone().into());
    inputs.insert(
        "affiliate_indicators".into(),
        serde_json::json!(evidence.affiliate_indicators),
    );
    inputs.insert(
        "additional_notes".into(),
        evidence.additional_notes.clone().into(),
    );
    inputs.insert("source_url".into(), evidence.source_url.clone().into());
    inputs.insert(
        "captured_at".into(),
        evidence
            .captured_at
            .map(|at| at.format("%Y-%m-%d %H:%M:%S UTC").to_string())
            .unwrap_or_default()
            .into(),
    );
    inputs.insert(
        "generated_on".into(),
        chrono::Utc::now().format("%Y-%m-%d").to_string().into(),
    );

    let checklist: Vec<serde_json::Value> = record
        .checklist
        .iter()
        .map(|(kind, checked)| serde_json::json!({ "label": kind.label(), "checked": checked }))
        .collect();
    inputs.insert("checklist".into(), serde_json::Value::Array(checklist));

    attach_screenshots(record, &mut request);

    request
}

/// Load the record's screenshots as assets. Missing files keep their slot
/// and render as a placeholder line.
fn attach_screenshots(record: &ReportRecord, request: &mut RenderRequest) {
    let evidence = &record.evidence;

    let (primary_path, primary_status) = match &evidence.primary_screenshot {
        None => (String::new(), "none"),
        Some(path) => match std::fs::read(path) {
            Ok(bytes) => {
                let vpath = format!("assets/primary.{}", image_extension(path));
                request.assets.insert(vpath.clone(), bytes);
                (vpath, "embedded")
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "primary screenshot unreadable");
                (String::new(), "missing")
            }
        },
    };
    request
        .inputs
        .insert("primary_image".into(), primary_path.into());
    request
        .inputs
        .insert("primary_image_status".into(), primary_status.into());

    let extras: Vec<serde_json::Value> = evidence
        .extra_screenshots
        .iter()
        .enumerate()
        .map(|(i, path)| {
            let label = format!("Additional evidence screenshot {}", i + 2);
            match std::fs::read(path) {
                Ok(bytes) => {
                    let vpath = format!("assets/extra_{}.{}", i + 1, image_extension(path));
                    request.assets.insert(vpath.clone(), bytes);
                    serde_json::json!({ "label": label, "path": vpath })
                }
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "extra screenshot unreadable");
                    serde_json::json!({ "label": label, "path": "" })
                }
            }
        })
        .collect();
    request
        .inputs
        .insert("extra_images".into(), serde_json::Value::Array(extras));
}

fn image_extension(path: &Path) -> String {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .filter(|ext| matches!(ext.as_str(), "png" | "jpg" | "jpeg" | "gif" | "webp" | "svg"))
        .unwrap_or_else(|| "png".to_string())
}

/// Truncate to `max_chars` characters, appending an ellipsis when anything
/// was cut.
fn ellipsize(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(max_chars.saturating_sub(1)).collect();
    cut.push('…');
    cut
}
