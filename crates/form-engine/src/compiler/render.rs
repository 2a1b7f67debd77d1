//! Core rendering: resolve the template, compile in memory, export.

use std::time::Duration;

use typst::diag::SourceDiagnostic;
use typst::model::Document;

use super::errors::{Diagnostic, RenderError};
use super::output::OutputFormat;
use super::{RenderArtifact, RenderRequest};
use crate::templates;
use crate::world::ReportWorld;

/// Compile a render request synchronously.
pub fn compile(request: RenderRequest) -> Result<RenderArtifact, RenderError> {
    let source = resolve_source(&request.source)?;
    let world = ReportWorld::new(source, request.inputs, request.assets)?;

    let warned = typst::compile(&world);
    for warning in &warned.warnings {
        tracing::debug!(message = %warning.message, "typst warning");
    }

    match warned.output {
        Ok(document) => export(&document, request.format, request.ppi),
        Err(diagnostics) => Err(RenderError::Compile(collect_diagnostics(&diagnostics))),
    }
}

/// Compile on a blocking thread with a wall-clock budget.
pub async fn compile_with_timeout(
    request: RenderRequest,
    timeout_ms: u64,
) -> Result<RenderArtifact, RenderError> {
    let task = tokio::task::spawn_blocking(move || compile(request));
    match tokio::time::timeout(Duration::from_millis(timeout_ms), task).await {
        Ok(Ok(result)) => result,
        Ok(Err(join_error)) => Err(RenderError::InvalidInput(format!(
            "compile task panicked: {join_error}"
        ))),
        Err(_elapsed) => Err(RenderError::Timeout(timeout_ms)),
    }
}

fn resolve_source(source: &str) -> Result<String, RenderError> {
    match source.strip_prefix("typst://templates/") {
        Some(name) => templates::get_template_source(name),
        None => Ok(source.to_string()),
    }
}

fn export(
    document: &Document,
    format: OutputFormat,
    ppi: Option<u32>,
) -> Result<RenderArtifact, RenderError> {
    let page_count = document.pages.len();

    match format {
        OutputFormat::Pdf => {
            let bytes = typst_pdf::pdf(document, &typst_pdf::PdfOptions::default()).map_err(
                |e| RenderError::Export {
                    format: "pdf",
                    message: format!("{e:?}"),
                },
            )?;
            Ok(RenderArtifact {
                bytes,
                mime_type: format.mime_type(),
                page_count,
            })
        }
        OutputFormat::Svg => {
            let page = first_page(document, "svg")?;
            Ok(RenderArtifact {
                bytes: typst_svg::svg(page).into_bytes(),
                mime_type: format.mime_type(),
                page_count,
            })
        }
        OutputFormat::Png => {
            let pixels_per_point = ppi.unwrap_or(144) as f32 / 72.0;
            let page = first_page(document, "png")?;
            let pixmap = typst_render::render(page, pixels_per_point);
            let bytes = pixmap.encode_png().map_err(|e| RenderError::Export {
                format: "png",
                message: e.to_string(),
            })?;
            Ok(RenderArtifact {
                bytes,
                mime_type: format.mime_type(),
                page_count,
            })
        }
    }
}

fn first_page<'a>(
    document: &'a Document,
    format: &'static str,
) -> Result<&'a typst::layout::Page, RenderError> {
    document.pages.first().ok_or(RenderError::Export {
        format,
        message: "document has no pages".to_string(),
    })
}

fn collect_diagnostics(diagnostics: &[SourceDiagnostic]) -> Vec<Diagnostic> {
    diagnostics
        .iter()
        .map(|diag| Diagnostic {
            message: diag.message.to_string(),
            hint: if diag.hints.is_empty() {
                None
            } else {
                Some(
                    diag.hints
                        .iter()
                        .map(|h| h.to_string())
                        .collect::<Vec<_>>()
                        .join("; "),
                )
            },
        })
        .collect()
}
