//! HTTP handlers for the report API.

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

use disclosure_engine::classify;
use evidence_capture::{collect_evidence, DisclosureVision};
use form_engine::render_report;
use report_builder::{build, complaint_text, compose_analysis};

use crate::error::ApiError;
use crate::models::*;
use crate::state::{AppState, SessionState, StoredDocument};

/// Health check endpoint
pub async fn health() -> &'static str {
    "OK"
}

/// Open a new complaint session.
pub async fn create_session(
    State(state): State<Arc<AppState>>,
) -> Result<Json<SessionResponse>, ApiError> {
    let id = Uuid::new_v4();
    let session = SessionState::new();
    let created_at = session.created_at;

    state.sessions.write().await.insert(id, session);
    tracing::info!("created session: {}", id);

    Ok(Json(SessionResponse { id, created_at }))
}

/// Current evidence, classification, and document status for a session.
pub async fn get_session(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<EvidenceResponse>, ApiError> {
    let sessions = state.sessions.read().await;
    let session = sessions.get(&id).ok_or(ApiError::SessionNotFound(id))?;

    Ok(Json(session_view(session)))
}

/// Drop a session and everything it holds.
pub async fn delete_session(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state
        .sessions
        .write()
        .await
        .remove(&id)
        .ok_or(ApiError::SessionNotFound(id))?;
    tracing::info!("deleted session: {}", id);
    Ok(StatusCode::NO_CONTENT)
}

/// Capture evidence from a suspect URL and classify it.
///
/// Runs outside the session lock; the result replaces the session's
/// evidence/classification wholesale once complete. A capture failure still
/// produces (degraded) evidence, so this handler only errors for unknown
/// sessions.
pub async fn capture(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(req): Json<CaptureRequest>,
) -> Result<Json<EvidenceResponse>, ApiError> {
    if req.url.trim().is_empty() {
        return Err(ApiError::InvalidRequest("url must not be empty".into()));
    }
    if !state.sessions.read().await.contains_key(&id) {
        return Err(ApiError::SessionNotFound(id));
    }

    let vision = state.vision.as_ref().map(|v| v as &dyn DisclosureVision);
    let evidence = collect_evidence(&state.capture, vision, &state.store, &req.url).await;
    let classification = classify(&evidence);

    tracing::info!(
        url = %req.url,
        severity = %classification.severity,
        "capture classified"
    );

    let mut sessions = state.sessions.write().await;
    let session = sessions.get_mut(&id).ok_or(ApiError::SessionNotFound(id))?;
    session.replace_capture(evidence, classification);

    Ok(Json(session_view(session)))
}

fn session_view(session: &SessionState) -> EvidenceResponse {
    EvidenceResponse {
        evidence: session.evidence.clone(),
        classification: session.classification.clone(),
        suggested_description: compose_analysis(
            session.classification.as_ref(),
            session.evidence.as_ref(),
        ),
        manual_screenshots: session.manual_screenshots.len(),
        has_document: session.document.is_some(),
    }
}

/// Store manually uploaded screenshots, replacing any previous upload set.
pub async fn upload_screenshots(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(req): Json<UploadScreenshotsRequest>,
) -> Result<Json<UploadScreenshotsResponse>, ApiError> {
    if !state.sessions.read().await.contains_key(&id) {
        return Err(ApiError::SessionNotFound(id));
    }

    let dir = state
        .store
        .upload_dir(&id.to_string())
        .map_err(|e| ApiError::Internal(e.into()))?;

    let mut stored = Vec::with_capacity(req.screenshots.len());
    for (index, upload) in req.screenshots.iter().enumerate() {
        let bytes = BASE64
            .decode(&upload.data_base64)
            .map_err(|e| ApiError::InvalidRequest(format!("invalid screenshot base64: {e}")))?;
        let path = state
            .store
            .write_upload(&dir, index, &upload.filename, &bytes)
            .map_err(|e| ApiError::Internal(e.into()))?;
        stored.push(path);
    }

    let mut sessions = state.sessions.write().await;
    let session = sessions.get_mut(&id).ok_or(ApiError::SessionNotFound(id))?;
    session.manual_screenshots = stored;

    Ok(Json(UploadScreenshotsResponse {
        stored: session.manual_screenshots.len(),
    }))
}

/// Build the report record, render the document, and keep it for download.
pub async fn generate_report(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(req): Json<GenerateReportRequest>,
) -> Result<Json<GenerateReportResponse>, ApiError> {
    let (evidence, classification, manual_screenshots) = {
        let sessions = state.sessions.read().await;
        let session = sessions.get(&id).ok_or(ApiError::SessionNotFound(id))?;
        (
            session.evidence.clone(),
            session.classification.clone(),
            session.manual_screenshots.clone(),
        )
    };

    let record = build(
        &req.reporter,
        &req.respondent,
        &req.violation,
        evidence.as_ref(),
        classification.as_ref(),
        &manual_screenshots,
        req.variant,
    )?;

    let complaint = complaint_text(&record);
    let rendered = render_report(&record, req.variant, req.format).await?;

    let file_name = format!(
        "complaint_{}.{}",
        Utc::now().format("%Y%m%d_%H%M%S"),
        req.format.extension()
    );

    // Best-effort copy into the session output dir so the artifact can also
    // be picked up from disk.
    if let Ok(output_dir) = state.store.output_dir() {
        if let Err(e) = std::fs::write(output_dir.join(&file_name), &rendered.bytes) {
            tracing::warn!(error = %e, "could not write document to output dir");
        }
    }

    let mut sessions = state.sessions.write().await;
    let session = sessions.get_mut(&id).ok_or(ApiError::SessionNotFound(id))?;
    session.document = Some(StoredDocument {
        bytes: rendered.bytes,
        mime_type: rendered.mime_type,
        page_count: rendered.page_count,
        file_name: file_name.clone(),
    });

    tracing::info!(
        session = %id,
        pages = rendered.page_count,
        "document generated"
    );

    Ok(Json(GenerateReportResponse {
        file_name,
        mime_type: rendered.mime_type,
        page_count: rendered.page_count,
        complaint_text: complaint,
    }))
}

/// Download the last rendered document.
pub async fn download_document(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let sessions = state.sessions.read().await;
    let session = sessions.get(&id).ok_or(ApiError::SessionNotFound(id))?;
    let document = session.document.clone().ok_or(ApiError::NoDocument)?;

    Ok((
        [
            (header::CONTENT_TYPE, document.mime_type.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", document.file_name),
            ),
        ],
        document.bytes,
    ))
}
