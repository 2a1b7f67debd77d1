//! Error types for the report API.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use form_engine::RenderError;
use report_builder::ValidationError;
use serde_json::json;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("session not found: {0}")]
    SessionNotFound(Uuid),

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("no document has been generated for this session")]
    NoDocument,

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::SessionNotFound(id) => {
                (StatusCode::NOT_FOUND, format!("session not found: {id}"))
            }
            ApiError::InvalidRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ApiError::NoDocument => (StatusCode::NOT_FOUND, self.to_string()),
            ApiError::Validation(e) => (StatusCode::UNPROCESSABLE_ENTITY, e.to_string()),
            ApiError::Render(RenderError::Timeout(ms)) => (
                StatusCode::GATEWAY_TIMEOUT,
                format!("document rendering timed out after {ms} ms"),
            ),
            ApiError::Render(e) => {
                tracing::error!("render error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
            }
            ApiError::Internal(e) => {
                tracing::error!("internal error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "internal error".to_string())
            }
        };

        // Validation failures additionally list every missing field so the
        // caller can show one combined message.
        let body = match &self {
            ApiError::Validation(e) => json!({
                "error": message,
                "missing": e.missing,
                "status": status.as_u16(),
            }),
            _ => json!({
                "error": message,
                "status": status.as_u16(),
            }),
        };

        (status, Json(body)).into_response()
    }
}
