//! Request/response models for the report API.

use chrono::{DateTime, Utc};
use form_engine::OutputFormat;
use report_builder::ViolationInput;
use serde::{Deserialize, Serialize};
use shared_types::{Classification, Evidence, LayoutVariant, Reporter, Respondent};
use uuid::Uuid;

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct CaptureRequest {
    pub url: String,
}

/// Current pipeline state for one session.
#[derive(Debug, Serialize)]
pub struct EvidenceResponse {
    pub evidence: Option<Evidence>,
    pub classification: Option<Classification>,
    /// Prefill for the user-editable violation description: recommendation
    /// text followed by the detected-indicator block.
    pub suggested_description: String,
    pub manual_screenshots: usize,
    pub has_document: bool,
}

#[derive(Debug, Deserialize)]
pub struct UploadScreenshotsRequest {
    pub screenshots: Vec<UploadedScreenshot>,
}

#[derive(Debug, Deserialize)]
pub struct UploadedScreenshot {
    pub filename: String,
    pub data_base64: String,
}

#[derive(Debug, Serialize)]
pub struct UploadScreenshotsResponse {
    pub stored: usize,
}

#[derive(Debug, Deserialize)]
pub struct GenerateReportRequest {
    pub reporter: Reporter,
    pub respondent: Respondent,
    pub violation: ViolationInput,
    pub variant: LayoutVariant,
    #[serde(default)]
    pub format: OutputFormat,
}

#[derive(Debug, Serialize)]
pub struct GenerateReportResponse {
    pub file_name: String,
    pub mime_type: &'static str,
    pub page_count: usize,
    /// Plain-text complaint summary for pasting into the regulator portal.
    pub complaint_text: String,
}
