//! Application state: session-isolated pipeline data.
//!
//! Sessions are in-memory only. Evidence, classification, screenshots, and
//! the rendered document live exactly as long as their session; deleting the
//! session (or stopping the process) discards everything.

use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::Result;
use chrono::{DateTime, Utc};
use evidence_capture::{EvidenceStore, GeminiVision, HttpCapture};
use shared_types::{Classification, Evidence};
use tokio::sync::RwLock;
use uuid::Uuid;

pub struct AppState {
    pub sessions: RwLock<HashMap<Uuid, SessionState>>,
    pub capture: HttpCapture,
    pub vision: Option<GeminiVision>,
    pub store: EvidenceStore,
}

impl AppState {
    pub fn new() -> Result<Self> {
        let vision = match GeminiVision::from_env() {
            Ok(vision) => Some(vision),
            Err(_) => {
                tracing::info!("no vision credential configured; image analysis disabled");
                None
            }
        };

        Ok(Self {
            sessions: RwLock::new(HashMap::new()),
            capture: HttpCapture::new()?,
            vision,
            store: EvidenceStore::new(),
        })
    }
}

/// One user's complaint-in-progress.
#[derive(Default)]
pub struct SessionState {
    pub created_at: DateTime<Utc>,
    /// Latest capture; replaced wholesale by a new capture.
    pub evidence: Option<Evidence>,
    pub classification: Option<Classification>,
    /// Manually uploaded screenshots, upload order.
    pub manual_screenshots: Vec<PathBuf>,
    /// Last rendered document, ready for download.
    pub document: Option<StoredDocument>,
}

impl SessionState {
    pub fn new() -> Self {
        Self {
            created_at: Utc::now(),
            ..Default::default()
        }
    }

    /// A fresh capture supersedes the previous evidence, its classification,
    /// and any document rendered from them.
    pub fn replace_capture(&mut self, evidence: Evidence, classification: Classification) {
        self.evidence = Some(evidence);
        self.classification = Some(classification);
        self.document = None;
    }
}

#[derive(Clone)]
pub struct StoredDocument {
    pub bytes: Vec<u8>,
    pub mime_type: &'static str,
    pub page_count: usize,
    pub file_name: String,
}
