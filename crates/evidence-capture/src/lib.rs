//! Evidence collection for suspected hidden-ad content.
//!
//! Captures a snapshot of a suspect page, scans it for disclosure keywords
//! and monetization signals, optionally runs image-based disclosure analysis,
//! and stores the session-scoped artifacts (screenshot plus a metadata
//! sidecar). The browser and vision services are collaborators behind the
//! [`PageCapture`] and [`DisclosureVision`] traits; everything they report is
//! folded into a [`shared_types::Evidence`], never raised past this crate.

pub mod capture;
pub mod collector;
pub mod session;
pub mod signals;
pub mod vision;

pub use capture::{HttpCapture, PageCapture, PageSnapshot, CAPTURE_TIMEOUT};
pub use collector::collect_evidence;
pub use session::EvidenceStore;
pub use vision::{DisclosureVision, GeminiVision, VisionDisclosure, VisionError, VisionFinding};

/// Errors from the page-capture collaborator.
#[derive(Debug, thiserror::Error)]
pub enum CaptureFailure {
    /// An HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The target could not be navigated to (bad URL, non-success status).
    #[error("navigation failed: {0}")]
    Navigation(String),

    /// The page did not load within the capture budget.
    #[error("page load timed out after {0:?}")]
    Timeout(std::time::Duration),

    /// Writing a capture artifact failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
