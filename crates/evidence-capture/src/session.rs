//! Session-scoped evidence storage.
//!
//! Artifacts live under the process temp dir, namespaced per capture by
//! domain and timestamp. Nothing is written to durable cross-session
//! storage; paths are only ever read back within the owning session.

use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use shared_types::Evidence;

/// File-system home for one process's evidence and output artifacts.
#[derive(Debug, Clone)]
pub struct EvidenceStore {
    root: PathBuf,
}

impl EvidenceStore {
    /// Store rooted in the process temp dir.
    pub fn new() -> Self {
        Self::at(std::env::temp_dir().join("ad-report-evidence"))
    }

    /// Store rooted at an explicit path (tests, per-session roots).
    pub fn at(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Directory for one capture attempt: `<root>/<domain>_<timestamp>/`.
    pub fn capture_dir(&self, url: &str, at: DateTime<Utc>) -> io::Result<PathBuf> {
        let dir = self.root.join(capture_slug(url, at));
        std::fs::create_dir_all(&dir)?;
        Ok(dir)
    }

    /// Persist the captured screenshot next to its metadata.
    pub fn write_screenshot(
        &self,
        dir: &Path,
        url: &str,
        at: DateTime<Utc>,
        png: &[u8],
    ) -> io::Result<PathBuf> {
        let path = dir.join(format!("evidence_{}.png", capture_slug(url, at)));
        std::fs::write(&path, png)?;
        Ok(path)
    }

    /// Persist a manually uploaded screenshot, keeping upload order in the
    /// file name.
    pub fn write_upload(
        &self,
        dir: &Path,
        index: usize,
        original_name: &str,
        bytes: &[u8],
    ) -> io::Result<PathBuf> {
        let safe_name = sanitize_file_name(original_name);
        let path = dir.join(format!("manual_screenshot_{index}_{safe_name}"));
        std::fs::write(&path, bytes)?;
        Ok(path)
    }

    /// Metadata sidecar for a capture. Excludes the page text: the sidecar
    /// is a capture log, not a content archive.
    pub fn write_metadata(&self, dir: &Path, evidence: &Evidence) -> io::Result<PathBuf> {
        let mut value = serde_json::to_value(evidence)?;
        if let Some(map) = value.as_object_mut() {
            map.remove("page_text");
        }
        let path = dir.join(format!(
            "metadata_{}.json",
            capture_slug(&evidence.source_url, evidence.captured_at)
        ));
        std::fs::write(&path, serde_json::to_string_pretty(&value)?)?;
        Ok(path)
    }

    /// Directory for one session's manually uploaded screenshots.
    pub fn upload_dir(&self, session: &str) -> io::Result<PathBuf> {
        let dir = self.root.join(format!("uploads_{}", sanitize_file_name(session)));
        std::fs::create_dir_all(&dir)?;
        Ok(dir)
    }

    /// Directory for generated complaint documents.
    pub fn output_dir(&self) -> io::Result<PathBuf> {
        let dir = self.root.join("output");
        std::fs::create_dir_all(&dir)?;
        Ok(dir)
    }
}

impl Default for EvidenceStore {
    fn default() -> Self {
        Self::new()
    }
}

/// `<domain>_<yyyymmdd_hhmmss>` with dots flattened, mirroring the artifact
/// naming users see in their downloads.
fn capture_slug(url: &str, at: DateTime<Utc>) -> String {
    let domain = reqwest::Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(|h| h.replace('.', "_")))
        .unwrap_or_else(|| "unknown".to_string());
    format!("{domain}_{}", at.format("%Y%m%d_%H%M%S"))
}

fn sanitize_file_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();
    if cleaned.is_empty() {
        "upload.png".to_string()
    } else {
        cleaned
    }
}
