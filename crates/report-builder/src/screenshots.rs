//! Primary-screenshot selection policy.

use std::path::{Path, PathBuf};

/// Designate exactly one primary screenshot.
///
/// The automatically captured screenshot wins if it is present and its file
/// still exists on disk; otherwise the first manual upload is promoted. All
/// remaining screenshots become extras, preserving upload order — the order
/// is directly visible in the generated document.
pub fn select_screenshots(
    auto: Option<&Path>,
    manual: &[PathBuf],
) -> (Option<PathBuf>, Vec<PathBuf>) {
    match auto {
        Some(path) if path.exists() => (Some(path.to_path_buf()), manual.to_vec()),
        _ => match manual.split_first() {
            Some((first, rest)) => (Some(first.clone()), rest.to_vec()),
            None => (None, Vec::new()),
        },
    }
}
