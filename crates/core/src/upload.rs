//! Naming of uploaded assets.

use chrono::Utc;
use std::path::Path;

/// Builds the on-disk file name for an uploaded asset.
///
/// The capture timestamp makes consecutive uploads of the same file
/// distinct; only the final path component of the client-supplied name is
/// kept, so a crafted name cannot escape the upload directory.
pub fn stored_filename(original_name: &str) -> String {
    let base = Path::new(original_name)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "upload".to_string());
    format!("video_{}_{}", Utc::now().timestamp_millis(), base)
}
