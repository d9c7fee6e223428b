//! Removal of uploaded assets once their owning session has ended.

use std::path::Path;
use tracing::{debug, warn};

/// Deletes the uploaded asset belonging to a finished session.
///
/// A missing file counts as success. Other failures are logged and
/// swallowed; there is no caller that could act on them.
pub async fn remove_upload(path: &Path) {
    match tokio::fs::remove_file(path).await {
        Ok(()) => debug!("Removed uploaded asset {}", path.display()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!("Uploaded asset {} already absent", path.display());
        }
        Err(e) => warn!("Failed to remove uploaded asset {}: {}", path.display(), e),
    }
}
