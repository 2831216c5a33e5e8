//! Per-request scratch files.
//!
//! Every upload and every OCR output gets its own uniquely named path so
//! concurrent requests never share a file. The file is removed when the
//! guard drops, whichever way the request ends.

use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use uuid::Uuid;

/// Owns a path under the scratch directory and deletes it on drop.
#[derive(Debug)]
pub struct ScratchFile {
    path: PathBuf,
}

impl ScratchFile {
    /// Reserve `<dir>/medrelay-<prefix>-<uuid><suffix>`. Nothing is created on disk.
    pub fn reserve(dir: &Path, prefix: &str, suffix: &str) -> Self {
        let name = format!("medrelay-{prefix}-{}{suffix}", Uuid::new_v4().simple());
        Self {
            path: dir.join(name),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create (or truncate) the file with `bytes`.
    pub async fn write(&self, bytes: &[u8]) -> io::Result<()> {
        tokio::fs::write(&self.path, bytes).await
    }
}

impl Drop for ScratchFile {
    fn drop(&mut self) {
        match std::fs::remove_file(&self.path) {
            Ok(()) => debug!(path = %self.path.display(), "Removed scratch file"),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Failed to remove scratch file")
            }
        }
    }
}
