//! Scoped on-disk staging for uploaded documents.
//!
//! A `StagedUpload` owns its temp file: the file is removed when the value is
//! dropped, so every exit path of a session cleans up after itself. Paths are
//! keyed by the session id, never by the client-supplied filename alone.

use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::{debug, warn};
use uuid::Uuid;

const MAX_FILENAME_CHARS: usize = 100;
const FALLBACK_FILENAME: &str = "upload.pdf";

pub struct StagedUpload {
    session_id: Uuid,
    file: NamedTempFile,
}

impl StagedUpload {
    /// Writes `bytes` to `<dir>/<session_id>-<filename>`, creating `dir` if needed.
    pub fn persist(
        dir: &Path,
        session_id: Uuid,
        filename: &str,
        bytes: &[u8],
    ) -> std::io::Result<Self> {
        std::fs::create_dir_all(dir)?;

        let mut file = tempfile::Builder::new()
            .prefix(&session_id.to_string())
            .suffix(&format!("-{}", sanitize_filename(filename)))
            .rand_bytes(0)
            .tempfile_in(dir)?;
        file.write_all(bytes)?;
        file.flush()?;

        debug!(
            "Session {session_id}: staged {} bytes at {}",
            bytes.len(),
            file.path().display()
        );

        Ok(Self { session_id, file })
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Deletes the staged file now, logging instead of failing if it cannot be removed.
    pub fn remove(self) {
        let session_id = self.session_id;
        match self.file.close() {
            Ok(()) => debug!("Session {session_id}: staged upload removed"),
            Err(e) => warn!("Session {session_id}: failed to remove staged upload: {e}"),
        }
    }
}

/// Reduces a client-supplied filename to a safe single path component.
fn sanitize_filename(name: &str) -> String {
    let base = name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default()
        .trim();

    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .take(MAX_FILENAME_CHARS)
        .collect();

    if cleaned.trim_matches('.').is_empty() {
        FALLBACK_FILENAME.to_string()
    } else {
        cleaned
    }
}
