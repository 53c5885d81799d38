use std::path::{Path, PathBuf};

use jdhub_import::{CommitError, ResolvedUser, UserSink};

/// Writes the commit payload to a JSON file for a downstream loader.
///
/// The file is replaced on every insert. Output is staged in a sibling
/// `.partial` file and renamed into place.
#[derive(Debug, Clone)]
pub struct JsonPayloadSink {
    path: PathBuf,
}

impl JsonPayloadSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn staging_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".partial");
        self.path.with_file_name(name)
    }
}

impl UserSink for JsonPayloadSink {
    fn insert_users(&mut self, users: &[ResolvedUser]) -> Result<usize, CommitError> {
        let json = serde_json::to_string_pretty(users)
            .map_err(|e| CommitError::Sink(format!("failed to encode payload: {e}")))?;

        let staging = self.staging_path();
        std::fs::write(&staging, json + "\n").map_err(|e| {
            CommitError::Sink(format!("cannot write {}: {e}", staging.display()))
        })?;
        std::fs::rename(&staging, &self.path).map_err(|e| {
            let _ = std::fs::remove_file(&staging);
            CommitError::Sink(format!("cannot write {}: {e}", self.path.display()))
        })?;

        tracing::debug!(path = %self.path.display(), users = users.len(), "wrote commit payload");
        Ok(users.len())
    }
}
