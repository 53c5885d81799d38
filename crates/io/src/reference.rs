use std::path::Path;

use jdhub_import::ReferenceSet;

use crate::error::IoError;

/// Load a reference snapshot (JSON object with `locations`, `departments`,
/// `teams`, `job_grades` and `users` arrays). Missing arrays are empty.
pub fn load_reference(path: &Path) -> Result<ReferenceSet, IoError> {
    let text = std::fs::read_to_string(path).map_err(|e| IoError::read(path, e))?;
    let set: ReferenceSet = serde_json::from_str(&text).map_err(|e| IoError::Reference {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    tracing::debug!(
        path = %path.display(),
        locations = set.locations.len(),
        departments = set.departments.len(),
        teams = set.teams.len(),
        users = set.users.len(),
        "loaded reference snapshot"
    );
    Ok(set)
}
