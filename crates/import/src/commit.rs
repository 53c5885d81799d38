use serde::Serialize;
use thiserror::Error;

use crate::model::{BatchReport, ResolvedUser};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CommitError {
    #[error("no valid rows to import")]
    NothingToCommit,
    /// Storage failure, passed through verbatim.
    #[error("{0}")]
    Sink(String),
}

/// Storage collaborator that persists resolved users.
///
/// Implementations insert the whole slice or fail; rows are not
/// re-validated here, so conflicts that appeared after the snapshot was
/// loaded surface as a [`CommitError::Sink`].
pub trait UserSink {
    fn insert_users(&mut self, users: &[ResolvedUser]) -> Result<usize, CommitError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CommitOutcome {
    pub inserted: usize,
    pub skipped_invalid: usize,
}

/// Hand the valid subset of `report` to `sink`.
pub fn commit<S: UserSink + ?Sized>(
    report: &BatchReport,
    sink: &mut S,
) -> Result<CommitOutcome, CommitError> {
    let payload = report.commit_payload();
    if payload.is_empty() {
        return Err(CommitError::NothingToCommit);
    }

    let inserted = sink.insert_users(&payload)?;
    tracing::info!(inserted, skipped = report.summary.invalid, "import committed");

    Ok(CommitOutcome {
        inserted,
        skipped_invalid: report.summary.invalid,
    })
}
