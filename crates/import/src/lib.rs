//! `jdhub-import`: Bulk user import validation and reconciliation.
//!
//! Pure pipeline crate: receives pre-loaded rows and a reference snapshot,
//! returns a review report and the importable subset.
//! No CLI or file IO dependencies.

pub mod commit;
pub mod engine;
pub mod error;
pub mod model;
pub mod parse;
pub mod reference;
pub mod report;
pub mod template;
pub mod validate;

pub use commit::{commit, CommitError, CommitOutcome, UserSink};
pub use engine::run;
pub use error::ImportError;
pub use model::{
    BatchReport, BatchSummary, FieldError, JobGrade, RawRow, ResolvedUser, Role, RowReport,
    SourceRow, ValidationResult,
};
pub use reference::{ReferenceIndex, ReferenceSet};
pub use template::{ImportTemplate, TemplateDefaults};
