use std::collections::HashMap;

use serde::{Serialize, Serializer};
use thiserror::Error;

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// One source row as handed over by the file layer: column name → raw text.
pub type SourceRow = HashMap<String, String>;

/// A parsed but unvalidated row. Every field is trimmed; `role` is lowercased.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RawRow {
    /// 1-based spreadsheet row (header is row 1). Only used in messages.
    #[serde(skip)]
    pub row_number: usize,
    pub email: String,
    pub full_name: String,
    pub role: String,
    pub job_grade: String,
    pub location_name: String,
    pub department_name: String,
    pub team_name: String,
}

// ---------------------------------------------------------------------------
// Fields + enumerations
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Email,
    FullName,
    Role,
    JobGrade,
    Location,
    Department,
    Team,
}

impl Field {
    /// Spreadsheet column this field is read from.
    pub fn column(&self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::FullName => "full_name",
            Self::Role => "role",
            Self::JobGrade => "job_grade",
            Self::Location => "types_name",
            Self::Department => "department_name",
            Self::Team => "team_name",
        }
    }

    /// Human label used in error messages.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::FullName => "full name",
            Self::Role => "role",
            Self::JobGrade => "job grade",
            Self::Location => "location",
            Self::Department => "department",
            Self::Team => "team",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Manager,
    Viewer,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Admin, Role::Manager, Role::Viewer];

    /// Parse an already-lowercased label.
    pub fn parse(label: &str) -> Option<Self> {
        match label {
            "admin" => Some(Self::Admin),
            "manager" => Some(Self::Manager),
            "viewer" => Some(Self::Viewer),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Manager => "manager",
            Self::Viewer => "viewer",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Job grade. `Ungraded` is the explicit "no grade" value and is what a
/// blank cell resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum JobGrade {
    #[default]
    Ungraded,
    Jg11,
    Jg12,
    Jg21,
    Jg22,
    Jg31,
    Jg32,
    Jg5,
}

impl JobGrade {
    /// Every grade that carries a label, in display order.
    pub const GRADED: [JobGrade; 7] = [
        JobGrade::Jg11,
        JobGrade::Jg12,
        JobGrade::Jg21,
        JobGrade::Jg22,
        JobGrade::Jg31,
        JobGrade::Jg32,
        JobGrade::Jg5,
    ];

    /// Parse a trimmed cell value. Blank is `Ungraded`; unknown labels are `None`.
    pub fn parse(label: &str) -> Option<Self> {
        if label.is_empty() {
            return Some(Self::Ungraded);
        }
        Self::GRADED.into_iter().find(|g| g.label() == Some(label))
    }

    pub fn label(&self) -> Option<&'static str> {
        match self {
            Self::Ungraded => None,
            Self::Jg11 => Some("1.1"),
            Self::Jg12 => Some("1.2"),
            Self::Jg21 => Some("2.1"),
            Self::Jg22 => Some("2.2"),
            Self::Jg31 => Some("3.1"),
            Self::Jg32 => Some("3.2"),
            Self::Jg5 => Some("5"),
        }
    }

    /// Comma-separated list of accepted labels, for messages and templates.
    pub fn accepted_labels() -> String {
        Self::GRADED
            .iter()
            .filter_map(|g| g.label())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl Serialize for JobGrade {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.label() {
            Some(label) => serializer.serialize_str(label),
            None => serializer.serialize_none(),
        }
    }
}

// ---------------------------------------------------------------------------
// Validation output
// ---------------------------------------------------------------------------

/// Error taxonomy bucket, independent of which field raised it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorClass {
    Required,
    Malformed,
    NotFound,
    Duplicate,
}

/// A single row-level problem. These are data, never propagated with `?`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("{} is required", .0.label())]
    Required(Field),
    #[error("invalid email format: {value}")]
    MalformedEmail { value: String },
    #[error("email already registered: {value}")]
    DuplicateEmail { value: String },
    #[error("invalid role '{value}' (expected: admin, manager, viewer)")]
    InvalidRole { value: String },
    #[error("invalid job grade '{value}' (expected: {})", JobGrade::accepted_labels())]
    InvalidJobGrade { value: String },
    #[error("location not found: {name}")]
    LocationNotFound { name: String },
    #[error("department not found: {name}")]
    DepartmentNotFound { name: String },
    #[error("team not found: {team} in department: {department}")]
    TeamNotFound { team: String, department: String },
}

impl FieldError {
    pub fn field(&self) -> Field {
        match self {
            Self::Required(field) => *field,
            Self::MalformedEmail { .. } | Self::DuplicateEmail { .. } => Field::Email,
            Self::InvalidRole { .. } => Field::Role,
            Self::InvalidJobGrade { .. } => Field::JobGrade,
            Self::LocationNotFound { .. } => Field::Location,
            Self::DepartmentNotFound { .. } => Field::Department,
            Self::TeamNotFound { .. } => Field::Team,
        }
    }

    pub fn class(&self) -> ErrorClass {
        match self {
            Self::Required(_) => ErrorClass::Required,
            Self::MalformedEmail { .. } => ErrorClass::Malformed,
            Self::DuplicateEmail { .. } => ErrorClass::Duplicate,
            Self::InvalidRole { .. }
            | Self::InvalidJobGrade { .. }
            | Self::LocationNotFound { .. }
            | Self::DepartmentNotFound { .. }
            | Self::TeamNotFound { .. } => ErrorClass::NotFound,
        }
    }
}

// Reports carry errors as their rendered message.
impl Serialize for FieldError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A fully resolved, importable user. Only built for rows with no errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedUser {
    pub email: String,
    pub full_name: String,
    pub role: Role,
    pub job_grade: JobGrade,
    pub location_id: String,
    pub department_id: String,
    pub team_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    pub errors: Vec<FieldError>,
    pub resolved: Option<ResolvedUser>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Report
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct RowReport {
    pub row_number: usize,
    pub fields: RawRow,
    pub valid: bool,
    pub errors: Vec<FieldError>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolved: Option<ResolvedUser>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    pub total: usize,
    pub valid: usize,
    pub invalid: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportMeta {
    pub engine_version: String,
    pub generated_at: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    pub meta: ReportMeta,
    pub summary: BatchSummary,
    pub rows: Vec<RowReport>,
}

impl BatchReport {
    /// Resolved users for every valid row, in input order.
    pub fn commit_payload(&self) -> Vec<ResolvedUser> {
        self.rows.iter().filter_map(|r| r.resolved.clone()).collect()
    }

    pub fn invalid_rows(&self) -> impl Iterator<Item = &RowReport> {
        self.rows.iter().filter(|r| !r.valid)
    }

    /// True when every row passed validation.
    pub fn is_clean(&self) -> bool {
        self.summary.invalid == 0
    }
}
