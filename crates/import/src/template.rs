//! Downloadable import template: sample rows plus reference sheets listing
//! the values the validator accepts.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::model::{JobGrade, Role};
use crate::parse::TEMPLATE_COLUMNS;
use crate::reference::{NamedEntry, ReferenceSet};

pub const USERS_SHEET: &str = "Users";
pub const VALID_VALUES_SHEET: &str = "Valid Values";
pub const TEAMS_SHEET: &str = "Teams by Department";

static GRADE_LABEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"JG (\d+\.?\d*)").expect("grade label pattern compiles"));

/// Names used in the sample rows when the snapshot has no entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateDefaults {
    pub location: String,
    pub department: String,
    pub team: String,
}

impl Default for TemplateDefaults {
    fn default() -> Self {
        Self {
            location: "Back Office".into(),
            department: "IT".into(),
            team: "Development".into(),
        }
    }
}

/// One worksheet worth of plain text cells.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TemplateSheet {
    pub name: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
    /// Character widths per column.
    pub column_widths: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImportTemplate {
    pub sheets: Vec<TemplateSheet>,
}

impl ImportTemplate {
    pub fn from_reference(reference: &ReferenceSet, defaults: &TemplateDefaults) -> Self {
        let mut sheets = vec![users_sheet(reference, defaults), valid_values_sheet(reference)];
        if !reference.teams.is_empty() {
            sheets.push(teams_sheet(reference));
        }
        Self { sheets }
    }

    pub fn sheet(&self, name: &str) -> Option<&TemplateSheet> {
        self.sheets.iter().find(|s| s.name == name)
    }
}

fn users_sheet(reference: &ReferenceSet, defaults: &TemplateDefaults) -> TemplateSheet {
    let location = first_name(&reference.locations).unwrap_or(defaults.location.as_str());
    let department = first_name(&reference.departments).unwrap_or(defaults.department.as_str());
    let team = reference
        .teams
        .first()
        .map(|t| t.name.as_str())
        .unwrap_or(defaults.team.as_str());

    let samples = [
        ("somchai@example.com", "Somchai Jaidee", Role::Viewer, JobGrade::Jg11),
        ("somying@example.com", "Somying Rakrian", Role::Manager, JobGrade::Jg21),
        ("admin@example.com", "System Admin", Role::Admin, JobGrade::Jg31),
    ];

    let rows = samples
        .iter()
        .map(|(email, name, role, grade)| {
            vec![
                email.to_string(),
                name.to_string(),
                role.as_str().to_string(),
                grade.label().unwrap_or_default().to_string(),
                location.to_string(),
                department.to_string(),
                team.to_string(),
            ]
        })
        .collect();

    TemplateSheet {
        name: USERS_SHEET.into(),
        headers: TEMPLATE_COLUMNS.iter().map(|f| f.column().to_string()).collect(),
        rows,
        column_widths: vec![25.0, 20.0, 10.0, 10.0, 20.0, 20.0, 20.0],
    }
}

fn valid_values_sheet(reference: &ReferenceSet) -> TemplateSheet {
    let roles = Role::ALL.iter().map(|r| r.as_str()).collect::<Vec<_>>().join(", ");

    let rows = vec![
        vec!["role".to_string(), roles],
        vec![
            "job_grade".to_string(),
            format!("{} (or leave blank)", job_grade_listing(&reference.job_grades)),
        ],
        vec!["types_name".to_string(), name_listing(&reference.locations)],
        vec!["department_name".to_string(), name_listing(&reference.departments)],
        vec![
            "team_name".to_string(),
            format!("depends on department - see {TEAMS_SHEET}"),
        ],
    ];

    TemplateSheet {
        name: VALID_VALUES_SHEET.into(),
        headers: vec!["column".into(), "valid_values".into()],
        rows,
        column_widths: vec![20.0, 60.0],
    }
}

fn teams_sheet(reference: &ReferenceSet) -> TemplateSheet {
    let rows = reference
        .teams
        .iter()
        .map(|t| {
            vec![
                reference
                    .department_name(&t.department_id)
                    .unwrap_or("Unknown")
                    .to_string(),
                t.name.clone(),
            ]
        })
        .collect();

    TemplateSheet {
        name: TEAMS_SHEET.into(),
        headers: vec!["department_name".into(), "team_name".into()],
        rows,
        column_widths: vec![25.0, 25.0],
    }
}

fn first_name(entries: &[NamedEntry]) -> Option<&str> {
    entries.first().map(|e| e.name.as_str())
}

fn name_listing(entries: &[NamedEntry]) -> String {
    if entries.is_empty() {
        return "(none)".into();
    }
    entries.iter().map(|e| e.name.as_str()).collect::<Vec<_>>().join(", ")
}

/// Grade labels from reference names like `JG 2.1 Senior`; falls back to the
/// raw name, and to the fixed list when the snapshot has no grades.
pub fn job_grade_listing(grades: &[NamedEntry]) -> String {
    if grades.is_empty() {
        return JobGrade::accepted_labels();
    }
    grades
        .iter()
        .map(|g| {
            GRADE_LABEL
                .captures(&g.name)
                .and_then(|c| c.get(1))
                .map_or(g.name.as_str(), |m| m.as_str())
        })
        .collect::<Vec<_>>()
        .join(", ")
}
