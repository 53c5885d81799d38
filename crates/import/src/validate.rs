use std::sync::LazyLock;

use regex::Regex;

use crate::model::{Field, FieldError, JobGrade, RawRow, ResolvedUser, Role, ValidationResult};
use crate::reference::{NamedEntry, ReferenceIndex, TeamEntry};

/// `local@domain.tld`, no whitespace, exactly one `@`.
static EMAIL_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"));

/// Validate one row against the reference snapshot and resolve its names to ids.
///
/// Every field is checked independently and all errors are kept, in field
/// order. Within a single field only the first failing check is reported.
/// The team lookup only runs once the department resolved; a blank team is
/// reported as required either way.
pub fn validate_row(row: &RawRow, index: &ReferenceIndex) -> ValidationResult {
    let email = check_email(&row.email, index);
    let full_name = required(Field::FullName, &row.full_name);
    let role = check_role(&row.role);
    let job_grade = check_job_grade(&row.job_grade);
    let location = check_location(&row.location_name, index);
    let department = check_department(&row.department_name, index);
    let team = check_team(
        &row.team_name,
        department.as_ref().ok().copied(),
        &row.department_name,
        index,
    );

    let mut errors = Vec::new();
    let email = keep(email, &mut errors);
    let full_name = keep(full_name, &mut errors);
    let role = keep(role, &mut errors);
    let job_grade = keep(job_grade, &mut errors);
    let location = keep(location, &mut errors);
    let department = keep(department, &mut errors);
    let team = keep(team, &mut errors).flatten();

    let resolved = match (email, full_name, role, job_grade, location, department, team) {
        (Some(email), Some(full_name), Some(role), Some(job_grade), Some(loc), Some(dep), Some(team))
            if errors.is_empty() =>
        {
            Some(ResolvedUser {
                email: email.to_string(),
                full_name: full_name.to_string(),
                role,
                job_grade,
                location_id: loc.id.clone(),
                department_id: dep.id.clone(),
                team_id: team.id.clone(),
            })
        }
        _ => None,
    };

    ValidationResult { errors, resolved }
}

fn keep<T>(check: Result<T, FieldError>, errors: &mut Vec<FieldError>) -> Option<T> {
    match check {
        Ok(value) => Some(value),
        Err(e) => {
            errors.push(e);
            None
        }
    }
}

fn required(field: Field, value: &str) -> Result<&str, FieldError> {
    if value.is_empty() {
        Err(FieldError::Required(field))
    } else {
        Ok(value)
    }
}

fn check_email<'a>(value: &'a str, index: &ReferenceIndex) -> Result<&'a str, FieldError> {
    let email = required(Field::Email, value)?;
    if !EMAIL_SHAPE.is_match(email) {
        return Err(FieldError::MalformedEmail { value: email.into() });
    }
    if index.is_registered(email) {
        return Err(FieldError::DuplicateEmail { value: email.into() });
    }
    Ok(email)
}

fn check_role(value: &str) -> Result<Role, FieldError> {
    let label = required(Field::Role, value)?;
    Role::parse(label).ok_or_else(|| FieldError::InvalidRole { value: label.into() })
}

fn check_job_grade(value: &str) -> Result<JobGrade, FieldError> {
    JobGrade::parse(value).ok_or_else(|| FieldError::InvalidJobGrade { value: value.into() })
}

fn check_location<'i>(value: &str, index: &'i ReferenceIndex) -> Result<&'i NamedEntry, FieldError> {
    let name = required(Field::Location, value)?;
    index
        .location(name)
        .ok_or_else(|| FieldError::LocationNotFound { name: name.into() })
}

fn check_department<'i>(
    value: &str,
    index: &'i ReferenceIndex,
) -> Result<&'i NamedEntry, FieldError> {
    let name = required(Field::Department, value)?;
    index
        .department(name)
        .ok_or_else(|| FieldError::DepartmentNotFound { name: name.into() })
}

/// `Ok(None)` means the lookup was skipped because the department did not resolve.
fn check_team<'i>(
    value: &str,
    department: Option<&NamedEntry>,
    department_label: &str,
    index: &'i ReferenceIndex,
) -> Result<Option<&'i TeamEntry>, FieldError> {
    let name = required(Field::Team, value)?;
    let Some(department) = department else {
        return Ok(None);
    };
    index
        .team(&department.id, name)
        .map(Some)
        .ok_or_else(|| FieldError::TeamNotFound {
            team: name.into(),
            department: department_label.into(),
        })
}
