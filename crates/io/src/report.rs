// Review report export (CSV)

use std::path::Path;

use jdhub_import::{BatchReport, RowReport};

use crate::error::IoError;

pub const REPORT_COLUMNS: [&str; 10] = [
    "row",
    "email",
    "full_name",
    "role",
    "job_grade",
    "types_name",
    "department_name",
    "team_name",
    "valid",
    "errors",
];

/// One line per input row, in input order.
pub fn write_report_csv(report: &BatchReport, path: &Path) -> Result<(), IoError> {
    let mut writer = csv::Writer::from_path(path).map_err(|e| IoError::write(path, e))?;

    writer
        .write_record(REPORT_COLUMNS)
        .map_err(|e| IoError::write(path, e))?;
    for row in &report.rows {
        writer
            .write_record(report_record(row))
            .map_err(|e| IoError::write(path, e))?;
    }
    writer.flush().map_err(|e| IoError::write(path, e))?;

    tracing::info!(path = %path.display(), rows = report.rows.len(), "wrote review report");
    Ok(())
}

fn report_record(row: &RowReport) -> [String; 10] {
    let f = &row.fields;
    [
        row.row_number.to_string(),
        f.email.clone(),
        f.full_name.clone(),
        f.role.clone(),
        f.job_grade.clone(),
        f.location_name.clone(),
        f.department_name.clone(),
        f.team_name.clone(),
        row.valid.to_string(),
        row.errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; "),
    ]
}
