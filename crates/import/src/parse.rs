use crate::model::{Field, RawRow, SourceRow};

/// Columns of the import sheet, in template order.
pub const TEMPLATE_COLUMNS: [Field; 7] = [
    Field::Email,
    Field::FullName,
    Field::Role,
    Field::JobGrade,
    Field::Location,
    Field::Department,
    Field::Team,
];

/// Row 1 of the sheet is the header, so data index 0 is row 2.
pub const FIRST_DATA_ROW: usize = 2;

/// Extract the import fields from one source row. Never fails: missing
/// columns become empty strings and are left for the validator to reject.
pub fn parse_row(index: usize, source: &SourceRow) -> RawRow {
    let cell = |field: Field| -> String {
        source
            .get(field.column())
            .map(|v| v.trim().to_string())
            .unwrap_or_default()
    };

    RawRow {
        row_number: index + FIRST_DATA_ROW,
        email: cell(Field::Email),
        full_name: cell(Field::FullName),
        role: cell(Field::Role).to_lowercase(),
        job_grade: cell(Field::JobGrade),
        location_name: cell(Field::Location),
        department_name: cell(Field::Department),
        team_name: cell(Field::Team),
    }
}

pub fn parse_rows(sources: &[SourceRow]) -> Vec<RawRow> {
    sources
        .iter()
        .enumerate()
        .map(|(i, s)| parse_row(i, s))
        .collect()
}
