// Excel/ODS import sheets (xlsx, xlsm, xls, xlsb, ods)

use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader};
use jdhub_import::SourceRow;

use crate::error::IoError;
use crate::sheet::records_from_grid;

/// Read the first worksheet. The first non-empty row is the header.
pub fn read_rows(path: &Path) -> Result<Vec<SourceRow>, IoError> {
    let mut workbook = open_workbook_auto(path).map_err(|e| IoError::read(path, e))?;

    let Some(first) = workbook.sheet_names().first().cloned() else {
        return Err(IoError::NoSheets);
    };

    let range = workbook
        .worksheet_range(&first)
        .map_err(|e| IoError::Workbook(format!("sheet '{first}': {e}")))?;

    tracing::debug!(sheet = %first, size = ?range.get_size(), "reading import sheet");

    // calamine trims leading empty rows and columns, so the range may not
    // start at A1. Columns are padded back; rows above the header are dropped.
    let (start_row, start_col) = range.start().unwrap_or((0, 0));
    if start_row > 0 {
        tracing::debug!(sheet = %first, header_row = start_row + 1, "header is not on row 1");
    }

    let mut rows = range.rows();
    let pad = start_col as usize;
    let headers: Vec<String> = match rows.next() {
        Some(header) => vec![String::new(); pad]
            .into_iter()
            .chain(header.iter().map(|c| cell_text(c).trim().to_string()))
            .collect(),
        None => return Ok(Vec::new()),
    };

    let grid = rows
        .map(|row| {
            vec![String::new(); pad]
                .into_iter()
                .chain(row.iter().map(cell_text))
                .collect()
        })
        .collect();

    Ok(records_from_grid(&headers, grid))
}

/// Text form of a cell as a user would have typed it.
pub fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
        // Grades like 5 come back as 5.0; 1.1 stays 1.1
        Data::Float(n) if n.fract() == 0.0 && n.abs() < 1e15 => format!("{}", *n as i64),
        Data::Float(n) => format!("{n}"),
        Data::Int(n) => format!("{n}"),
        Data::Bool(b) => (if *b { "TRUE" } else { "FALSE" }).to_string(),
        Data::Error(e) => format!("#{e:?}"),
        Data::DateTime(dt) => format!("{}", dt.as_f64()),
    }
}
