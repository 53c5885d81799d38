use std::path::Path;

use jdhub_import::SourceRow;

use crate::error::IoError;

/// Source format of an import sheet, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetFormat {
    Workbook,
    Csv,
    Tsv,
}

impl SheetFormat {
    pub fn from_path(path: &Path) -> Result<Self, IoError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase)
            .unwrap_or_default();

        match ext.as_str() {
            "xlsx" | "xlsm" | "xls" | "xlsb" | "ods" => Ok(Self::Workbook),
            "csv" | "txt" => Ok(Self::Csv),
            "tsv" => Ok(Self::Tsv),
            _ => Err(IoError::UnsupportedFormat(if ext.is_empty() {
                path.display().to_string()
            } else {
                format!(".{ext}")
            })),
        }
    }
}

/// Read an import sheet into header-keyed records.
pub fn read_rows(path: &Path) -> Result<Vec<SourceRow>, IoError> {
    let format = SheetFormat::from_path(path)?;
    let rows = match format {
        SheetFormat::Workbook => crate::xlsx::read_rows(path)?,
        SheetFormat::Csv => crate::csv::read_rows(path)?,
        SheetFormat::Tsv => crate::csv::read_tsv_rows(path)?,
    };
    tracing::info!(path = %path.display(), ?format, rows = rows.len(), "read import sheet");
    Ok(rows)
}

/// Key each data row by header. Rows with no content are dropped, as are
/// blank cells and cells under a blank header. A repeated header keeps its
/// first column.
pub(crate) fn records_from_grid(headers: &[String], grid: Vec<Vec<String>>) -> Vec<SourceRow> {
    grid.into_iter()
        .filter(|cells| cells.iter().any(|c| !c.trim().is_empty()))
        .map(|cells| {
            let mut record = SourceRow::new();
            for (header, cell) in headers.iter().zip(cells) {
                if header.is_empty() || cell.trim().is_empty() {
                    continue;
                }
                record.entry(header.clone()).or_insert(cell);
            }
            record
        })
        .collect()
}
