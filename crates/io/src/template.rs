// Import template export (xlsx)

use std::path::Path;

use jdhub_import::template::{ImportTemplate, TemplateSheet};
use rust_xlsxwriter::{Format, Workbook, Worksheet, XlsxError};

use crate::error::IoError;

/// Write every template sheet to an xlsx workbook. Headers are bold and
/// frozen; all cells are text so grades like `1.1` are not coerced.
pub fn write_template(template: &ImportTemplate, path: &Path) -> Result<(), IoError> {
    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();

    for sheet in &template.sheets {
        let worksheet = workbook
            .add_worksheet()
            .set_name(&sheet.name)
            .map_err(|e| IoError::write(path, format!("sheet '{}': {e}", sheet.name)))?;
        write_sheet(worksheet, sheet, &header_format).map_err(|e| IoError::write(path, e))?;
    }

    workbook.save(path).map_err(|e| IoError::write(path, e))?;
    tracing::info!(path = %path.display(), sheets = template.sheets.len(), "wrote import template");
    Ok(())
}

fn write_sheet(worksheet: &mut Worksheet, sheet: &TemplateSheet, header: &Format) -> Result<(), XlsxError> {
    for (col, title) in sheet.headers.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, title, header)?;
    }
    for (row, cells) in sheet.rows.iter().enumerate() {
        for (col, value) in cells.iter().enumerate() {
            worksheet.write_string(row as u32 + 1, col as u16, value)?;
        }
    }
    for (col, width) in sheet.column_widths.iter().enumerate() {
        worksheet.set_column_width(col as u16, *width)?;
    }
    worksheet.set_freeze_panes(1, 0)?;
    Ok(())
}
