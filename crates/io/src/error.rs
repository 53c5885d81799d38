use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum IoError {
    #[error("cannot read {}: {message}", .path.display())]
    Read { path: PathBuf, message: String },
    #[error("unsupported file type: {0} (expected .xlsx, .xls, .xlsb, .ods, .csv or .tsv)")]
    UnsupportedFormat(String),
    #[error("workbook contains no sheets")]
    NoSheets,
    #[error("failed to read workbook: {0}")]
    Workbook(String),
    #[error("CSV error: {0}")]
    Csv(String),
    #[error("invalid reference snapshot {}: {message}", .path.display())]
    Reference { path: PathBuf, message: String },
    #[error("cannot write {}: {message}", .path.display())]
    Write { path: PathBuf, message: String },
}

impl IoError {
    pub(crate) fn read(path: &std::path::Path, err: impl ToString) -> Self {
        Self::Read { path: path.to_path_buf(), message: err.to_string() }
    }

    pub(crate) fn write(path: &std::path::Path, err: impl ToString) -> Self {
        Self::Write { path: path.to_path_buf(), message: err.to_string() }
    }
}
