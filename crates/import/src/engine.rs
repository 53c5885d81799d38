use crate::error::ImportError;
use crate::model::{BatchReport, SourceRow};
use crate::parse::parse_rows;
use crate::reference::ReferenceIndex;
use crate::report::build_report;

/// Parse, validate and report a batch of source rows.
///
/// An empty batch is rejected outright; any other input yields a report,
/// however many rows are invalid.
pub fn run(sources: &[SourceRow], index: &ReferenceIndex) -> Result<BatchReport, ImportError> {
    if sources.is_empty() {
        return Err(ImportError::EmptyInput);
    }

    let rows = parse_rows(sources);
    let report = build_report(&rows, index);

    tracing::info!(
        total = report.summary.total,
        valid = report.summary.valid,
        invalid = report.summary.invalid,
        "import batch reviewed"
    );

    Ok(report)
}
