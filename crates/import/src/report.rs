use crate::model::{BatchReport, BatchSummary, RawRow, ReportMeta, RowReport};
use crate::reference::ReferenceIndex;
use crate::validate::validate_row;

/// Validate every row and assemble the review report, preserving input order.
pub fn build_report(rows: &[RawRow], index: &ReferenceIndex) -> BatchReport {
    let rows: Vec<RowReport> = rows
        .iter()
        .map(|raw| {
            let result = validate_row(raw, index);
            if !result.is_valid() {
                tracing::debug!(row = raw.row_number, errors = result.errors.len(), "row rejected");
            }
            RowReport {
                row_number: raw.row_number,
                fields: raw.clone(),
                valid: result.is_valid(),
                errors: result.errors,
                resolved: result.resolved,
            }
        })
        .collect();

    let summary = compute_summary(&rows);

    BatchReport {
        meta: ReportMeta {
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            generated_at: chrono::Utc::now().to_rfc3339(),
        },
        summary,
        rows,
    }
}

pub fn compute_summary(rows: &[RowReport]) -> BatchSummary {
    let valid = rows.iter().filter(|r| r.valid).count();
    BatchSummary {
        total: rows.len(),
        valid,
        invalid: rows.len() - valid,
    }
}
