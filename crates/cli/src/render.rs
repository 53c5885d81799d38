// Human-readable review output

use std::fmt::Write as _;

use jdhub_import::{BatchReport, BatchSummary, RowReport};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const COLUMNS: [(&str, usize); 6] = [
    ("ROW", 5),
    ("EMAIL", 28),
    ("NAME", 22),
    ("ROLE", 8),
    ("JG", 4),
    ("STATUS", 7),
];

/// One line per row; invalid rows are followed by their error messages.
pub fn review_table(report: &BatchReport) -> String {
    let mut out = String::new();
    push_line(&mut out, COLUMNS.map(|(title, _)| title.to_string()));
    for row in &report.rows {
        push_row(&mut out, row);
    }
    out
}

/// Only the rejected rows, for the commit log.
pub fn invalid_rows(report: &BatchReport) -> String {
    let mut out = String::new();
    for row in report.invalid_rows() {
        push_row(&mut out, row);
    }
    out
}

pub fn summary_line(summary: &BatchSummary) -> String {
    format!(
        "{} rows: {} valid, {} invalid",
        summary.total, summary.valid, summary.invalid
    )
}

fn push_row(out: &mut String, row: &RowReport) {
    let f = &row.fields;
    push_line(
        out,
        [
            row.row_number.to_string(),
            f.email.clone(),
            f.full_name.clone(),
            f.role.clone(),
            f.job_grade.clone(),
            if row.valid { "valid" } else { "invalid" }.to_string(),
        ],
    );
    for error in &row.errors {
        let _ = writeln!(out, "{}- {error}", " ".repeat(COLUMNS[0].1 + 2));
    }
}

fn push_line(out: &mut String, cells: [String; 6]) {
    let line = cells
        .iter()
        .zip(COLUMNS)
        .map(|(cell, (_, width))| fit(cell, width))
        .collect::<Vec<_>>()
        .join("  ");
    let _ = writeln!(out, "{}", line.trim_end());
}

/// Pad to exactly `width` display columns, cutting with ".." when longer.
fn fit(s: &str, width: usize) -> String {
    let used = UnicodeWidthStr::width(s);
    if used <= width {
        return format!("{s}{}", " ".repeat(width - used));
    }

    let budget = width.saturating_sub(2);
    let mut kept = String::new();
    let mut kept_width = 0;
    for ch in s.chars() {
        let cw = UnicodeWidthChar::width(ch).unwrap_or(0);
        if kept_width + cw > budget {
            break;
        }
        kept.push(ch);
        kept_width += cw;
    }
    let cut = format!("{kept}..");
    let cut_width = kept_width + 2;
    format!("{cut}{}", " ".repeat(width.saturating_sub(cut_width)))
}
