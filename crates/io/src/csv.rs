// CSV/TSV import sheets

use std::path::Path;

use jdhub_import::SourceRow;

use crate::error::IoError;
use crate::sheet::records_from_grid;

pub fn read_rows(path: &Path) -> Result<Vec<SourceRow>, IoError> {
    let content = read_file_as_utf8(path)?;
    let delimiter = sniff_delimiter(&content);
    rows_from_str(&content, delimiter)
}

pub fn read_tsv_rows(path: &Path) -> Result<Vec<SourceRow>, IoError> {
    let content = read_file_as_utf8(path)?;
    rows_from_str(&content, b'\t')
}

/// Parse delimited text whose first record is the header.
pub fn rows_from_str(content: &str, delimiter: u8) -> Result<Vec<SourceRow>, IoError> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .from_reader(content.as_bytes());

    let mut records = reader.records();
    let headers: Vec<String> = match records.next() {
        Some(header) => header
            .map_err(|e| IoError::Csv(e.to_string()))?
            .iter()
            .map(|h| h.trim().to_string())
            .collect(),
        None => return Ok(Vec::new()),
    };

    let mut grid = Vec::new();
    for record in records {
        let record = record.map_err(|e| IoError::Csv(e.to_string()))?;
        grid.push(record.iter().map(str::to_string).collect::<Vec<_>>());
    }

    Ok(records_from_grid(&headers, grid))
}

/// Pick the delimiter for a delimited import sheet.
///
/// Every candidate parses the first few records. It is only considered when
/// it splits the header into several columns, and scores the header width for
/// each sampled record of that same width. Ties go to comma, which is also the
/// answer when no candidate fits.
pub fn sniff_delimiter(content: &str) -> u8 {
    // Later entries win ties
    const CANDIDATES: [u8; 4] = [b'|', b'\t', b';', b','];
    const SAMPLE_RECORDS: usize = 10;

    CANDIDATES
        .into_iter()
        .filter_map(|delimiter| {
            let widths: Vec<usize> = csv::ReaderBuilder::new()
                .delimiter(delimiter)
                .has_headers(false)
                .flexible(true)
                .from_reader(content.as_bytes())
                .records()
                .take(SAMPLE_RECORDS)
                .map_while(Result::ok)
                .map(|record| record.len())
                .collect();

            let (&header, _) = widths.split_first()?;
            (header > 1).then(|| {
                let agreeing = widths.iter().filter(|&&w| w == header).count();
                (agreeing * header, delimiter)
            })
        })
        .max_by_key(|&(score, _)| score)
        .map_or(b',', |(_, delimiter)| delimiter)
}

/// Read file and convert to UTF-8 if needed (Excel-exported CSVs are often Windows-1252)
pub fn read_file_as_utf8(path: &Path) -> Result<String, IoError> {
    let bytes = std::fs::read(path).map_err(|e| IoError::read(path, e))?;

    match String::from_utf8(bytes) {
        Ok(s) => Ok(s),
        Err(e) => {
            let bytes = e.into_bytes();
            tracing::debug!(path = %path.display(), "input is not UTF-8, decoding as Windows-1252");
            let (decoded, _, _) = encoding_rs::WINDOWS_1252.decode(&bytes);
            Ok(decoded.into_owned())
        }
    }
}
