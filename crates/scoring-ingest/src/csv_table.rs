//! CSV decoding.

use std::path::Path;

use csv::ReaderBuilder;
use scoring_model::{CellValue, Dataset};

use crate::error::{IngestError, Result};
use crate::source::{decode_text, read_bytes};

/// Trims a header, drops a stray BOM and collapses inner whitespace.
pub(crate) fn normalize_header(raw: &str) -> String {
    raw.trim()
        .trim_matches('\u{feff}')
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn normalize_cell(raw: &str) -> CellValue {
    CellValue::text(raw.trim().trim_matches('\u{feff}'))
}

/// Reads a CSV file whose first non-blank record is the header row.
pub fn read_csv_dataset(path: &Path) -> Result<Dataset> {
    let bytes = read_bytes(path)?;
    let text = decode_text(&bytes, path)?;
    parse_csv(&text, path)
}

/// Parses CSV text. Short rows are padded with missing cells, long rows are
/// truncated to the header width and blank rows are skipped.
pub fn parse_csv(text: &str, path: &Path) -> Result<Dataset> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut dataset: Option<Dataset> = None;
    let mut adjusted_rows = 0usize;
    for record in reader.records() {
        let record = record.map_err(|err| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: err.to_string(),
        })?;
        if record.iter().all(|value| value.trim().is_empty()) {
            continue;
        }
        match dataset.as_mut() {
            None => {
                let headers = record.iter().map(normalize_header).collect();
                dataset = Some(Dataset::new(headers).map_err(|source| IngestError::Dataset {
                    path: path.to_path_buf(),
                    source,
                })?);
            }
            Some(dataset) => {
                let width = dataset.column_count();
                if record.len() != width {
                    adjusted_rows += 1;
                }
                let row = (0..width)
                    .map(|index| record.get(index).map_or(CellValue::Missing, normalize_cell))
                    .collect();
                dataset
                    .push_row(row)
                    .map_err(|source| IngestError::Dataset {
                        path: path.to_path_buf(),
                        source,
                    })?;
            }
        }
    }

    let dataset = dataset.ok_or_else(|| IngestError::Empty {
        path: path.to_path_buf(),
    })?;
    if adjusted_rows > 0 {
        tracing::warn!(
            path = %path.display(),
            rows = adjusted_rows,
            "rows did not match the header width and were padded or truncated"
        );
    }
    Ok(dataset)
}
