//! JSON decoding: an array of row objects.

use std::path::Path;

use scoring_model::{CellValue, Dataset, DatasetError};
use serde_json::{Map, Value};

use crate::csv_table::normalize_header;
use crate::error::{IngestError, Result};
use crate::source::{decode_text, read_bytes};

pub fn read_json_dataset(path: &Path) -> Result<Dataset> {
    let bytes = read_bytes(path)?;
    let text = decode_text(&bytes, path)?;
    parse_json(&text, path)
}

/// Parses `[{"Country": "Kenya", "GDP": 100}, ...]`.
///
/// Columns follow first-seen key order across all objects; keys absent from
/// a row become missing cells. Two keys of one object that normalize to the
/// same header are rejected.
pub fn parse_json(text: &str, path: &Path) -> Result<Dataset> {
    let json_error = |message: String| IngestError::JsonParse {
        path: path.to_path_buf(),
        message,
    };
    let rows: Vec<Map<String, Value>> =
        serde_json::from_str(text).map_err(|err| json_error(err.to_string()))?;

    let mut columns: Vec<String> = Vec::new();
    for row in &rows {
        for key in row.keys() {
            let name = normalize_header(key);
            if !columns.contains(&name) {
                columns.push(name);
            }
        }
    }
    if columns.is_empty() {
        return Err(IngestError::Empty {
            path: path.to_path_buf(),
        });
    }

    let dataset_error = |source: DatasetError| IngestError::Dataset {
        path: path.to_path_buf(),
        source,
    };
    let mut dataset = Dataset::new(columns).map_err(dataset_error)?;
    for row in rows {
        let mut cells = vec![CellValue::Missing; dataset.column_count()];
        let mut filled = vec![false; dataset.column_count()];
        for (key, value) in row {
            let name = normalize_header(&key);
            let Some(index) = dataset.column_index(&name) else {
                continue;
            };
            // "GDP" and "GDP " share a header; keeping either would drop data.
            if std::mem::replace(&mut filled[index], true) {
                return Err(dataset_error(DatasetError::DuplicateColumn(name)));
            }
            cells[index] = json_cell(value);
        }
        if cells.iter().all(CellValue::is_missing) {
            continue;
        }
        dataset.push_row(cells).map_err(dataset_error)?;
    }
    Ok(dataset)
}

fn json_cell(value: Value) -> CellValue {
    match value {
        Value::Null => CellValue::Missing,
        Value::Number(number) => number.as_f64().map_or(CellValue::Missing, CellValue::Number),
        Value::String(text) => CellValue::text(text.trim()),
        Value::Bool(flag) => CellValue::text(flag.to_string()),
        other => CellValue::text(other.to_string()),
    }
}
