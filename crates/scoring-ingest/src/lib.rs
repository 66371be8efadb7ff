#![deny(unsafe_code)]

//! Decoding uploaded files into a [`Dataset`](scoring_model::Dataset).
//!
//! Cells are kept as text (or numbers, for JSON); type inference is left to
//! column detection.

pub mod csv_table;
pub mod error;
pub mod json_table;
pub mod source;

use std::path::Path;

use scoring_model::Dataset;
use tracing::info;

pub use csv_table::{parse_csv, read_csv_dataset};
pub use error::{IngestError, Result};
pub use json_table::{parse_json, read_json_dataset};
pub use source::{InputFormat, MAX_INPUT_FILE_SIZE};

/// Reads a `.csv` or `.json` file into a dataset.
pub fn read_dataset(path: &Path) -> Result<Dataset> {
    let format = InputFormat::from_path(path)?;
    let dataset = match format {
        InputFormat::Csv => read_csv_dataset(path)?,
        InputFormat::Json => read_json_dataset(path)?,
    };
    info!(
        path = %path.display(),
        format = ?format,
        rows = dataset.row_count(),
        columns = dataset.column_count(),
        "loaded dataset"
    );
    Ok(dataset)
}
