use std::path::PathBuf;

use thiserror::Error;

/// Problems with a caller-supplied [`ProcessConfig`](crate::ProcessConfig).
///
/// Any of these aborts the whole request; no partial results are produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("country column '{0}' not found in dataset")]
    MissingCountryColumn(String),
    #[error("indicator column '{0}' not found in dataset")]
    MissingIndicatorColumn(String),
    #[error("indicator column '{0}' is configured more than once")]
    DuplicateIndicatorColumn(String),
    #[error("unknown normalization type '{0}'")]
    UnknownNormalization(String),
    #[error("invalid configuration: {0}")]
    Decode(String),
}

/// Violations of the [`Dataset`](crate::Dataset) shape invariants.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DatasetError {
    #[error("duplicate column name '{0}'")]
    DuplicateColumn(String),
    #[error("column {index} has an empty name")]
    EmptyColumnName { index: usize },
    #[error("row {row} has {actual} cells, expected {expected}")]
    RowWidth {
        row: usize,
        expected: usize,
        actual: usize,
    },
}

#[derive(Debug, Error)]
pub enum OptionsError {
    #[error("failed to read options file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse options: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("invalid option {field}: {message}")]
    Invalid {
        field: &'static str,
        message: String,
    },
}
