#![deny(unsafe_code)]

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum StandardsError {
    #[error("failed to read file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse CSV {source_name}: {message}")]
    Csv {
        source_name: String,
        message: String,
    },

    #[error("invalid country code '{code}' in {source_name} (expected three letters)")]
    InvalidCode { source_name: String, code: String },

    #[error("invalid african flag '{value}' for {code} in {source_name}")]
    InvalidAfricanFlag {
        source_name: String,
        code: String,
        value: String,
    },

    #[error("country code {code} is listed more than once in {source_name}")]
    DuplicateCode { source_name: String, code: String },

    #[error("alias '{alias}' maps to both {existing} and {code}")]
    ConflictingAlias {
        alias: String,
        existing: String,
        code: String,
    },

    #[error("expected {expected} African country codes, found {actual}")]
    AfricanSetSize { expected: usize, actual: usize },
}

impl StandardsError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
