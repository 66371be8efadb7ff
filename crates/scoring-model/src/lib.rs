//! Data model shared by the indicator scoring crates.
//!
//! Everything here is plain data: a decoded [`Dataset`], the caller-supplied
//! [`ProcessConfig`], the stage outputs ([`ColumnReport`], [`ScoreRecord`]),
//! and the tunable [`ScoringOptions`].

#![deny(unsafe_code)]

pub mod config;
pub mod dataset;
pub mod detection;
pub mod error;
pub mod options;
pub mod score;

pub use config::{IndicatorColumnConfig, NormalizationType, ProcessConfig};
pub use dataset::{CellValue, Dataset};
pub use detection::{ColumnProfile, ColumnReport};
pub use error::{ConfigError, DatasetError, OptionsError};
pub use options::ScoringOptions;
pub use score::ScoreRecord;
