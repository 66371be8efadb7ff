//! Numeric transforms for indicator scoring.
//!
//! - **numeric**: lenient parsing of raw cells into numbers
//! - **normalization**: the four score transforms and their shared statistics

#![deny(unsafe_code)]

pub mod normalization;
pub mod numeric;

pub use normalization::{
    ColumnStatistics, MIDPOINT_SCORE, min_max, normalize, quantile, robust, z_score,
};
pub use numeric::{cell_to_f64, parse_numeric};
