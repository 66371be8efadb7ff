use serde::{Deserialize, Serialize};

/// Per-column heuristic scores computed during detection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnProfile {
    pub name: String,
    /// Non-empty cell values from the sampled row prefix, rendered as text.
    pub sample_values: Vec<String>,
    /// Number of non-empty values that were sampled.
    pub non_empty: usize,
    /// Likelihood (0.0 to 1.0) that the column names countries.
    pub country_score: f64,
    /// Likelihood (0.0 to 1.0) that the column holds a numeric indicator.
    pub indicator_score: f64,
}

/// Stage-one output: candidate columns ranked by descending score.
///
/// Advisory only; the caller confirms the final selection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnReport {
    pub country_columns: Vec<String>,
    pub indicator_columns: Vec<String>,
}

impl ColumnReport {
    /// The highest-ranked country column, if any column scored above zero.
    pub fn best_country_column(&self) -> Option<&str> {
        self.country_columns.first().map(String::as_str)
    }
}
