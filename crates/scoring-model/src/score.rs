use serde::{Deserialize, Serialize};

/// One normalized score for a (row, indicator column) pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreRecord {
    /// Country text exactly as it appeared in the row.
    pub country_name: String,
    /// Resolved three-letter code.
    pub country_code: String,
    pub indicator_id: String,
    pub score: f64,
}
