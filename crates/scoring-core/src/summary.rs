use serde::Serialize;

/// Counts gathered while processing one dataset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessSummary {
    pub rows: usize,
    /// Rows whose country text resolved, African or not.
    pub resolved: usize,
    pub unresolved: usize,
    /// Resolved rows dropped because the code is outside the African set.
    pub non_african: usize,
    pub records: usize,
    /// African rows whose indicator cell was missing or not numeric, per indicator.
    pub skipped_missing_values: usize,
    /// Distinct country texts that failed to resolve, in first-seen order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub unresolved_values: Vec<String>,
}

impl ProcessSummary {
    /// Resolved rows with an African code.
    pub fn african_rows(&self) -> usize {
        self.resolved.saturating_sub(self.non_african)
    }
}
