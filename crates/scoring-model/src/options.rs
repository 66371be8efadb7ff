//! Tunable thresholds for detection, resolution and output.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::OptionsError;

/// Minimum fuzzy similarity (0-100) for accepting a country match.
pub const DEFAULT_FUZZY_THRESHOLD: f64 = 80.0;
/// Country score above which a column cannot also score as an indicator.
pub const DEFAULT_CROSS_EXCLUSION_THRESHOLD: f64 = 0.5;
/// Number of leading rows inspected per column during detection.
pub const DEFAULT_SAMPLE_ROWS: usize = 200;
pub const DEFAULT_VALUE_WEIGHT: f64 = 0.7;
pub const DEFAULT_HEADER_WEIGHT: f64 = 0.3;
pub const DEFAULT_SCORE_DECIMALS: u32 = 2;
/// Header words marking a numeric column as a key rather than an indicator.
pub const DEFAULT_IDENTIFIER_KEYWORDS: &[&str] = &["id", "year", "rank"];

const WEIGHT_TOLERANCE: f64 = 1e-9;

/// Thresholds shared by the resolver, the column detector and the pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScoringOptions {
    /// Fuzzy acceptance threshold on the 0-100 similarity scale.
    pub fuzzy_threshold: f64,
    pub cross_exclusion_threshold: f64,
    pub sample_rows: usize,
    /// Weight of the resolved-value fraction in the country score.
    pub value_weight: f64,
    /// Weight of the header keyword bonus in the country score.
    pub header_weight: f64,
    /// Decimal places kept on emitted scores; `None` keeps full precision.
    pub score_decimals: Option<u32>,
    /// Headers containing one of these words never rank as indicators.
    pub identifier_keywords: Vec<String>,
}

impl Default for ScoringOptions {
    fn default() -> Self {
        Self {
            fuzzy_threshold: DEFAULT_FUZZY_THRESHOLD,
            cross_exclusion_threshold: DEFAULT_CROSS_EXCLUSION_THRESHOLD,
            sample_rows: DEFAULT_SAMPLE_ROWS,
            value_weight: DEFAULT_VALUE_WEIGHT,
            header_weight: DEFAULT_HEADER_WEIGHT,
            score_decimals: Some(DEFAULT_SCORE_DECIMALS),
            identifier_keywords: DEFAULT_IDENTIFIER_KEYWORDS
                .iter()
                .map(|keyword| (*keyword).to_string())
                .collect(),
        }
    }
}

impl ScoringOptions {
    pub fn from_toml_str(text: &str) -> Result<Self, OptionsError> {
        let options: Self = toml::from_str(text)?;
        options.validate()?;
        Ok(options)
    }

    pub fn from_toml_path(path: &Path) -> Result<Self, OptionsError> {
        let text = std::fs::read_to_string(path).map_err(|source| OptionsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    #[must_use]
    pub fn with_fuzzy_threshold(mut self, threshold: f64) -> Self {
        self.fuzzy_threshold = threshold;
        self
    }

    #[must_use]
    pub fn with_sample_rows(mut self, rows: usize) -> Self {
        self.sample_rows = rows;
        self
    }

    #[must_use]
    pub fn with_identifier_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.identifier_keywords = keywords.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_score_decimals(mut self, decimals: Option<u32>) -> Self {
        self.score_decimals = decimals;
        self
    }

    /// The fuzzy threshold expressed as a confidence in 0.0 to 1.0.
    pub fn min_confidence(&self) -> f64 {
        self.fuzzy_threshold / 100.0
    }

    pub fn validate(&self) -> Result<(), OptionsError> {
        if !(self.fuzzy_threshold > 0.0 && self.fuzzy_threshold <= 100.0) {
            return Err(OptionsError::Invalid {
                field: "fuzzy_threshold",
                message: format!("{} is outside (0, 100]", self.fuzzy_threshold),
            });
        }
        if !(0.0..=1.0).contains(&self.cross_exclusion_threshold) {
            return Err(OptionsError::Invalid {
                field: "cross_exclusion_threshold",
                message: format!("{} is outside [0, 1]", self.cross_exclusion_threshold),
            });
        }
        if self.sample_rows == 0 {
            return Err(OptionsError::Invalid {
                field: "sample_rows",
                message: "must be at least 1".to_string(),
            });
        }
        if self.value_weight < 0.0 || self.header_weight < 0.0 {
            return Err(OptionsError::Invalid {
                field: "value_weight",
                message: "weights must not be negative".to_string(),
            });
        }
        if ((self.value_weight + self.header_weight) - 1.0).abs() > WEIGHT_TOLERANCE {
            return Err(OptionsError::Invalid {
                field: "header_weight",
                message: format!(
                    "value_weight + header_weight must be 1, got {}",
                    self.value_weight + self.header_weight
                ),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let options = ScoringOptions::default();
        assert!(options.validate().is_ok());
        assert!((options.min_confidence() - 0.8).abs() < 1e-12);
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let options = ScoringOptions::from_toml_str("fuzzy_threshold = 90.0\n").unwrap();
        assert_eq!(options.fuzzy_threshold, 90.0);
        assert_eq!(options.sample_rows, DEFAULT_SAMPLE_ROWS);
        assert_eq!(options.score_decimals, Some(DEFAULT_SCORE_DECIMALS));
        assert_eq!(options.identifier_keywords, ["id", "year", "rank"]);
    }

    #[test]
    fn identifier_keywords_can_be_replaced() {
        let options = ScoringOptions::from_toml_str("identifier_keywords = [\"code\"]\n").unwrap();
        assert_eq!(options.identifier_keywords, ["code"]);
        let options = ScoringOptions::from_toml_str("identifier_keywords = []\n").unwrap();
        assert!(options.identifier_keywords.is_empty());
    }

    #[test]
    fn rejects_unknown_keys() {
        assert!(matches!(
            ScoringOptions::from_toml_str("fuzzy = 90.0\n"),
            Err(OptionsError::Toml(_))
        ));
    }

    #[test]
    fn rejects_weights_not_summing_to_one() {
        let err = ScoringOptions::from_toml_str("value_weight = 0.5\n").unwrap_err();
        assert!(matches!(
            err,
            OptionsError::Invalid {
                field: "header_weight",
                ..
            }
        ));
    }

    #[test]
    fn rejects_zero_sample_rows() {
        let err = ScoringOptions::default()
            .with_sample_rows(0)
            .validate()
            .unwrap_err();
        assert!(matches!(err, OptionsError::Invalid { field: "sample_rows", .. }));
    }
}
