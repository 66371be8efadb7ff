//! Caller-supplied configuration for the processing stage.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::dataset::Dataset;
use crate::error::ConfigError;

/// The four supported normalization transforms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
pub enum NormalizationType {
    MinMax,
    ZScore,
    Robust,
    Quantile,
}

impl NormalizationType {
    pub const ALL: [Self; 4] = [Self::MinMax, Self::ZScore, Self::Robust, Self::Quantile];

    /// Returns the identifier callers send in configuration.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MinMax => "minmax normalisation",
            Self::ZScore => "zscore normalisation",
            Self::Robust => "robust scaling",
            Self::Quantile => "quantile transformation",
        }
    }
}

impl fmt::Display for NormalizationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NormalizationType {
    type Err = ConfigError;

    /// Parses an identifier, ignoring case, spacing, hyphens and underscores.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let compact: String = s
            .chars()
            .filter(|ch| !ch.is_whitespace() && *ch != '-' && *ch != '_')
            .flat_map(char::to_lowercase)
            .collect();

        match compact.as_str() {
            "minmaxnormalisation" | "minmaxnormalization" => Ok(Self::MinMax),
            "zscorenormalisation" | "zscorenormalization" => Ok(Self::ZScore),
            "robustscaling" => Ok(Self::Robust),
            "quantiletransformation" => Ok(Self::Quantile),
            _ => Err(ConfigError::UnknownNormalization(s.to_string())),
        }
    }
}

impl TryFrom<String> for NormalizationType {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<NormalizationType> for &'static str {
    fn from(value: NormalizationType) -> Self {
        value.as_str()
    }
}

/// One indicator column to score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndicatorColumnConfig {
    pub column_name: String,
    /// Opaque identifier echoed back on every record for this column.
    pub indicator_id: String,
    pub normalization_type: NormalizationType,
}

impl IndicatorColumnConfig {
    pub fn new(
        column_name: impl Into<String>,
        indicator_id: impl Into<String>,
        normalization_type: NormalizationType,
    ) -> Self {
        Self {
            column_name: column_name.into(),
            indicator_id: indicator_id.into(),
            normalization_type,
        }
    }
}

/// The confirmed column selection for the processing stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessConfig {
    pub country_column: String,
    pub indicator_columns: Vec<IndicatorColumnConfig>,
}

// Wire shape: the normalization type stays a string so an unknown value
// surfaces as `UnknownNormalization` rather than a generic decode error.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawProcessConfig {
    country_column: String,
    indicator_columns: Vec<RawIndicatorColumn>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawIndicatorColumn {
    column_name: String,
    indicator_id: String,
    normalization_type: String,
}

impl ProcessConfig {
    pub fn new(country_column: impl Into<String>) -> Self {
        Self {
            country_column: country_column.into(),
            indicator_columns: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_indicator(mut self, indicator: IndicatorColumnConfig) -> Self {
        self.indicator_columns.push(indicator);
        self
    }

    /// Decodes the JSON configuration text sent alongside an upload.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let raw: RawProcessConfig =
            serde_json::from_str(text).map_err(|err| ConfigError::Decode(err.to_string()))?;
        let indicator_columns = raw
            .indicator_columns
            .into_iter()
            .map(|column| {
                Ok(IndicatorColumnConfig {
                    normalization_type: column.normalization_type.parse()?,
                    column_name: column.column_name,
                    indicator_id: column.indicator_id,
                })
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;
        Ok(Self {
            country_column: raw.country_column,
            indicator_columns,
        })
    }

    /// Checks that every referenced column exists and indicator columns are distinct.
    pub fn validate(&self, dataset: &Dataset) -> Result<(), ConfigError> {
        if !dataset.has_column(&self.country_column) {
            return Err(ConfigError::MissingCountryColumn(
                self.country_column.clone(),
            ));
        }
        let mut seen = HashSet::new();
        for indicator in &self.indicator_columns {
            if !dataset.has_column(&indicator.column_name) {
                return Err(ConfigError::MissingIndicatorColumn(
                    indicator.column_name.clone(),
                ));
            }
            if !seen.insert(indicator.column_name.as_str()) {
                return Err(ConfigError::DuplicateIndicatorColumn(
                    indicator.column_name.clone(),
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalization_type_from_str() {
        assert_eq!(
            "minmax normalisation".parse::<NormalizationType>().unwrap(),
            NormalizationType::MinMax
        );
        assert_eq!(
            "Z-Score Normalisation".parse::<NormalizationType>().unwrap(),
            NormalizationType::ZScore
        );
        assert_eq!(
            "  ROBUST   scaling ".parse::<NormalizationType>().unwrap(),
            NormalizationType::Robust
        );
        assert_eq!(
            "quantile_transformation".parse::<NormalizationType>().unwrap(),
            NormalizationType::Quantile
        );
    }

    #[test]
    fn normalization_type_rejects_unknown() {
        let err = "log scaling".parse::<NormalizationType>().unwrap_err();
        assert_eq!(err, ConfigError::UnknownNormalization("log scaling".into()));
    }

    #[test]
    fn identifiers_round_trip() {
        for method in NormalizationType::ALL {
            assert_eq!(method.as_str().parse::<NormalizationType>().unwrap(), method);
        }
    }
}
