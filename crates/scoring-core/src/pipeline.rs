//! The scoring pipeline.

use std::collections::HashSet;
use std::time::Instant;

use scoring_map::{ColumnDetector, CountryResolver, Resolution, report_from_profiles};
use scoring_model::{
    CellValue, ColumnProfile, ColumnReport, ConfigError, Dataset, IndicatorColumnConfig,
    ProcessConfig, ScoreRecord, ScoringOptions,
};
use scoring_standards::CountryTable;
use scoring_transform::{cell_to_f64, normalize};
use tracing::{debug, info, info_span};

use crate::summary::ProcessSummary;

/// Records produced by [`ScoringPipeline::process_with_summary`] and the
/// counts behind them.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessOutput {
    pub records: Vec<ScoreRecord>,
    pub summary: ProcessSummary,
}

/// Runs detection and processing against a shared country table.
#[derive(Debug, Clone)]
pub struct ScoringPipeline<'a> {
    resolver: CountryResolver<'a>,
    options: ScoringOptions,
}

impl<'a> ScoringPipeline<'a> {
    pub fn new(table: &'a CountryTable) -> Self {
        let options = ScoringOptions::default();
        Self {
            resolver: CountryResolver::from_options(table, &options),
            options,
        }
    }

    #[must_use]
    pub fn with_options(mut self, options: ScoringOptions) -> Self {
        self.resolver = self.resolver.with_threshold(options.fuzzy_threshold);
        self.options = options;
        self
    }

    pub fn options(&self) -> &ScoringOptions {
        &self.options
    }

    pub fn resolver(&self) -> &CountryResolver<'a> {
        &self.resolver
    }

    fn detector(&self) -> ColumnDetector<'_> {
        ColumnDetector::new(&self.resolver, &self.options)
    }

    /// Stage one: ranked country and indicator candidates.
    pub fn detect(&self, dataset: &Dataset) -> ColumnReport {
        let profiles = self.profile(dataset);
        let report = report_from_profiles(&profiles);
        info!(
            country_candidates = report.country_columns.len(),
            indicator_candidates = report.indicator_columns.len(),
            best_country = report.best_country_column().unwrap_or_default(),
            "detection complete"
        );
        report
    }

    /// Stage one with per-column scores.
    pub fn profile(&self, dataset: &Dataset) -> Vec<ColumnProfile> {
        let span = info_span!(
            "detect",
            rows = dataset.row_count(),
            columns = dataset.column_count()
        );
        let _guard = span.enter();
        let started = Instant::now();
        let profiles = self.detector().profile_columns(dataset);
        debug!(elapsed_ms = started.elapsed().as_millis() as u64, "profiled columns");
        profiles
    }

    /// Stage two: scores for every African row and configured indicator.
    pub fn process(
        &self,
        dataset: &Dataset,
        config: &ProcessConfig,
    ) -> Result<Vec<ScoreRecord>, ConfigError> {
        self.process_with_summary(dataset, config)
            .map(|output| output.records)
    }

    /// Like [`process`](Self::process) but also returns row counts.
    ///
    /// A configuration error aborts the whole request; rows that do not
    /// resolve to an African country are skipped.
    pub fn process_with_summary(
        &self,
        dataset: &Dataset,
        config: &ProcessConfig,
    ) -> Result<ProcessOutput, ConfigError> {
        let span = info_span!(
            "process",
            rows = dataset.row_count(),
            indicators = config.indicator_columns.len()
        );
        let _guard = span.enter();
        let started = Instant::now();

        config.validate(dataset)?;

        let countries = dataset
            .column_values(&config.country_column)
            .ok_or_else(|| ConfigError::MissingCountryColumn(config.country_column.clone()))?;
        let resolutions: Vec<(String, Resolution)> = countries
            .map(|cell| (cell.to_string(), self.resolve_cell(cell)))
            .collect();

        let scores = config
            .indicator_columns
            .iter()
            .map(|indicator| self.score_column(dataset, indicator))
            .collect::<Result<Vec<_>, ConfigError>>()?;

        let mut summary = ProcessSummary {
            rows: dataset.row_count(),
            ..ProcessSummary::default()
        };
        let mut seen_unresolved = HashSet::new();
        let mut records = Vec::new();

        for (row, (country_name, resolution)) in resolutions.iter().enumerate() {
            let Some(code) = resolution.code() else {
                summary.unresolved += 1;
                if !country_name.trim().is_empty() && seen_unresolved.insert(country_name.as_str())
                {
                    summary.unresolved_values.push(country_name.clone());
                }
                continue;
            };
            summary.resolved += 1;
            if !resolution.is_african {
                summary.non_african += 1;
                continue;
            }
            for (indicator, column_scores) in config.indicator_columns.iter().zip(&scores) {
                match column_scores[row] {
                    Some(score) => records.push(ScoreRecord {
                        country_name: country_name.clone(),
                        country_code: code.to_string(),
                        indicator_id: indicator.indicator_id.clone(),
                        score: round_score(score, self.options.score_decimals),
                    }),
                    None => summary.skipped_missing_values += 1,
                }
            }
        }
        summary.records = records.len();

        info!(
            resolved = summary.resolved,
            unresolved = summary.unresolved,
            non_african = summary.non_african,
            records = summary.records,
            skipped_missing_values = summary.skipped_missing_values,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "processing complete"
        );
        Ok(ProcessOutput { records, summary })
    }

    fn resolve_cell(&self, cell: &CellValue) -> Resolution {
        match cell {
            CellValue::Text(text) => self.resolver.resolve(text),
            CellValue::Number(_) | CellValue::Missing => Resolution::unresolved(),
        }
    }

    /// Normalizes one indicator over the whole column.
    fn score_column(
        &self,
        dataset: &Dataset,
        indicator: &IndicatorColumnConfig,
    ) -> Result<Vec<Option<f64>>, ConfigError> {
        let values: Vec<Option<f64>> = dataset
            .column_values(&indicator.column_name)
            .ok_or_else(|| ConfigError::MissingIndicatorColumn(indicator.column_name.clone()))?
            .map(cell_to_f64)
            .collect();
        let valid = values.iter().filter(|value| value.is_some()).count();
        debug!(
            column = %indicator.column_name,
            method = indicator.normalization_type.as_str(),
            valid,
            missing = values.len() - valid,
            "normalizing indicator"
        );
        Ok(normalize(&values, indicator.normalization_type))
    }
}

/// Rounds half away from zero to `decimals` places; `None` keeps the value.
pub fn round_score(score: f64, decimals: Option<u32>) -> f64 {
    match decimals {
        Some(decimals) => {
            let factor = 10f64.powi(decimals.min(15) as i32);
            (score * factor).round() / factor
        }
        None => score,
    }
}
