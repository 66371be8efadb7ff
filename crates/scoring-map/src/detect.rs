//! Column-role detection.
//!
//! Each column gets a country score (how many sampled values resolve to a
//! country, plus a bonus for a country-like header) and an indicator score
//! (how many sampled values parse as numbers). Only the first
//! `sample_rows` rows are inspected. A column whose header reads as an
//! identifier ("ID", "Year", "Rank") is never an indicator candidate.

use std::collections::HashMap;

use scoring_model::{CellValue, ColumnProfile, ColumnReport, Dataset, ScoringOptions};
use scoring_standards::normalize_key;
use scoring_transform::cell_to_f64;
use tracing::debug;

use crate::fuzzy::token_sort_ratio;
use crate::resolver::CountryResolver;

/// Header tokens that mark a country column.
pub const COUNTRY_HEADER_KEYWORDS: &[&str] = &[
    "country",
    "countries",
    "nation",
    "nations",
    "nationality",
    "iso",
    "iso3",
    "territory",
];

const HEADER_PREFIXES: &[&str] = &["country", "nation"];
const HEADER_REFERENCE: &str = "country";

/// Whether a header names a country column.
///
/// Matches keyword tokens, tokens starting with "country"/"nation"
/// ("CountryName"), and near-misses of "country" at or above `threshold`.
pub fn header_matches_keyword(header: &str, threshold: f64) -> bool {
    let key = normalize_key(header);
    let by_token = key.split_whitespace().any(|token| {
        COUNTRY_HEADER_KEYWORDS.contains(&token)
            || HEADER_PREFIXES
                .iter()
                .any(|prefix| token.starts_with(prefix))
    });
    by_token || token_sort_ratio(&key, HEADER_REFERENCE) >= threshold
}

/// Whether a header names a key column such as "Year" or "Survey ID".
///
/// Matching is by whole normalized word, so "Aid received" or "Residents"
/// are not identifiers; snake and kebab case split into words ("survey_id").
pub fn header_is_identifier<S: AsRef<str>>(header: &str, keywords: &[S]) -> bool {
    let key = normalize_key(header);
    key.split_whitespace().any(|token| {
        keywords
            .iter()
            .any(|keyword| keyword.as_ref().eq_ignore_ascii_case(token))
    })
}

/// Scores dataset columns using a shared resolver.
#[derive(Debug, Clone, Copy)]
pub struct ColumnDetector<'a> {
    resolver: &'a CountryResolver<'a>,
    options: &'a ScoringOptions,
}

impl<'a> ColumnDetector<'a> {
    pub fn new(resolver: &'a CountryResolver<'a>, options: &'a ScoringOptions) -> Self {
        Self { resolver, options }
    }

    /// Ranked country and indicator candidates.
    pub fn detect_columns(&self, dataset: &Dataset) -> ColumnReport {
        let profiles = self.profile_columns(dataset);
        report_from_profiles(&profiles)
    }

    /// One profile per column, in column order.
    pub fn profile_columns(&self, dataset: &Dataset) -> Vec<ColumnProfile> {
        dataset
            .columns()
            .iter()
            .enumerate()
            .map(|(index, name)| {
                let cells = dataset
                    .rows()
                    .iter()
                    .take(self.options.sample_rows)
                    .map(|row| &row[index]);
                self.profile_column(name, cells)
            })
            .collect()
    }

    /// Profiles a single column from its cells in row order.
    pub fn profile_column<'c, I>(&self, name: &str, cells: I) -> ColumnProfile
    where
        I: IntoIterator<Item = &'c CellValue>,
    {
        let samples: Vec<&CellValue> = cells
            .into_iter()
            .filter(|cell| !cell.is_missing())
            .take(self.options.sample_rows)
            .collect();

        let min_confidence = self.options.min_confidence();
        let mut seen: HashMap<&str, bool> = HashMap::new();
        let mut country_hits = 0usize;
        let mut numeric_hits = 0usize;

        for cell in &samples {
            let numeric = cell_to_f64(cell).is_some();
            if numeric {
                numeric_hits += 1;
                continue;
            }
            let Some(text) = cell.as_text() else {
                continue;
            };
            let text = text.trim();
            let is_country = *seen.entry(text).or_insert_with(|| {
                let resolution = self.resolver.resolve(text);
                resolution.is_resolved() && resolution.confidence >= min_confidence
            });
            if is_country {
                country_hits += 1;
            }
        }

        let non_empty = samples.len();
        let country_fraction = fraction(country_hits, non_empty);
        let header_bonus = if header_matches_keyword(name, self.options.fuzzy_threshold) {
            1.0
        } else {
            0.0
        };
        let country_score = (self.options.value_weight * country_fraction
            + self.options.header_weight * header_bonus)
            .clamp(0.0, 1.0);
        let excluded = country_score > self.options.cross_exclusion_threshold
            || header_is_identifier(name, self.options.identifier_keywords.as_slice());
        let indicator_score = if excluded {
            0.0
        } else {
            fraction(numeric_hits, non_empty)
        };

        debug!(
            column = name,
            non_empty,
            country_score,
            indicator_score,
            "profiled column"
        );

        ColumnProfile {
            name: name.to_string(),
            sample_values: samples.iter().map(|cell| cell.to_string()).collect(),
            non_empty,
            country_score,
            indicator_score,
        }
    }
}

/// Builds the ranked report: zero scores are dropped, ties keep column order.
pub fn report_from_profiles(profiles: &[ColumnProfile]) -> ColumnReport {
    ColumnReport {
        country_columns: rank(profiles, |profile| profile.country_score),
        indicator_columns: rank(profiles, |profile| profile.indicator_score),
    }
}

fn rank(profiles: &[ColumnProfile], score: impl Fn(&ColumnProfile) -> f64) -> Vec<String> {
    let mut ranked: Vec<(&str, f64)> = profiles
        .iter()
        .map(|profile| (profile.name.as_str(), score(profile)))
        .filter(|(_, value)| *value > 0.0)
        .collect();
    ranked.sort_by(|left, right| right.1.total_cmp(&left.1));
    ranked
        .into_iter()
        .map(|(name, _)| name.to_string())
        .collect()
}

fn fraction(hits: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        hits as f64 / total as f64
    }
}
