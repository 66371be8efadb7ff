//! Column normalization onto the 0-100 score scale.
//!
//! Every transform takes a column of optional values and returns a column of
//! the same length. Missing and non-finite inputs stay missing in the output;
//! statistics are computed over the remaining finite values only. Degenerate
//! columns (a single distinct value, zero spread) map to [`MIDPOINT_SCORE`].
//!
//! Any finite input is valid, including values near `f64::MAX` whose
//! differences overflow; such columns are scaled down before subtracting.

use scoring_model::NormalizationType;
use serde::Serialize;
use tracing::trace;

/// Score assigned when a column has no spread to scale against.
pub const MIDPOINT_SCORE: f64 = 50.0;

const SCORE_MIN: f64 = 0.0;
const SCORE_MAX: f64 = 100.0;
/// Z-scores are clipped to this many standard deviations either side.
const Z_CLIP: f64 = 3.0;

/// Descriptive statistics over the finite values of one column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnStatistics {
    pub count: usize,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    /// Population standard deviation.
    pub std: f64,
    pub median: f64,
    pub q25: f64,
    pub q75: f64,
}

impl ColumnStatistics {
    /// Returns `None` when the column has no finite values.
    pub fn from_values(values: &[Option<f64>]) -> Option<Self> {
        let mut sorted = finite_values(values);
        if sorted.is_empty() {
            return None;
        }
        sorted.sort_by(f64::total_cmp);

        let count = sorted.len();
        let min = sorted[0];
        let max = sorted[count - 1];
        // Moments are taken on values scaled into [-1, 1] so sums cannot overflow.
        let scale = min.abs().max(max.abs());
        let (mean, std) = if scale == 0.0 {
            (0.0, 0.0)
        } else {
            let scaled_mean = sorted.iter().map(|value| value / scale).sum::<f64>() / count as f64;
            let variance = sorted
                .iter()
                .map(|value| (value / scale - scaled_mean).powi(2))
                .sum::<f64>()
                / count as f64;
            (scaled_mean * scale, variance.sqrt() * scale)
        };

        Some(Self {
            count,
            min,
            max,
            mean,
            std,
            median: percentile(&sorted, 0.5),
            q25: percentile(&sorted, 0.25),
            q75: percentile(&sorted, 0.75),
        })
    }

    /// Interquartile range; infinite when the quartiles are too far apart to subtract.
    pub fn iqr(&self) -> f64 {
        self.q75 - self.q25
    }

    fn is_constant(&self) -> bool {
        self.max == self.min
    }

    /// Whether `max - min` (and so any in-column difference) is representable.
    fn has_finite_span(&self) -> bool {
        (self.max - self.min).is_finite()
    }
}

/// Applies `method` to a whole column.
pub fn normalize(values: &[Option<f64>], method: NormalizationType) -> Vec<Option<f64>> {
    trace!(method = method.as_str(), rows = values.len(), "normalizing column");
    match method {
        NormalizationType::MinMax => min_max(values),
        NormalizationType::ZScore => z_score(values),
        NormalizationType::Robust => robust(values),
        NormalizationType::Quantile => quantile(values),
    }
}

/// Linear rescale so the column minimum maps to 0 and the maximum to 100.
pub fn min_max(values: &[Option<f64>]) -> Vec<Option<f64>> {
    let Some(stats) = ColumnStatistics::from_values(values) else {
        return vec![None; values.len()];
    };
    if stats.is_constant() {
        return map_finite(values, |_| MIDPOINT_SCORE);
    }
    map_finite(values, |value| position(value, &stats) * SCORE_MAX)
}

/// Standard score clipped to +/-3, mapped linearly onto 0-100.
pub fn z_score(values: &[Option<f64>]) -> Vec<Option<f64>> {
    let Some(stats) = ColumnStatistics::from_values(values) else {
        return vec![None; values.len()];
    };
    if stats.is_constant() || stats.std == 0.0 {
        return map_finite(values, |_| MIDPOINT_SCORE);
    }
    let halved = !stats.has_finite_span();
    map_finite(values, |value| {
        let z = if halved {
            (value / 2.0 - stats.mean / 2.0) / (stats.std / 2.0)
        } else {
            (value - stats.mean) / stats.std
        };
        let z = z.clamp(-Z_CLIP, Z_CLIP);
        (z + Z_CLIP) / (2.0 * Z_CLIP) * SCORE_MAX
    })
}

/// Median/IQR scaling followed by a min-max rescale of the scaled values.
///
/// `(x - median) / iqr` is increasing and affine, so the rescale cancels it:
/// the score is the value's position between the column extremes. The IQR
/// still decides degeneracy.
pub fn robust(values: &[Option<f64>]) -> Vec<Option<f64>> {
    let Some(stats) = ColumnStatistics::from_values(values) else {
        return vec![None; values.len()];
    };
    if stats.q75 == stats.q25 {
        return map_finite(values, |_| MIDPOINT_SCORE);
    }
    map_finite(values, |value| position(value, &stats) * SCORE_MAX)
}

/// Empirical CDF rank: tied values share their average rank.
pub fn quantile(values: &[Option<f64>]) -> Vec<Option<f64>> {
    let mut sorted = finite_values(values);
    if sorted.is_empty() {
        return vec![None; values.len()];
    }
    if sorted.len() == 1 {
        return map_finite(values, |_| MIDPOINT_SCORE);
    }
    sorted.sort_by(f64::total_cmp);
    let last = (sorted.len() - 1) as f64;
    map_finite(values, |value| {
        let first = sorted.partition_point(|candidate| *candidate < value);
        let end = sorted.partition_point(|candidate| *candidate <= value);
        let rank = (first + end - 1) as f64 / 2.0;
        rank / last * SCORE_MAX
    })
}

/// Fraction of the way from the column minimum to its maximum.
fn position(value: f64, stats: &ColumnStatistics) -> f64 {
    if stats.has_finite_span() {
        (value - stats.min) / (stats.max - stats.min)
    } else {
        (value / 2.0 - stats.min / 2.0) / (stats.max / 2.0 - stats.min / 2.0)
    }
}

fn finite_values(values: &[Option<f64>]) -> Vec<f64> {
    values
        .iter()
        .filter_map(|value| value.filter(|value| value.is_finite()))
        .collect()
}

fn map_finite(values: &[Option<f64>], transform: impl Fn(f64) -> f64) -> Vec<Option<f64>> {
    values
        .iter()
        .map(|value| {
            value
                .filter(|value| value.is_finite())
                .map(|value| transform(value).clamp(SCORE_MIN, SCORE_MAX))
        })
        .collect()
}

/// Linear interpolation between closest ranks of a sorted, non-empty slice.
fn percentile(sorted: &[f64], fraction: f64) -> f64 {
    let position = fraction * (sorted.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    let weight = position - lower as f64;
    let (low, high) = (sorted[lower], sorted[upper]);
    let gap = high - low;
    if gap.is_finite() {
        low + gap * weight
    } else {
        low * (1.0 - weight) + high * weight
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn column(values: &[f64]) -> Vec<Option<f64>> {
        values.iter().copied().map(Some).collect()
    }

    fn assert_close(actual: Option<f64>, expected: f64) {
        let actual = actual.expect("value present");
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn statistics_use_population_std_and_linear_quantiles() {
        let stats = ColumnStatistics::from_values(&column(&[1.0, 2.0, 3.0, 4.0])).unwrap();
        assert_eq!(stats.count, 4);
        assert_eq!(stats.mean, 2.5);
        assert!((stats.std - 1.25f64.sqrt()).abs() < 1e-12);
        assert_eq!(stats.median, 2.5);
        assert_eq!(stats.q25, 1.75);
        assert_eq!(stats.q75, 3.25);
    }

    #[test]
    fn statistics_skip_missing_and_non_finite() {
        let stats =
            ColumnStatistics::from_values(&[Some(2.0), None, Some(f64::NAN), Some(4.0)]).unwrap();
        assert_eq!(stats.count, 2);
        assert_eq!(stats.mean, 3.0);
        assert!(ColumnStatistics::from_values(&[None, Some(f64::INFINITY)]).is_none());
    }

    #[test]
    fn min_max_two_values() {
        let scores = min_max(&column(&[500.0, 100.0]));
        assert_eq!(scores, vec![Some(100.0), Some(0.0)]);
    }

    #[test]
    fn z_score_two_values() {
        let scores = z_score(&column(&[500.0, 100.0]));
        assert_close(scores[0], 200.0 / 3.0);
        assert_close(scores[1], 100.0 / 3.0);
    }

    #[test]
    fn z_score_clips_outliers() {
        let mut values = vec![0.0; 99];
        values.push(1000.0);
        let scores = z_score(&column(&values));
        assert_close(scores[99], 100.0);
    }

    #[test]
    fn robust_spans_full_range() {
        let scores = robust(&column(&[1.0, 2.0, 3.0, 4.0, 100.0]));
        assert_close(scores[0], 0.0);
        assert_close(scores[4], 100.0);
        assert!(scores[1].unwrap() < scores[2].unwrap());
    }

    #[test]
    fn robust_zero_iqr_is_midpoint() {
        let scores = robust(&column(&[5.0, 5.0, 5.0, 5.0, 9.0]));
        assert!(scores.iter().all(|score| *score == Some(MIDPOINT_SCORE)));
    }

    #[test]
    fn quantile_averages_ties() {
        let scores = quantile(&column(&[10.0, 20.0, 20.0, 30.0]));
        assert_close(scores[0], 0.0);
        assert_close(scores[1], 50.0);
        assert_close(scores[2], 50.0);
        assert_close(scores[3], 100.0);
    }

    #[test]
    fn constant_columns_are_midpoint() {
        for method in NormalizationType::ALL {
            let scores = normalize(&column(&[0.1, 0.1, 0.1]), method);
            assert_eq!(scores, vec![Some(MIDPOINT_SCORE); 3], "{method}");
        }
    }

    #[test]
    fn single_value_is_midpoint() {
        for method in NormalizationType::ALL {
            let scores = normalize(&[None, Some(42.0)], method);
            assert_eq!(scores, vec![None, Some(MIDPOINT_SCORE)], "{method}");
        }
    }

    #[test]
    fn extreme_values_stay_finite() {
        let stats =
            ColumnStatistics::from_values(&column(&[f64::MAX, -f64::MAX, 0.0, 1.0])).unwrap();
        assert!(stats.mean.is_finite() && stats.std.is_finite());
        assert!(stats.q25.is_finite() && stats.q75.is_finite());

        let scores = min_max(&column(&[1e308, -1e308, 0.0]));
        assert_eq!(scores, vec![Some(100.0), Some(0.0), Some(50.0)]);

        for method in NormalizationType::ALL {
            let scores = normalize(&column(&[1e308, 1e308, 0.0, -1e308]), method);
            for score in scores {
                let score = score.expect("finite input scores");
                assert!((0.0..=100.0).contains(&score), "{method}: {score}");
            }
        }
    }

    #[test]
    fn missing_positions_are_preserved() {
        let scores = min_max(&[Some(1.0), None, Some(f64::NAN), Some(3.0)]);
        assert_eq!(scores, vec![Some(0.0), None, None, Some(100.0)]);
    }

    #[test]
    fn all_missing_column() {
        for method in NormalizationType::ALL {
            assert_eq!(normalize(&[None, None], method), vec![None, None]);
        }
        assert!(normalize(&[], NormalizationType::Quantile).is_empty());
    }
}
