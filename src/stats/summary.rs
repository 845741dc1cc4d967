//! Summary Statistics Module
//! Descriptive statistics for the prepared table columns.

use crate::data::{PreparedTable, FINAL_COLUMNS};
use rayon::prelude::*;

/// Descriptive statistics for a single prepared column.
#[derive(Debug, Clone)]
pub struct ColumnSummary {
    pub column: String,
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    pub std: f64,
    pub p95: f64,
    pub p05: f64,
}

impl ColumnSummary {
    /// Compute over the finite values of a column. NaN entries (nulls in the
    /// source data) are excluded from the count.
    pub fn from_values(column: &str, values: &[f64]) -> Self {
        let mut sorted: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        let n = sorted.len();
        if n == 0 {
            return Self {
                column: column.to_string(),
                count: 0,
                mean: f64::NAN,
                median: f64::NAN,
                std: f64::NAN,
                p95: f64::NAN,
                p05: f64::NAN,
            };
        }

        let mean = sorted.iter().sum::<f64>() / n as f64;
        let median = if n % 2 == 0 {
            (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
        } else {
            sorted[n / 2]
        };
        let variance = if n > 1 {
            sorted.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1) as f64
        } else {
            0.0
        };

        Self {
            column: column.to_string(),
            count: n,
            mean,
            median,
            std: variance.sqrt(),
            p95: percentile(&sorted, 95.0),
            p05: percentile(&sorted, 5.0),
        }
    }
}

/// Calculate percentile using linear interpolation (NumPy compatible).
pub fn percentile(sorted_values: &[f64], p: f64) -> f64 {
    let n = sorted_values.len();
    if n == 0 {
        return f64::NAN;
    }
    if n == 1 {
        return sorted_values[0];
    }

    let rank = (p / 100.0) * (n - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = (rank.ceil() as usize).min(n - 1);
    let frac = rank - lower as f64;

    if lower == upper {
        sorted_values[lower]
    } else {
        sorted_values[lower] * (1.0 - frac) + sorted_values[upper] * frac
    }
}

/// Compute summaries for all six prepared columns in parallel.
pub fn summarize_table(table: &PreparedTable) -> Vec<ColumnSummary> {
    FINAL_COLUMNS
        .par_iter()
        .map(|name| {
            let values = table.column(name).unwrap_or_default();
            ColumnSummary::from_values(name, &values)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_matches_hand_computed_values() {
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let s = ColumnSummary::from_values("x", &values);
        assert_eq!(s.count, 8);
        assert!((s.mean - 5.0).abs() < 1e-12);
        assert!((s.median - 4.5).abs() < 1e-12);
        // Sample std of the classic 2,4,4,4,5,5,7,9 set.
        assert!((s.std - 2.138089935299395).abs() < 1e-9);
    }

    #[test]
    fn nan_values_are_excluded() {
        let values = [1.0, f64::NAN, 3.0];
        let s = ColumnSummary::from_values("x", &values);
        assert_eq!(s.count, 2);
        assert!((s.mean - 2.0).abs() < 1e-12);
    }

    #[test]
    fn empty_column_yields_nan_stats() {
        let s = ColumnSummary::from_values("x", &[]);
        assert_eq!(s.count, 0);
        assert!(s.mean.is_nan());
        assert!(s.median.is_nan());
    }

    #[test]
    fn percentile_interpolates_linearly() {
        let sorted = [10.0, 20.0, 30.0, 40.0, 50.0];
        assert!((percentile(&sorted, 50.0) - 30.0).abs() < 1e-12);
        assert!((percentile(&sorted, 25.0) - 20.0).abs() < 1e-12);
        assert!((percentile(&sorted, 10.0) - 14.0).abs() < 1e-12);
    }
}
