//! Five-number summary with Tukey whiskers.

use crate::utils::quantile_sorted;
use serde::{Deserialize, Serialize};

/// Whisker reach in multiples of the interquartile range.
const WHISKER_IQR_FACTOR: f64 = 1.5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxplotChart {
    pub column: String,
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
    /// Most extreme values inside `q1 - 1.5 IQR` and `q3 + 1.5 IQR`.
    pub lower_whisker: f64,
    pub upper_whisker: f64,
    pub outliers: Vec<f64>,
}

/// Summarize the non-null `values`; `None` when there are none.
pub fn build_boxplot(column: &str, values: &[Option<f64>]) -> Option<BoxplotChart> {
    let mut sorted: Vec<f64> = values.iter().flatten().copied().collect();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let (&min, &max) = (sorted.first()?, sorted.last()?);
    let q1 = quantile_sorted(&sorted, 0.25)?;
    let median = quantile_sorted(&sorted, 0.5)?;
    let q3 = quantile_sorted(&sorted, 0.75)?;

    let iqr = q3 - q1;
    let low_fence = q1 - WHISKER_IQR_FACTOR * iqr;
    let high_fence = q3 + WHISKER_IQR_FACTOR * iqr;

    let inside = || sorted.iter().copied().filter(|v| *v >= low_fence && *v <= high_fence);
    let lower_whisker = inside().next().unwrap_or(q1);
    let upper_whisker = inside().last().unwrap_or(q3);
    let outliers = sorted
        .iter()
        .copied()
        .filter(|v| *v < low_fence || *v > high_fence)
        .collect();

    Some(BoxplotChart {
        column: column.to_string(),
        min,
        q1,
        median,
        q3,
        max,
        lower_whisker,
        upper_whisker,
        outliers,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_outlier_detected() {
        let values: Vec<Option<f64>> =
            [1.0, 2.0, 3.0, 4.0, 5.0, 100.0].iter().map(|v| Some(*v)).collect();
        let chart = build_boxplot("v", &values).unwrap();

        assert_eq!(chart.q1, 2.25);
        assert_eq!(chart.median, 3.5);
        assert_eq!(chart.q3, 4.75);
        assert_eq!(chart.lower_whisker, 1.0);
        assert_eq!(chart.upper_whisker, 5.0);
        assert_eq!(chart.outliers, vec![100.0]);
        assert_eq!(chart.max, 100.0);
    }

    #[test]
    fn test_no_values() {
        assert!(build_boxplot("v", &[None]).is_none());
    }

    #[test]
    fn test_single_value() {
        let chart = build_boxplot("v", &[Some(3.0)]).unwrap();
        assert_eq!(chart.lower_whisker, 3.0);
        assert_eq!(chart.upper_whisker, 3.0);
        assert!(chart.outliers.is_empty());
    }
}
