//! Summary statistics for numeric columns.

use crate::types::SummaryStatistics;
use crate::utils::quantile_sorted;

/// Calculate the sample standard deviation (ddof = 1).
///
/// Returns `None` for fewer than two values.
pub(crate) fn calculate_std(values: &[f64]) -> Option<f64> {
    let n = values.len();
    if n < 2 {
        return None;
    }
    let mean = values.iter().sum::<f64>() / n as f64;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n as f64 - 1.0);
    Some(variance.sqrt())
}

/// Summarize pre-sorted, non-null values.
pub(crate) fn summarize_sorted(sorted: &[f64]) -> Option<SummaryStatistics> {
    let (&min, &max) = (sorted.first()?, sorted.last()?);
    let count = sorted.len();

    Some(SummaryStatistics {
        count,
        mean: sorted.iter().sum::<f64>() / count as f64,
        std: calculate_std(sorted),
        min,
        q1: quantile_sorted(sorted, 0.25)?,
        median: quantile_sorted(sorted, 0.5)?,
        q3: quantile_sorted(sorted, 0.75)?,
        max,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== calculate_std tests ====================

    #[test]
    fn test_calculate_std_basic() {
        // Mean = 3, Variance = 10 / 4 = 2.5, Std = sqrt(2.5) ≈ 1.58
        let std = calculate_std(&[1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
        assert!((std - 1.5811).abs() < 1e-3);
    }

    #[test]
    fn test_calculate_std_single_value() {
        assert_eq!(calculate_std(&[5.0]), None);
    }

    #[test]
    fn test_calculate_std_identical_values() {
        assert_eq!(calculate_std(&[5.0, 5.0, 5.0]), Some(0.0));
    }

    // ==================== summarize_sorted tests ====================

    #[test]
    fn test_summarize_sorted() {
        let stats = summarize_sorted(&[1.0, 2.0, 3.0, 4.0]).unwrap();
        assert_eq!(stats.count, 4);
        assert_eq!(stats.mean, 2.5);
        assert_eq!(stats.min, 1.0);
        assert_eq!(stats.q1, 1.75);
        assert_eq!(stats.median, 2.5);
        assert_eq!(stats.q3, 3.25);
        assert_eq!(stats.max, 4.0);
    }

    #[test]
    fn test_summarize_empty() {
        assert!(summarize_sorted(&[]).is_none());
    }
}
