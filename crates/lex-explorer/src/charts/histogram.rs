//! Equal-width histogram with a Gaussian density overlay.

use crate::profiler::calculate_std;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Grid points the density curve is evaluated on.
pub const DENSITY_GRID_POINTS: usize = 200;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistogramBin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

/// One point of the density overlay, scaled to bin counts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DensityPoint {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistogramChart {
    pub column: String,
    pub bins: Vec<HistogramBin>,
    /// Empty when the column is constant or has fewer than two values.
    pub density: Vec<DensityPoint>,
}

impl HistogramChart {
    pub fn total_count(&self) -> usize {
        self.bins.iter().map(|b| b.count).sum()
    }
}

/// Bin the non-null `values` into `bins` equal-width bins over [min, max].
///
/// The last bin is closed on the right so the maximum is counted.
pub fn build_histogram(column: &str, values: &[Option<f64>], bins: usize) -> HistogramChart {
    let mut sorted: Vec<f64> = values.iter().flatten().copied().collect();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let mut chart = HistogramChart {
        column: column.to_string(),
        bins: Vec::new(),
        density: Vec::new(),
    };
    let (Some(&min), Some(&max)) = (sorted.first(), sorted.last()) else {
        return chart;
    };

    if (max - min).abs() < f64::EPSILON {
        chart.bins.push(HistogramBin {
            start: min,
            end: max,
            count: sorted.len(),
        });
        return chart;
    }

    let bin_count = bins.max(1);
    let width = (max - min) / bin_count as f64;
    let mut counts = vec![0usize; bin_count];

    for value in &sorted {
        let index = (((value - min) / width) as usize).min(bin_count - 1);
        counts[index] += 1;
    }

    chart.bins = counts
        .into_iter()
        .enumerate()
        .map(|(idx, count)| HistogramBin {
            start: min + idx as f64 * width,
            end: min + (idx as f64 + 1.0) * width,
            count,
        })
        .collect();
    chart.density = density_overlay(&sorted, min, max, width);
    chart
}

/// Gaussian KDE with Scott's bandwidth, scaled by `n * bin_width`.
fn density_overlay(values: &[f64], min: f64, max: f64, bin_width: f64) -> Vec<DensityPoint> {
    let n = values.len() as f64;
    let Some(std) = calculate_std(values).filter(|s| *s > 0.0) else {
        return Vec::new();
    };
    let bandwidth = std * n.powf(-0.2);
    let norm = 1.0 / (n * bandwidth * (2.0 * PI).sqrt());
    let step = (max - min) / (DENSITY_GRID_POINTS - 1) as f64;

    (0..DENSITY_GRID_POINTS)
        .map(|i| {
            let x = min + i as f64 * step;
            let density: f64 = values
                .iter()
                .map(|v| {
                    let z = (x - v) / bandwidth;
                    (-0.5 * z * z).exp()
                })
                .sum::<f64>()
                * norm;
            DensityPoint {
                x,
                y: density * n * bin_width,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bins_cover_every_value() {
        let values: Vec<Option<f64>> = (0..=10).map(|v| Some(v as f64)).collect();
        let chart = build_histogram("v", &values, 5);

        assert_eq!(chart.bins.len(), 5);
        assert_eq!(chart.total_count(), 11);
        // Maximum lands in the closed last bin.
        assert_eq!(chart.bins[4].count, 3);
        assert_eq!(chart.bins[0].start, 0.0);
        assert_eq!(chart.bins[4].end, 10.0);
    }

    #[test]
    fn test_nulls_ignored() {
        let chart = build_histogram("v", &[Some(1.0), None, Some(2.0)], 20);
        assert_eq!(chart.total_count(), 2);
    }

    #[test]
    fn test_constant_column_single_bin() {
        let chart = build_histogram("v", &[Some(4.0), Some(4.0)], 20);
        assert_eq!(chart.bins.len(), 1);
        assert_eq!(chart.bins[0].count, 2);
        assert!(chart.density.is_empty());
    }

    #[test]
    fn test_empty_column() {
        let chart = build_histogram("v", &[None, None], 20);
        assert!(chart.bins.is_empty());
        assert!(chart.density.is_empty());
    }

    #[test]
    fn test_density_overlay_spans_range() {
        let values: Vec<Option<f64>> = [1.0, 2.0, 2.5, 3.0, 7.0].iter().map(|v| Some(*v)).collect();
        let chart = build_histogram("v", &values, 4);

        assert_eq!(chart.density.len(), DENSITY_GRID_POINTS);
        assert_eq!(chart.density[0].x, 1.0);
        assert!((chart.density[DENSITY_GRID_POINTS - 1].x - 7.0).abs() < 1e-9);
        assert!(chart.density.iter().all(|p| p.y > 0.0));
    }

    #[test]
    fn test_density_values_match_scott_kde() {
        // std = 1.5275, bandwidth = std * 3^-0.2 = 1.2262, bin width = 1
        let chart = build_histogram("v", &[Some(1.0), Some(2.0), Some(4.0)], 3);
        assert_eq!(chart.bins[0].end - chart.bins[0].start, 1.0);

        let first = chart.density[0];
        let last = chart.density[DENSITY_GRID_POINTS - 1];
        assert_eq!(first.x, 1.0);
        assert!((first.y - 0.574_966_933_912_062).abs() < 1e-9);
        assert!((last.x - 4.0).abs() < 1e-9);
        assert!((last.y - 0.427_694_205_951_324_8).abs() < 1e-9);
    }
}
