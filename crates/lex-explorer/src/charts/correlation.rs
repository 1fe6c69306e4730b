//! Pearson correlation matrix over every numeric column.

use crate::error::Result;
use crate::types::ColumnKind;
use crate::utils::{column_kind, numeric_values};
use polars::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeatmapChart {
    pub x_labels: Vec<String>,
    pub y_labels: Vec<String>,
    /// `None` where the coefficient is undefined.
    pub values: Vec<Vec<Option<f64>>>,
}

impl HeatmapChart {
    /// Cell annotation, two decimals.
    pub fn cell_label(&self, row: usize, col: usize) -> String {
        match self.values.get(row).and_then(|r| r.get(col)).copied().flatten() {
            Some(value) => format!("{value:.2}"),
            None => "-".to_string(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.x_labels.is_empty()
    }
}

/// Pairwise-complete Pearson correlation of every numeric column pair.
pub fn build_correlation_heatmap(df: &DataFrame) -> Result<HeatmapChart> {
    let mut labels = Vec::new();
    let mut series_values = Vec::new();
    for column in df.get_columns() {
        if column_kind(column.dtype()) != ColumnKind::Numeric {
            continue;
        }
        labels.push(column.name().to_string());
        series_values.push(numeric_values(column.as_materialized_series())?);
    }

    let size = labels.len();
    let mut values = vec![vec![None; size]; size];
    for i in 0..size {
        for j in i..size {
            let (x, y): (Vec<f64>, Vec<f64>) = series_values[i]
                .iter()
                .zip(series_values[j].iter())
                .filter_map(|(a, b)| Some(((*a)?, (*b)?)))
                .unzip();
            let r = pearson(&x, &y);
            values[i][j] = r;
            values[j][i] = r;
        }
    }

    Ok(HeatmapChart {
        x_labels: labels.clone(),
        y_labels: labels,
        values,
    })
}

/// Pearson coefficient of paired samples.
///
/// `None` with fewer than two pairs or when either side has zero variance.
pub fn pearson(x: &[f64], y: &[f64]) -> Option<f64> {
    let n = x.len().min(y.len());
    if n < 2 {
        return None;
    }
    let xs = Float64Chunked::from_vec("x".into(), x[..n].to_vec());
    let ys = Float64Chunked::from_vec("y".into(), y[..n].to_vec());

    polars::prelude::cov::pearson_corr(&xs, &ys)
        .filter(|r| r.is_finite())
        .map(|r| r.clamp(-1.0, 1.0))
}
