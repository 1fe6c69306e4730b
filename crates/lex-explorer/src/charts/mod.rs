//! Chart data for the visualization page.
//!
//! Charts are computed as plain data ([`Chart`]) so they can be serialized for
//! JSON output, and rendered as text through their `Display` impl.
//!
//! | Request              | Columns            | Output                          |
//! |----------------------|--------------------|---------------------------------|
//! | `Histogram(col)`     | one numeric        | bins + density overlay          |
//! | `Boxplot(col)`       | one numeric        | quartiles, whiskers, outliers   |
//! | `CorrelationHeatmap` | every numeric      | Pearson matrix                  |
//! | `Scatter(x, y)`      | two numeric        | points                          |
//!
//! Requests naming a missing or non-numeric column produce no chart.

mod boxplot;
mod correlation;
mod histogram;
mod scatter;
mod text;

pub use boxplot::{BoxplotChart, build_boxplot};
pub use correlation::{HeatmapChart, build_correlation_heatmap, pearson};
pub use histogram::{DensityPoint, HistogramBin, HistogramChart, build_histogram};
pub use scatter::{ScatterChart, build_scatter};

use crate::error::Result;
use crate::types::ColumnKind;
use crate::utils::{column_kind, numeric_values};
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A chart selection on the visualization page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChartRequest {
    Histogram { column: String },
    Boxplot { column: String },
    CorrelationHeatmap,
    Scatter { x: String, y: String },
}

impl ChartRequest {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Histogram { .. } => "Histogram",
            Self::Boxplot { .. } => "Boxplot",
            Self::CorrelationHeatmap => "Correlation Heatmap",
            Self::Scatter { .. } => "Scatter Plot",
        }
    }
}

/// Computed chart data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Chart {
    Histogram(HistogramChart),
    Boxplot(BoxplotChart),
    CorrelationHeatmap(HeatmapChart),
    Scatter(ScatterChart),
}

/// Compute the chart for `request` against `df`.
///
/// Returns `Ok(None)` when a named column is absent or not numeric.
pub fn render_chart(df: &DataFrame, request: &ChartRequest, bins: usize) -> Result<Option<Chart>> {
    let chart = match request {
        ChartRequest::Histogram { column } => numeric_column(df, column)?
            .map(|values| Chart::Histogram(build_histogram(column, &values, bins))),
        ChartRequest::Boxplot { column } => numeric_column(df, column)?
            .and_then(|values| build_boxplot(column, &values))
            .map(Chart::Boxplot),
        ChartRequest::CorrelationHeatmap => {
            Some(Chart::CorrelationHeatmap(build_correlation_heatmap(df)?))
        }
        ChartRequest::Scatter { x, y } => {
            match (numeric_column(df, x)?, numeric_column(df, y)?) {
                (Some(xs), Some(ys)) => Some(Chart::Scatter(build_scatter(x, y, &xs, &ys))),
                _ => None,
            }
        }
    };

    if chart.is_none() {
        debug!("{} skipped: column missing or not numeric", request.label());
    }
    Ok(chart)
}

/// Values of a numeric column, or `None` when it is absent or text.
pub(crate) fn numeric_column(df: &DataFrame, name: &str) -> Result<Option<Vec<Option<f64>>>> {
    let Ok(column) = df.column(name) else {
        return Ok(None);
    };
    if column_kind(column.dtype()) != ColumnKind::Numeric {
        return Ok(None);
    }
    Ok(Some(numeric_values(column.as_materialized_series())?))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame() -> DataFrame {
        df![
            "State" => ["CA", "TX", "NY", "CA"],
            "Value" => [1.0, 2.0, 3.0, 4.0],
            "Rate" => [2.0, 4.0, 6.0, 8.0],
        ]
        .unwrap()
    }

    #[test]
    fn test_text_column_skipped() {
        let request = ChartRequest::Histogram { column: "State".to_string() };
        assert!(render_chart(&frame(), &request, 20).unwrap().is_none());

        let request = ChartRequest::Scatter { x: "Value".to_string(), y: "State".to_string() };
        assert!(render_chart(&frame(), &request, 20).unwrap().is_none());
    }

    #[test]
    fn test_missing_column_skipped() {
        let request = ChartRequest::Boxplot { column: "Nope".to_string() };
        assert!(render_chart(&frame(), &request, 20).unwrap().is_none());
    }

    #[test]
    fn test_each_kind_renders() {
        let requests = [
            ChartRequest::Histogram { column: "Value".to_string() },
            ChartRequest::Boxplot { column: "Value".to_string() },
            ChartRequest::CorrelationHeatmap,
            ChartRequest::Scatter { x: "Value".to_string(), y: "Rate".to_string() },
        ];
        for request in &requests {
            let chart = render_chart(&frame(), request, 20).unwrap();
            assert!(chart.is_some(), "{} should render", request.label());
            assert!(!chart.unwrap().to_string().is_empty());
        }
    }

    #[test]
    fn test_chart_serializes_with_kind_tag() {
        let chart = render_chart(&frame(), &ChartRequest::CorrelationHeatmap, 20)
            .unwrap()
            .unwrap();
        let json = serde_json::to_value(&chart).unwrap();
        assert_eq!(json["kind"], "correlation_heatmap");
    }
}
