//! Descriptive reporting over the working table.
//!
//! Everything here is read-only: descriptors and overviews are recomputed on
//! every request and never cached.

mod statistics;

use crate::error::{ExplorerError, Result};
use crate::types::{ColumnDescriptor, DatasetOverview, TablePreview};
use crate::utils::{any_value_to_string, column_kind, column_names, sorted_numeric_values};
use polars::prelude::*;
use std::collections::HashSet;

pub(crate) use statistics::{calculate_std, summarize_sorted};

/// Computes column descriptors and table overviews.
pub struct DataProfiler;

impl DataProfiler {
    /// Describe one column of `df`.
    ///
    /// `sample_limit` caps the number of distinct example values.
    pub fn describe_column(
        df: &DataFrame,
        name: &str,
        sample_limit: usize,
    ) -> Result<ColumnDescriptor> {
        let column = df
            .column(name)
            .map_err(|_| ExplorerError::ColumnNotFound(name.to_string()))?;
        let series = column.as_materialized_series();
        let kind = column_kind(series.dtype());

        let statistics = if kind.is_numeric() {
            summarize_sorted(&sorted_numeric_values(series)?)
        } else {
            None
        };

        Ok(ColumnDescriptor {
            name: name.to_string(),
            dtype: format!("{:?}", series.dtype()),
            kind,
            null_count: series.null_count(),
            unique_count: series.drop_nulls().n_unique()?,
            sample_values: Self::sample_values(series, sample_limit)?,
            statistics,
        })
    }

    /// Distinct values in order of first appearance, nulls included.
    fn sample_values(series: &Series, limit: usize) -> Result<Vec<String>> {
        let mut seen = HashSet::new();
        let mut samples = Vec::new();
        for i in 0..series.len() {
            if samples.len() >= limit {
                break;
            }
            let value = any_value_to_string(&series.get(i)?);
            if seen.insert(value.clone()) {
                samples.push(value);
            }
        }
        Ok(samples)
    }

    /// Shape of `df` plus its first `preview_rows` rows.
    pub fn overview(df: &DataFrame, preview_rows: usize) -> Result<DatasetOverview> {
        Ok(DatasetOverview {
            row_count: df.height(),
            column_count: df.width(),
            preview: Self::preview(df, preview_rows)?,
        })
    }

    /// First `rows` rows rendered as strings.
    pub fn preview(df: &DataFrame, rows: usize) -> Result<TablePreview> {
        let head = df.head(Some(rows));
        let mut rendered = Vec::with_capacity(head.height());
        for row in 0..head.height() {
            let cells = head
                .get_columns()
                .iter()
                .map(|col| col.get(row).map(|v| any_value_to_string(&v)))
                .collect::<PolarsResult<Vec<_>>>()?;
            rendered.push(cells);
        }

        Ok(TablePreview {
            columns: column_names(df),
            rows: rendered,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ColumnKind;
    use pretty_assertions::assert_eq;

    fn survey() -> DataFrame {
        df![
            "State" => [Some("CA"), Some("TX"), None, Some("CA")],
            "Value" => [Some(1.0), Some(2.0), Some(3.0), None],
        ]
        .unwrap()
    }

    #[test]
    fn test_describe_text_column() {
        let descriptor = DataProfiler::describe_column(&survey(), "State", 10).unwrap();

        assert_eq!(descriptor.kind, ColumnKind::Text);
        assert_eq!(descriptor.null_count, 1);
        assert_eq!(descriptor.unique_count, 2);
        assert_eq!(descriptor.sample_values, vec!["CA", "TX", "null"]);
        assert!(descriptor.statistics.is_none());
    }

    #[test]
    fn test_describe_numeric_column() {
        let descriptor = DataProfiler::describe_column(&survey(), "Value", 10).unwrap();
        let stats = descriptor.statistics.unwrap();

        assert_eq!(descriptor.kind, ColumnKind::Numeric);
        assert_eq!(descriptor.dtype, "Float64");
        assert_eq!(stats.count, 3);
        assert_eq!(stats.mean, 2.0);
        assert_eq!(stats.std, Some(1.0));
        assert_eq!(stats.median, 2.0);
    }

    #[test]
    fn test_sample_limit() {
        let df = df!["n" => (0..50i64).collect::<Vec<_>>()].unwrap();
        let descriptor = DataProfiler::describe_column(&df, "n", 10).unwrap();
        assert_eq!(descriptor.sample_values.len(), 10);
        assert_eq!(descriptor.unique_count, 50);
    }

    #[test]
    fn test_describe_missing_column() {
        let err = DataProfiler::describe_column(&survey(), "Age", 10).unwrap_err();
        assert_eq!(err.error_code(), "COLUMN_NOT_FOUND");
    }

    #[test]
    fn test_overview_preview() {
        let overview = DataProfiler::overview(&survey(), 2).unwrap();
        assert_eq!(overview.row_count, 4);
        assert_eq!(overview.column_count, 2);
        assert_eq!(overview.preview.columns, vec!["State", "Value"]);
        assert_eq!(
            overview.preview.rows,
            vec![vec!["CA".to_string(), "1.0".to_string()], vec!["TX".to_string(), "2.0".to_string()]]
        );
    }
}
