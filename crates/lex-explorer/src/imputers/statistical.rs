//! Statistical fill methods.
//!
//! Each method fills the nulls of one column in place and returns the
//! replacement as displayed, or `None` when no replacement could be computed
//! (missing column, all-null column).

use crate::error::Result;
use crate::types::ColumnKind;
use crate::utils::{column_kind, fill_numeric_nulls, fill_string_nulls, numeric_mode, string_mode};
use polars::prelude::*;
use tracing::debug;

/// Statistical imputation methods for filling missing values.
pub struct StatisticalImputer;

impl StatisticalImputer {
    /// Fill a numeric column with its mean.
    pub fn apply_mean(df: &mut DataFrame, col_name: &str) -> Result<Option<String>> {
        let Ok(column) = df.column(col_name) else {
            return Ok(None);
        };
        let mean = column.as_materialized_series().mean();
        Self::fill_numeric(df, col_name, mean, "mean")
    }

    /// Fill a numeric column with its median.
    pub fn apply_median(df: &mut DataFrame, col_name: &str) -> Result<Option<String>> {
        let Ok(column) = df.column(col_name) else {
            return Ok(None);
        };
        let median = column.as_materialized_series().median();
        Self::fill_numeric(df, col_name, median, "median")
    }

    /// Fill any column with its most frequent value.
    ///
    /// Numeric columns stay numeric; everything else is filled as text.
    pub fn apply_mode(df: &mut DataFrame, col_name: &str) -> Result<Option<String>> {
        let Ok(column) = df.column(col_name) else {
            return Ok(None);
        };
        let series = column.as_materialized_series().clone();

        match column_kind(series.dtype()) {
            ColumnKind::Numeric => {
                let mode = numeric_mode(&series)?;
                Self::fill_numeric(df, col_name, mode, "mode")
            }
            ColumnKind::Text => {
                let Some(mode) = string_mode(&series)? else {
                    return Ok(None);
                };
                df.replace(col_name, fill_string_nulls(&series, &mode)?)?;
                debug!("Filled '{}' with mode: '{}'", col_name, mode);
                Ok(Some(mode))
            }
        }
    }

    /// Fill a column with a user-supplied value.
    ///
    /// The value is not validated against the column type: a numeric column
    /// receives it as a number when it parses as one, otherwise the column is
    /// converted to text.
    pub fn apply_custom(df: &mut DataFrame, col_name: &str, value: &str) -> Result<Option<String>> {
        let Ok(column) = df.column(col_name) else {
            return Ok(None);
        };
        let series = column.as_materialized_series().clone();

        let numeric_value = value.parse::<f64>().ok();
        let filled = match (column_kind(series.dtype()), numeric_value) {
            (ColumnKind::Numeric, Some(number)) => fill_numeric_nulls(&series, number)?,
            _ => fill_string_nulls(&series, value)?,
        };

        df.replace(col_name, filled)?;
        debug!("Filled '{}' with custom value: '{}'", col_name, value);
        Ok(Some(value.to_string()))
    }

    fn fill_numeric(
        df: &mut DataFrame,
        col_name: &str,
        fill_value: Option<f64>,
        method: &str,
    ) -> Result<Option<String>> {
        let Some(fill_value) = fill_value else {
            return Ok(None);
        };
        let series = df.column(col_name)?.as_materialized_series().clone();
        df.replace(col_name, fill_numeric_nulls(&series, fill_value)?)?;

        debug!("Filled '{}' with {}: {:.2}", col_name, method, fill_value);
        Ok(Some(format!("{fill_value:.2}")))
    }
}
