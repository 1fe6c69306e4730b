//! Missing-value imputation for the working table.
//!
//! [`impute`] walks every column that holds at least one null and applies a
//! [`FillStrategy`] through [`StatisticalImputer`]. Columns without nulls are
//! never rewritten.

mod statistical;

pub use statistical::StatisticalImputer;

use crate::error::Result;
use crate::types::{ColumnKind, MissingCount};
use crate::utils::column_kind;
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, info};

/// How null cells are replaced.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FillStrategy {
    /// Leave the table untouched.
    #[default]
    None,
    /// Column mean; numeric columns only.
    Mean,
    /// Column median; numeric columns only.
    Median,
    /// Most frequent value; any column.
    Mode,
    /// User-supplied replacement per column. Columns without an entry (or
    /// with a blank one) are left unchanged.
    Custom(BTreeMap<String, String>),
}

impl FillStrategy {
    pub fn label(&self) -> &'static str {
        match self {
            Self::None => "None",
            Self::Mean => "Mean",
            Self::Median => "Median",
            Self::Mode => "Mode",
            Self::Custom(_) => "Custom value",
        }
    }
}

/// A column that received replacement values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnFill {
    pub column: String,
    pub filled_cells: usize,
    /// The replacement value as displayed.
    pub value: String,
}

/// Why a column with nulls was left alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// Mean/median requested on a text column.
    NotNumeric,
    /// Custom strategy without a value for this column.
    NoCustomValue,
    /// Every value is null, so no statistic exists.
    NoValidValues,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedColumn {
    pub column: String,
    pub reason: SkipReason,
}

/// Result of one imputation pass.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ImputationOutcome {
    pub strategy: String,
    pub filled: Vec<ColumnFill>,
    pub skipped: Vec<SkippedColumn>,
}

impl ImputationOutcome {
    pub fn total_filled(&self) -> usize {
        self.filled.iter().map(|f| f.filled_cells).sum()
    }
}

/// Columns holding at least one null, in table order.
pub fn missing_value_summary(df: &DataFrame) -> Vec<MissingCount> {
    df.get_columns()
        .iter()
        .filter(|col| col.null_count() > 0)
        .map(|col| MissingCount {
            column: col.name().to_string(),
            null_count: col.null_count(),
        })
        .collect()
}

/// Fill nulls in a copy of `df` according to `strategy`.
///
/// The input frame is not modified; the caller swaps the returned frame into
/// the store.
pub fn impute(df: &DataFrame, strategy: &FillStrategy) -> Result<(DataFrame, ImputationOutcome)> {
    let mut result = df.clone();
    let mut outcome = ImputationOutcome {
        strategy: strategy.label().to_string(),
        ..ImputationOutcome::default()
    };

    if matches!(strategy, FillStrategy::None) {
        return Ok((result, outcome));
    }

    for missing in missing_value_summary(df) {
        let column = missing.column;
        let kind = column_kind(df.column(&column)?.dtype());

        let fill = match strategy {
            FillStrategy::None => None,
            FillStrategy::Mean | FillStrategy::Median if kind == ColumnKind::Text => {
                debug!("Skipping '{}': {} needs a numeric column", column, strategy.label());
                outcome.skipped.push(SkippedColumn {
                    column,
                    reason: SkipReason::NotNumeric,
                });
                continue;
            }
            FillStrategy::Mean => StatisticalImputer::apply_mean(&mut result, &column)?,
            FillStrategy::Median => StatisticalImputer::apply_median(&mut result, &column)?,
            FillStrategy::Mode => StatisticalImputer::apply_mode(&mut result, &column)?,
            FillStrategy::Custom(values) => {
                match values.get(&column).filter(|v| !v.trim().is_empty()) {
                    Some(value) => StatisticalImputer::apply_custom(&mut result, &column, value)?,
                    None => {
                        outcome.skipped.push(SkippedColumn {
                            column,
                            reason: SkipReason::NoCustomValue,
                        });
                        continue;
                    }
                }
            }
        };

        match fill {
            Some(value) => outcome.filled.push(ColumnFill {
                column,
                filled_cells: missing.null_count,
                value,
            }),
            None => outcome.skipped.push(SkippedColumn {
                column,
                reason: SkipReason::NoValidValues,
            }),
        }
    }

    info!(
        "{} imputation filled {} cells across {} columns",
        strategy.label(),
        outcome.total_filled(),
        outcome.filled.len()
    );
    Ok((result, outcome))
}
