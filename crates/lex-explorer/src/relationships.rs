//! Group-by means of the value column.

use crate::error::{ExplorerError, Result};
use crate::types::ColumnKind;
use crate::utils::{column_kind, numeric_values, text_values};
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Alias of the aggregated column; chosen so it cannot shadow a data column.
const MEAN_ALIAS: &str = "__group_mean__";

/// Mean of the value column within one group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupMean {
    pub key: String,
    /// `None` when every value in the group is null.
    pub mean: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Relationship {
    pub group_column: String,
    pub value_column: String,
    /// Sorted by descending mean.
    pub groups: Vec<GroupMean>,
}

impl Relationship {
    pub fn caption(&self) -> String {
        format!("This shows how Long COVID rates vary by {}.", self.group_column)
    }
}

/// Mean of `value_column` per distinct value of `group_column`.
///
/// Null group keys are dropped and null values ignored. Groups are sorted by
/// descending mean, all-null groups last, ties by ascending key.
pub fn relate(df: &DataFrame, group_column: &str, value_column: &str) -> Result<Relationship> {
    let value = df
        .column(value_column)
        .map_err(|_| ExplorerError::ValueColumnMissing(value_column.to_string()))?;
    if column_kind(value.dtype()) != ColumnKind::Numeric {
        return Err(ExplorerError::NonNumericColumn(value_column.to_string()));
    }
    if df.column(group_column).is_err() {
        return Err(ExplorerError::ColumnNotFound(group_column.to_string()));
    }

    let grouped = df
        .clone()
        .lazy()
        .filter(col(group_column).is_not_null())
        .group_by([col(group_column)])
        .agg([col(value_column).cast(DataType::Float64).mean().alias(MEAN_ALIAS)])
        .sort_by_exprs(
            vec![col(MEAN_ALIAS), col(group_column)],
            SortMultipleOptions::default()
                .with_order_descending_multi([true, false])
                .with_nulls_last(true),
        )
        .collect()?;

    let keys = text_values(grouped.column(group_column)?.as_materialized_series())?;
    let means = numeric_values(grouped.column(MEAN_ALIAS)?.as_materialized_series())?;

    let groups: Vec<GroupMean> = keys
        .into_iter()
        .zip(means)
        .filter_map(|(key, mean)| Some(GroupMean { key: key?, mean }))
        .collect();

    debug!(
        "Grouped '{}' by '{}': {} groups",
        value_column,
        group_column,
        groups.len()
    );

    Ok(Relationship {
        group_column: group_column.to_string(),
        value_column: value_column.to_string(),
        groups,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn group(key: &str, mean: Option<f64>) -> GroupMean {
        GroupMean {
            key: key.to_string(),
            mean,
        }
    }

    #[test]
    fn test_state_means_sorted_descending() {
        let df = df![
            "State" => ["CA", "TX", "CA"],
            "Value" => [10.0, 5.0, 20.0],
        ]
        .unwrap();

        let rel = relate(&df, "State", "Value").unwrap();
        assert_eq!(rel.groups, vec![group("CA", Some(15.0)), group("TX", Some(5.0))]);
        assert_eq!(rel.caption(), "This shows how Long COVID rates vary by State.");
    }

    #[test]
    fn test_ties_and_all_null_groups() {
        let df = df![
            "State" => [Some("B"), Some("A"), Some("C"), None],
            "Value" => [Some(5.0), Some(5.0), None, Some(99.0)],
        ]
        .unwrap();

        let rel = relate(&df, "State", "Value").unwrap();
        assert_eq!(
            rel.groups,
            vec![group("A", Some(5.0)), group("B", Some(5.0)), group("C", None)]
        );
    }

    #[test]
    fn test_integer_values_averaged_as_float() {
        let df = df![
            "Group" => ["x", "x"],
            "Value" => [1i64, 2],
        ]
        .unwrap();
        let rel = relate(&df, "Group", "Value").unwrap();
        assert_eq!(rel.groups, vec![group("x", Some(1.5))]);
    }

    #[test]
    fn test_missing_value_column_is_warning() {
        let df = df!["State" => ["CA"]].unwrap();
        let err = relate(&df, "State", "Value").unwrap_err();
        assert!(err.is_warning());
        assert_eq!(err.to_string(), "Column 'Value' not found in dataset!");
    }

    #[test]
    fn test_text_value_column_rejected() {
        let df = df!["State" => ["CA"], "Value" => ["high"]].unwrap();
        let err = relate(&df, "State", "Value").unwrap_err();
        assert_eq!(err.error_code(), "NON_NUMERIC_COLUMN");
    }

    #[test]
    fn test_missing_group_column() {
        let df = df!["Value" => [1.0]].unwrap();
        let err = relate(&df, "State", "Value").unwrap_err();
        assert_eq!(err.error_code(), "COLUMN_NOT_FOUND");
    }
}
