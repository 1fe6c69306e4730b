//! Categorical encoding of text columns.
//!
//! Two modes are supported:
//! - **Label**: distinct values are sorted and mapped to `0..k` in place.
//! - **One-hot**: one `UInt8` indicator column per distinct value replaces the
//!   original column.
//!
//! No fitted state is kept, so encoded columns cannot be decoded later.

mod label;
mod one_hot;

pub use label::LabelEncoder;
pub use one_hot::OneHotEncoder;

use crate::error::{ExplorerError, Result};
use crate::types::ColumnKind;
use crate::utils::column_kind;
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{info, warn};

/// Encoding applied to the selected columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EncodingMode {
    Label,
    OneHot,
}

impl EncodingMode {
    pub fn label(self) -> &'static str {
        match self {
            Self::Label => "Label Encoding",
            Self::OneHot => "One-Hot Encoding",
        }
    }
}

/// Result of one encoding pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncodingOutcome {
    pub mode: EncodingMode,
    pub encoded: Vec<String>,
    /// Indicator columns created by one-hot encoding.
    pub added: Vec<String>,
    /// Selected columns that were not text and were left alone.
    pub skipped: Vec<String>,
}

/// Encode `columns` of a copy of `df`.
///
/// Unknown column names fail the whole call before anything is changed.
/// Non-text columns are skipped.
pub fn encode(
    df: &DataFrame,
    columns: &[String],
    mode: EncodingMode,
) -> Result<(DataFrame, EncodingOutcome)> {
    let mut seen = HashSet::new();
    let mut selected = Vec::new();
    let mut skipped = Vec::new();

    for name in columns {
        if !seen.insert(name.as_str()) {
            continue;
        }
        let column = df
            .column(name)
            .map_err(|_| ExplorerError::ColumnNotFound(name.clone()))?;
        if column_kind(column.dtype()) == ColumnKind::Text {
            selected.push(name.clone());
        } else {
            warn!("Skipping '{}': only text columns can be encoded", name);
            skipped.push(name.clone());
        }
    }

    let (result, added) = match mode {
        EncodingMode::Label => (label_encode(df, &selected)?, Vec::new()),
        EncodingMode::OneHot => one_hot_encode(df, &selected)?,
    };

    info!(
        "{} applied to {} columns ({} added, {} skipped)",
        mode.label(),
        selected.len(),
        added.len(),
        skipped.len()
    );

    Ok((
        result,
        EncodingOutcome {
            mode,
            encoded: selected,
            added,
            skipped,
        },
    ))
}

fn label_encode(df: &DataFrame, columns: &[String]) -> Result<DataFrame> {
    let mut result = df.clone();
    for name in columns {
        let series = result.column(name)?.as_materialized_series().clone();
        let (codes, _classes) = LabelEncoder::fit_transform(&series)?;
        result.replace(name, codes)?;
    }
    Ok(result)
}

fn one_hot_encode(df: &DataFrame, columns: &[String]) -> Result<(DataFrame, Vec<String>)> {
    let mut indicators = Vec::new();
    for name in columns {
        let series = df.column(name)?.as_materialized_series();
        indicators.extend(OneHotEncoder::expand(series)?);
    }

    let mut result = df.clone();
    for name in columns {
        result = result.drop(name)?;
    }

    let mut added = Vec::with_capacity(indicators.len());
    for indicator in indicators {
        let name = indicator.name().to_string();
        if result.column(&name).is_ok() {
            return Err(ExplorerError::ColumnAlreadyExists(name));
        }
        result.with_column(indicator)?;
        added.push(name);
    }

    Ok((result, added))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn states() -> DataFrame {
        df![
            "State" => ["CA", "TX", "CA"],
            "Group" => ["By Age", "By Sex", "By Age"],
            "Value" => [10.0, 5.0, 20.0],
        ]
        .unwrap()
    }

    fn codes(df: &DataFrame, name: &str) -> Vec<Option<i64>> {
        df.column(name).unwrap().as_materialized_series().i64().unwrap().into_iter().collect()
    }

    fn flags(df: &DataFrame, name: &str) -> Vec<Option<u8>> {
        df.column(name).unwrap().as_materialized_series().u8().unwrap().into_iter().collect()
    }

    #[test]
    fn test_one_hot_example() {
        let (result, outcome) =
            encode(&states(), &["State".to_string()], EncodingMode::OneHot).unwrap();

        assert!(result.column("State").is_err());
        assert_eq!(flags(&result, "State_CA"), vec![Some(1), Some(0), Some(1)]);
        assert_eq!(flags(&result, "State_TX"), vec![Some(0), Some(1), Some(0)]);
        assert_eq!(outcome.added, vec!["State_CA".to_string(), "State_TX".to_string()]);
        // k = 2 distinct values: +2 columns, -1 original
        assert_eq!(result.width(), states().width() + 2 - 1);
    }

    #[test]
    fn test_one_hot_appends_after_remaining_columns() {
        let (result, _) = encode(&states(), &["State".to_string()], EncodingMode::OneHot).unwrap();
        let names: Vec<String> = result
            .get_column_names()
            .into_iter()
            .map(|n| n.to_string())
            .collect();
        assert_eq!(names, vec!["Group", "Value", "State_CA", "State_TX"]);
    }

    #[test]
    fn test_label_preserves_shape() {
        let df = states();
        let columns = vec!["State".to_string(), "Group".to_string()];
        let (result, outcome) = encode(&df, &columns, EncodingMode::Label).unwrap();

        assert_eq!(result.shape(), df.shape());
        assert_eq!(codes(&result, "State"), vec![Some(0), Some(1), Some(0)]);
        assert_eq!(codes(&result, "Group"), vec![Some(0), Some(1), Some(0)]);
        assert_eq!(outcome.encoded, columns);
    }

    #[test]
    fn test_numeric_selection_skipped() {
        let df = states();
        let (result, outcome) =
            encode(&df, &["Value".to_string()], EncodingMode::OneHot).unwrap();
        assert!(result.equals_missing(&df));
        assert_eq!(outcome.skipped, vec!["Value".to_string()]);
    }

    #[test]
    fn test_unknown_column_fails() {
        let err = encode(&states(), &["Nope".to_string()], EncodingMode::Label).unwrap_err();
        assert_eq!(err.error_code(), "COLUMN_NOT_FOUND");
    }

    #[test]
    fn test_one_hot_collision_fails() {
        let df = df![
            "State" => ["CA", "TX"],
            "State_CA" => [1i64, 0],
        ]
        .unwrap();
        let err = encode(&df, &["State".to_string()], EncodingMode::OneHot).unwrap_err();
        assert_eq!(err.error_code(), "COLUMN_ALREADY_EXISTS");
    }

    #[test]
    fn test_duplicate_selection_encoded_once() {
        let columns = vec!["State".to_string(), "State".to_string()];
        let (result, outcome) = encode(&states(), &columns, EncodingMode::OneHot).unwrap();
        assert_eq!(outcome.encoded.len(), 1);
        assert_eq!(result.width(), 4);
    }
}
