//! Shared types reported by the explorer components.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Closed type tag attached to every column.
///
/// Integer and float dtypes are `Numeric`; everything else (strings,
/// booleans, dates) is `Text`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnKind {
    Numeric,
    Text,
}

impl ColumnKind {
    pub fn is_numeric(self) -> bool {
        matches!(self, Self::Numeric)
    }
}

impl fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Numeric => write!(f, "numeric"),
            Self::Text => write!(f, "text"),
        }
    }
}

/// Five-number-style summary of a numeric column.
///
/// Quantiles use linear interpolation; `std` is the sample standard
/// deviation. `std` is `None` for a single observation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryStatistics {
    pub count: usize,
    pub mean: f64,
    pub std: Option<f64>,
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
}

/// Per-column report computed on demand, never cached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnDescriptor {
    pub name: String,
    /// Polars dtype, e.g. "Int64" or "String".
    pub dtype: String,
    pub kind: ColumnKind,
    pub null_count: usize,
    /// Distinct non-null values.
    pub unique_count: usize,
    /// Distinct values in order of first appearance; nulls appear as "null".
    pub sample_values: Vec<String>,
    /// Present only for numeric columns with at least one value.
    pub statistics: Option<SummaryStatistics>,
}

/// First rows of the working table rendered as strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TablePreview {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Shape and preview of the working table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetOverview {
    pub row_count: usize,
    pub column_count: usize,
    pub preview: TablePreview,
}

/// Null count of one column, as listed on the missing values page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingCount {
    pub column: String,
    pub null_count: usize,
}
