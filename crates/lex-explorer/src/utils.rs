//! Shared helpers for reading and rebuilding polars columns.

use crate::types::ColumnKind;
use polars::prelude::*;

// =============================================================================
// Data Type Utilities
// =============================================================================

/// Check if a DataType is numeric (integer or float).
#[inline]
pub fn is_numeric_dtype(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
            | DataType::Float32
            | DataType::Float64
    )
}

/// Map a polars dtype onto the explorer's two-way column tag.
pub fn column_kind(dtype: &DataType) -> ColumnKind {
    if is_numeric_dtype(dtype) {
        ColumnKind::Numeric
    } else {
        ColumnKind::Text
    }
}

// =============================================================================
// Value Extraction
// =============================================================================

/// Render a cell for display. Strings are unquoted, nulls become "null".
pub fn any_value_to_string(value: &AnyValue<'_>) -> String {
    match value {
        AnyValue::Null => "null".to_string(),
        AnyValue::String(s) => (*s).to_string(),
        AnyValue::StringOwned(s) => s.to_string(),
        AnyValue::Float64(v) => format!("{v:?}"),
        AnyValue::Float32(v) => format!("{v:?}"),
        other => other.to_string(),
    }
}

/// Values of a numeric series as `f64`, nulls preserved.
pub fn numeric_values(series: &Series) -> PolarsResult<Vec<Option<f64>>> {
    let casted = series.cast(&DataType::Float64)?;
    Ok(casted.f64()?.into_iter().collect())
}

/// Non-null values of a numeric series as `f64`, sorted ascending.
pub fn sorted_numeric_values(series: &Series) -> PolarsResult<Vec<f64>> {
    let mut values: Vec<f64> = numeric_values(series)?.into_iter().flatten().collect();
    values.sort_by(|a, b| a.total_cmp(b));
    Ok(values)
}

/// Values of any series stringified, nulls preserved.
pub fn text_values(series: &Series) -> PolarsResult<Vec<Option<String>>> {
    let casted = series.cast(&DataType::String)?;
    Ok(casted
        .str()?
        .into_iter()
        .map(|v| v.map(str::to_string))
        .collect())
}

// =============================================================================
// Series Statistics Utilities
// =============================================================================

/// Quantile of pre-sorted values with linear interpolation.
pub fn quantile_sorted(values: &[f64], quantile: f64) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let pos = quantile.clamp(0.0, 1.0) * (values.len() as f64 - 1.0);
    let lower = pos.floor() as usize;
    let upper = pos.ceil() as usize;
    if lower == upper {
        return Some(values[lower]);
    }
    let weight = pos - lower as f64;
    Some(values[lower] + (values[upper] - values[lower]) * weight)
}

/// Most frequent element of a sorted slice; the earliest run wins ties.
fn mode_of_sorted<T: PartialEq>(sorted: &[T]) -> Option<&T> {
    let mut best: Option<(&T, usize)> = None;
    let mut start = 0;
    while start < sorted.len() {
        let mut end = start + 1;
        while end < sorted.len() && sorted[end] == sorted[start] {
            end += 1;
        }
        let run = end - start;
        if best.is_none_or(|(_, count)| run > count) {
            best = Some((&sorted[start], run));
        }
        start = end;
    }
    best.map(|(value, _)| value)
}

/// Most frequent non-null value of a numeric series, smallest on ties.
pub fn numeric_mode(series: &Series) -> PolarsResult<Option<f64>> {
    let sorted = sorted_numeric_values(series)?;
    Ok(mode_of_sorted(&sorted).copied())
}

/// Most frequent non-null value of a series as text, lexically smallest on ties.
pub fn string_mode(series: &Series) -> PolarsResult<Option<String>> {
    let mut values: Vec<String> = text_values(series)?.into_iter().flatten().collect();
    values.sort();
    Ok(mode_of_sorted(&values).cloned())
}

// =============================================================================
// Series Transformation Utilities
// =============================================================================

/// Fill nulls of a numeric series, producing a Float64 series.
pub fn fill_numeric_nulls(series: &Series, fill_value: f64) -> PolarsResult<Series> {
    let filled: Vec<Option<f64>> = numeric_values(series)?
        .into_iter()
        .map(|v| Some(v.unwrap_or(fill_value)))
        .collect();
    Ok(Series::new(series.name().clone(), filled))
}

/// Fill nulls of any series with text, producing a String series.
pub fn fill_string_nulls(series: &Series, fill_value: &str) -> PolarsResult<Series> {
    let filled: Vec<Option<String>> = text_values(series)?
        .into_iter()
        .map(|v| Some(v.unwrap_or_else(|| fill_value.to_string())))
        .collect();
    Ok(Series::new(series.name().clone(), filled))
}

/// Owned column names of a frame, in order.
pub fn column_names(df: &DataFrame) -> Vec<String> {
    df.get_column_names()
        .into_iter()
        .map(|name| name.to_string())
        .collect()
}

/// Truncate a string to `max_len` characters with an ellipsis.
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}
