//! Label encoding: sorted distinct values mapped to consecutive integers.

use crate::error::Result;
use crate::utils::text_values;
use polars::prelude::*;
use std::collections::BTreeMap;

/// Text used for null cells before encoding, so nulls get their own code.
pub const NULL_LABEL: &str = "nan";

pub struct LabelEncoder;

impl LabelEncoder {
    /// Encode a column into Int64 codes.
    ///
    /// Values are stringified first, classes are sorted lexically and code
    /// `i` is the position of the value among the classes. Returns the codes
    /// and the fitted classes.
    pub fn fit_transform(series: &Series) -> Result<(Series, Vec<String>)> {
        let values: Vec<String> = text_values(series)?
            .into_iter()
            .map(|v| v.unwrap_or_else(|| NULL_LABEL.to_string()))
            .collect();

        let mut classes: BTreeMap<&str, i64> =
            values.iter().map(|v| (v.as_str(), 0)).collect();
        for (code, slot) in classes.values_mut().enumerate() {
            *slot = code as i64;
        }

        let codes: Vec<i64> = values.iter().map(|v| classes[v.as_str()]).collect();
        let fitted = classes.keys().map(|c| c.to_string()).collect();

        Ok((Series::new(series.name().clone(), codes), fitted))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_transform_sorted_classes() {
        let series = Series::new("State".into(), &["TX", "CA", "NY", "CA"]);
        let (codes, classes) = LabelEncoder::fit_transform(&series).unwrap();

        assert_eq!(classes, vec!["CA", "NY", "TX"]);
        let codes: Vec<Option<i64>> = codes.i64().unwrap().into_iter().collect();
        assert_eq!(codes, vec![Some(2), Some(0), Some(1), Some(0)]);
    }

    #[test]
    fn test_nulls_get_their_own_code() {
        let series = Series::new("Sex".into(), &[Some("Male"), None, Some("Female")]);
        let (codes, classes) = LabelEncoder::fit_transform(&series).unwrap();

        assert_eq!(classes, vec!["Female", "Male", "nan"]);
        assert_eq!(codes.null_count(), 0);
        assert_eq!(codes.name().as_str(), "Sex");
    }
}
