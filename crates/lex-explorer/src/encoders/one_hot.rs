//! One-hot expansion of a single text column.

use crate::error::Result;
use crate::utils::text_values;
use polars::prelude::*;
use std::collections::BTreeSet;

pub struct OneHotEncoder;

impl OneHotEncoder {
    /// Build one `UInt8` indicator series per distinct non-null value.
    ///
    /// Indicators are named `{column}_{value}` and ordered by value. A null
    /// cell is 0 in every indicator.
    pub fn expand(series: &Series) -> Result<Vec<Series>> {
        let values = text_values(series)?;
        let categories: BTreeSet<&str> = values.iter().flatten().map(String::as_str).collect();

        let indicators = categories
            .into_iter()
            .map(|category| {
                let flags: Vec<u8> = values
                    .iter()
                    .map(|v| u8::from(v.as_deref() == Some(category)))
                    .collect();
                Series::new(format!("{}_{}", series.name(), category).into(), flags)
            })
            .collect();

        Ok(indicators)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_one_column_per_value() {
        let series = Series::new("State".into(), &["CA", "TX", "CA", "NY"]);
        let indicators = OneHotEncoder::expand(&series).unwrap();

        let names: Vec<&str> = indicators.iter().map(|s| s.name().as_str()).collect();
        assert_eq!(names, vec!["State_CA", "State_NY", "State_TX"]);
        assert!(indicators.iter().all(|s| s.dtype() == &DataType::UInt8));
    }

    #[test]
    fn test_null_rows_are_all_zero() {
        let series = Series::new("Sex".into(), &[Some("Male"), None]);
        let indicators = OneHotEncoder::expand(&series).unwrap();

        assert_eq!(indicators.len(), 1);
        let flags: Vec<Option<u8>> = indicators[0].u8().unwrap().into_iter().collect();
        assert_eq!(flags, vec![Some(1), Some(0)]);
    }
}
