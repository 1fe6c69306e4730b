//! Dataset store: the working table and its original snapshot.
//!
//! ```text
//! ┌──────────────────────────────┐      reset()       ┌──────────────────────────────┐
//! │ original: DataFrame          │ ─────────────────▶ │ working: DataFrame           │
//! │ (taken once at load, frozen) │    fresh clone     │ (mutated by fill / encode)   │
//! └──────────────────────────────┘                    └──────────────────────────────┘
//! ```
//!
//! Polars frames share their buffers on clone, so the snapshot costs nothing
//! until the working table is rewritten.

use crate::config::ExplorerConfig;
use crate::error::{ExplorerError, Result};
use crate::types::ColumnKind;
use crate::utils::column_kind;
use polars::prelude::*;
use std::path::Path;
use tracing::{debug, info};

/// Cell texts read as missing, on top of empty fields.
const NULL_TOKENS: &[&str] = &[
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Read a CSV file with a header row.
///
/// Missing files are reported as [`ExplorerError::DataFileNotFound`] before
/// polars gets a chance to produce a less specific I/O error.
pub fn read_csv_file(path: &Path, infer_schema_length: usize) -> Result<DataFrame> {
    if !path.exists() {
        return Err(ExplorerError::DataFileNotFound(path.display().to_string()));
    }

    let null_values =
        NullValues::AllColumns(NULL_TOKENS.iter().map(|t| PlSmallStr::from(*t)).collect());
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(infer_schema_length))
        .with_parse_options(CsvParseOptions::default().with_null_values(Some(null_values)))
        .try_into_reader_with_file_path(Some(path.into()))?
        .finish()?;

    debug!("Read {:?} from {}", df.shape(), path.display());
    Ok(df)
}

/// Holds the working table and the snapshot it can be reset to.
#[derive(Debug, Clone)]
pub struct DatasetStore {
    working: DataFrame,
    original: DataFrame,
}

impl DatasetStore {
    /// Load the configured dataset into both the working table and the snapshot.
    pub fn load(config: &ExplorerConfig) -> Result<Self> {
        info!("Loading dataset from: {}", config.data_path.display());
        let df = read_csv_file(&config.data_path, config.infer_schema_length)?;
        info!("Dataset loaded successfully: {:?}", df.shape());
        Ok(Self::from_frame(df))
    }

    /// Build a store around an in-memory frame.
    pub fn from_frame(df: DataFrame) -> Self {
        Self {
            original: df.clone(),
            working: df,
        }
    }

    /// Overwrite the working table with a fresh copy of the snapshot.
    pub fn reset(&mut self) {
        self.working = self.original.clone();
        info!("Working table reset to original snapshot {:?}", self.working.shape());
    }

    pub fn working(&self) -> &DataFrame {
        &self.working
    }

    pub fn original(&self) -> &DataFrame {
        &self.original
    }

    /// Replace the working table wholesale.
    pub fn replace_working(&mut self, df: DataFrame) {
        debug!("Working table replaced: {:?} -> {:?}", self.working.shape(), df.shape());
        self.working = df;
    }

    /// (rows, columns) of the working table.
    pub fn shape(&self) -> (usize, usize) {
        self.working.shape()
    }

    /// Whether the working table still matches the snapshot exactly.
    pub fn is_pristine(&self) -> bool {
        self.working.equals_missing(&self.original)
    }

    /// Column names of the working table paired with their kind.
    pub fn column_kinds(&self) -> Vec<(String, ColumnKind)> {
        self.working
            .get_columns()
            .iter()
            .map(|col| (col.name().to_string(), column_kind(col.dtype())))
            .collect()
    }

    /// Names of working-table columns with the given kind.
    pub fn columns_of_kind(&self, kind: ColumnKind) -> Vec<String> {
        self.column_kinds()
            .into_iter()
            .filter(|(_, k)| *k == kind)
            .map(|(name, _)| name)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn sample_frame() -> DataFrame {
        df![
            "State" => ["CA", "TX", "CA"],
            "Value" => [10.0, 5.0, 20.0],
        ]
        .unwrap()
    }

    #[test]
    fn test_from_frame_snapshot_matches() {
        let store = DatasetStore::from_frame(sample_frame());
        assert!(store.is_pristine());
        assert_eq!(store.shape(), (3, 2));
    }

    #[test]
    fn test_reset_restores_original() {
        let mut store = DatasetStore::from_frame(sample_frame());
        let dropped = store.working().drop("State").unwrap();
        store.replace_working(dropped);
        assert!(!store.is_pristine());
        assert_eq!(store.original().width(), 2);

        store.reset();
        assert!(store.is_pristine());
        assert!(store.working().equals_missing(&sample_frame()));
    }

    #[test]
    fn test_column_kinds() {
        let store = DatasetStore::from_frame(sample_frame());
        assert_eq!(
            store.column_kinds(),
            vec![
                ("State".to_string(), ColumnKind::Text),
                ("Value".to_string(), ColumnKind::Numeric),
            ]
        );
        assert_eq!(store.columns_of_kind(ColumnKind::Numeric), vec!["Value".to_string()]);
    }

    #[test]
    fn test_load_missing_file() {
        let config = ExplorerConfig::builder()
            .data_path("definitely/not/here.csv")
            .build()
            .unwrap();
        let err = DatasetStore::load(&config).unwrap_err();
        assert_eq!(err.error_code(), "DATA_FILE_NOT_FOUND");
    }

    #[test]
    fn test_load_reads_csv() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.csv");
        fs::write(&path, "State,Value\nCA,10\nTX,\n").unwrap();

        let config = ExplorerConfig::builder().data_path(&path).build().unwrap();
        let store = DatasetStore::load(&config).unwrap();

        assert_eq!(store.shape(), (2, 2));
        assert_eq!(store.working().column("Value").unwrap().null_count(), 1);
        assert!(store.is_pristine());
    }

    #[test]
    fn test_load_treats_na_tokens_as_missing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.csv");
        fs::write(&path, "Age,State\n10,CA\nNA,N/A\n30,TX\n").unwrap();

        let df = read_csv_file(&path, 100).unwrap();

        let age = df.column("Age").unwrap();
        assert_eq!(column_kind(age.dtype()), ColumnKind::Numeric);
        assert_eq!(age.null_count(), 1);
        assert_eq!(df.column("State").unwrap().null_count(), 1);
    }
}
