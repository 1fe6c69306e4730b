//! CSV export of the working table.

use crate::error::{Result, ResultExt};
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// What was written by [`export_to_dir`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportReceipt {
    pub path: PathBuf,
    pub rows: usize,
    pub columns: usize,
    pub bytes: usize,
}

/// Serialize `df` as UTF-8 CSV with a header row and no index column.
pub fn to_csv_bytes(df: &DataFrame) -> Result<Vec<u8>> {
    let mut df = df.clone();
    let mut buffer = Vec::new();
    CsvWriter::new(&mut buffer)
        .include_header(true)
        .with_separator(b',')
        .with_quote_char(b'"')
        .finish(&mut df)
        .context("Failed to write CSV")?;
    Ok(buffer)
}

/// Write `df` to `dir/file_name`, creating `dir` when needed.
pub fn export_to_dir(df: &DataFrame, dir: &Path, file_name: &str) -> Result<ExportReceipt> {
    fs::create_dir_all(dir)?;
    let path = dir.join(file_name);
    let bytes = to_csv_bytes(df)?;
    fs::write(&path, &bytes)?;

    info!("Dataset saved: {} ({} bytes)", path.display(), bytes.len());
    Ok(ExportReceipt {
        path,
        rows: df.height(),
        columns: df.width(),
        bytes: bytes.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_EXPORT_FILE_NAME;
    use crate::store::read_csv_file;

    fn frame() -> DataFrame {
        df![
            "State" => [Some("CA"), Some("New York, NY"), None],
            "Value" => [Some(10.5), None, Some(3.0)],
            "Count" => [1i64, 2, 3],
        ]
        .unwrap()
    }

    #[test]
    fn test_csv_bytes_header_and_quoting() {
        let bytes = to_csv_bytes(&frame()).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("State,Value,Count"));
        assert_eq!(lines.next(), Some("CA,10.5,1"));
        assert_eq!(lines.next(), Some("\"New York, NY\",,2"));
    }

    #[test]
    fn test_export_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("outputs");
        let df = frame();

        let receipt = export_to_dir(&df, &out, DEFAULT_EXPORT_FILE_NAME).unwrap();
        assert_eq!(receipt.path, out.join(DEFAULT_EXPORT_FILE_NAME));
        assert_eq!((receipt.rows, receipt.columns), (3, 3));
        assert!(receipt.bytes > 0);

        let reloaded = read_csv_file(&receipt.path, 100).unwrap();
        assert!(reloaded.equals_missing(&df));
    }
}
