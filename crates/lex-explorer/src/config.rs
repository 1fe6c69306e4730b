//! Configuration for an exploration session.
//!
//! Configuration is built with [`ExplorerConfig::builder()`] or loaded from a
//! JSON file with [`ExplorerConfig::from_json_file`]. Missing JSON fields fall
//! back to the defaults below.

use crate::error::ExplorerError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Default dataset location, relative to the working directory.
pub const DEFAULT_DATA_PATH: &str = "Post-COVID_Conditions.csv";

/// Fixed name of the exported table.
pub const DEFAULT_EXPORT_FILE_NAME: &str = "Processed_LongCOVID_Data.csv";

/// Column averaged by the relationships page.
pub const DEFAULT_VALUE_COLUMN: &str = "Value";

/// Configuration for an exploration session.
///
/// # Example
///
/// ```rust,ignore
/// use lex_explorer::config::ExplorerConfig;
///
/// let config = ExplorerConfig::builder()
///     .data_path("data/survey.csv")
///     .histogram_bins(30)
///     .build()?;
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExplorerConfig {
    /// CSV file read once at startup.
    /// Default: "Post-COVID_Conditions.csv"
    pub data_path: PathBuf,

    /// Directory the exporter writes into.
    /// Default: "./outputs"
    pub output_dir: PathBuf,

    /// File name used for every export.
    /// Default: "Processed_LongCOVID_Data.csv"
    pub export_file_name: String,

    /// Numeric column averaged per group on the relationships page.
    /// Default: "Value"
    pub value_column: String,

    /// Rows shown in the overview preview.
    /// Default: 10
    pub preview_rows: usize,

    /// Maximum distinct sample values reported per column.
    /// Default: 10
    pub sample_value_limit: usize,

    /// Histogram bin count.
    /// Default: 20
    pub histogram_bins: usize,

    /// Rows sampled for CSV schema inference.
    /// Default: 1000
    pub infer_schema_length: usize,
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            output_dir: PathBuf::from("./outputs"),
            export_file_name: DEFAULT_EXPORT_FILE_NAME.to_string(),
            value_column: DEFAULT_VALUE_COLUMN.to_string(),
            preview_rows: 10,
            sample_value_limit: 10,
            histogram_bins: 20,
            infer_schema_length: 1000,
        }
    }
}

impl ExplorerConfig {
    /// Create a new configuration builder.
    pub fn builder() -> ExplorerConfigBuilder {
        ExplorerConfigBuilder::default()
    }

    /// Load a configuration from a JSON file and validate it.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ExplorerError> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: ExplorerConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Path of the exported file inside the output directory.
    pub fn export_path(&self) -> PathBuf {
        self.output_dir.join(&self.export_file_name)
    }

    /// Validate the configuration and return errors if invalid.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        for (field, value) in [
            ("preview_rows", self.preview_rows),
            ("sample_value_limit", self.sample_value_limit),
            ("histogram_bins", self.histogram_bins),
            ("infer_schema_length", self.infer_schema_length),
        ] {
            if value == 0 {
                return Err(ConfigValidationError::ZeroCount(field.to_string()));
            }
        }

        if self.value_column.trim().is_empty() {
            return Err(ConfigValidationError::EmptyField(
                "value_column".to_string(),
            ));
        }

        if self.export_file_name.trim().is_empty() {
            return Err(ConfigValidationError::EmptyField(
                "export_file_name".to_string(),
            ));
        }

        Ok(())
    }
}

/// Errors that can occur during configuration validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Invalid value for '{0}': must be at least 1")]
    ZeroCount(String),

    #[error("Invalid value for '{0}': must not be empty")]
    EmptyField(String),
}

impl From<ConfigValidationError> for ExplorerError {
    fn from(err: ConfigValidationError) -> Self {
        ExplorerError::InvalidConfig(err.to_string())
    }
}

/// Builder for [`ExplorerConfig`] with fluent API.
#[derive(Debug, Default)]
pub struct ExplorerConfigBuilder {
    base: Option<ExplorerConfig>,
    data_path: Option<PathBuf>,
    output_dir: Option<PathBuf>,
    export_file_name: Option<String>,
    value_column: Option<String>,
    preview_rows: Option<usize>,
    sample_value_limit: Option<usize>,
    histogram_bins: Option<usize>,
    infer_schema_length: Option<usize>,
}

impl ExplorerConfigBuilder {
    /// Start from an existing configuration instead of the defaults.
    ///
    /// Used by the CLI to layer flags over a config file.
    pub fn from_config(config: ExplorerConfig) -> Self {
        Self {
            base: Some(config),
            ..Self::default()
        }
    }

    /// Set the dataset path.
    pub fn data_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.data_path = Some(path.into());
        self
    }

    /// Set the export directory.
    pub fn output_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(path.into());
        self
    }

    /// Set the export file name.
    pub fn export_file_name(mut self, name: impl Into<String>) -> Self {
        self.export_file_name = Some(name.into());
        self
    }

    /// Set the column averaged on the relationships page.
    pub fn value_column(mut self, column: impl Into<String>) -> Self {
        self.value_column = Some(column.into());
        self
    }

    /// Set the number of preview rows.
    pub fn preview_rows(mut self, rows: usize) -> Self {
        self.preview_rows = Some(rows);
        self
    }

    /// Set the maximum number of sample values per column.
    pub fn sample_value_limit(mut self, limit: usize) -> Self {
        self.sample_value_limit = Some(limit);
        self
    }

    /// Set the histogram bin count.
    pub fn histogram_bins(mut self, bins: usize) -> Self {
        self.histogram_bins = Some(bins);
        self
    }

    /// Set the number of rows used for schema inference.
    pub fn infer_schema_length(mut self, rows: usize) -> Self {
        self.infer_schema_length = Some(rows);
        self
    }

    /// Build the configuration.
    ///
    /// Returns a validated `ExplorerConfig` or an error if validation fails.
    pub fn build(self) -> Result<ExplorerConfig, ConfigValidationError> {
        let base = self.base.unwrap_or_default();
        let config = ExplorerConfig {
            data_path: self.data_path.unwrap_or(base.data_path),
            output_dir: self.output_dir.unwrap_or(base.output_dir),
            export_file_name: self.export_file_name.unwrap_or(base.export_file_name),
            value_column: self.value_column.unwrap_or(base.value_column),
            preview_rows: self.preview_rows.unwrap_or(base.preview_rows),
            sample_value_limit: self.sample_value_limit.unwrap_or(base.sample_value_limit),
            histogram_bins: self.histogram_bins.unwrap_or(base.histogram_bins),
            infer_schema_length: self
                .infer_schema_length
                .unwrap_or(base.infer_schema_length),
        };

        config.validate()?;
        Ok(config)
    }
}
