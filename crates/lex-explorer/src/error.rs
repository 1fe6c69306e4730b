//! Error types for the explorer.
//!
//! All library operations return [`ExplorerError`] through the [`Result`]
//! alias. Errors serialize as `{ code, message }` so the shell can print them
//! as JSON when running with `--json`.

use serde::Serialize;
use serde::ser::SerializeStruct;
use thiserror::Error;

/// The main error type for explorer operations.
#[derive(Error, Debug)]
pub enum ExplorerError {
    /// The dataset file does not exist.
    #[error("Data file not found: {0}")]
    DataFileNotFound(String),

    /// Column was not found in the working table.
    #[error("Column '{0}' not found in dataset")]
    ColumnNotFound(String),

    /// Encoding would create a column that already exists.
    #[error("Column '{0}' already exists in dataset")]
    ColumnAlreadyExists(String),

    /// A numeric column was required.
    #[error("Column '{0}' is not numeric")]
    NonNumericColumn(String),

    /// The relationship value column is absent from the working table.
    #[error("Column '{0}' not found in dataset!")]
    ValueColumnMissing(String),

    /// Invalid configuration provided.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A shell command could not be understood.
    #[error("Invalid command: {0}")]
    InvalidCommand(String),

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Polars error wrapper.
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error with context.
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<ExplorerError>,
    },
}

impl ExplorerError {
    /// Add context to an error.
    pub fn with_context(self, context: impl Into<String>) -> Self {
        ExplorerError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Stable error code, preserved through [`ExplorerError::with_context`].
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::DataFileNotFound(_) => "DATA_FILE_NOT_FOUND",
            Self::ColumnNotFound(_) => "COLUMN_NOT_FOUND",
            Self::ColumnAlreadyExists(_) => "COLUMN_ALREADY_EXISTS",
            Self::NonNumericColumn(_) => "NON_NUMERIC_COLUMN",
            Self::ValueColumnMissing(_) => "VALUE_COLUMN_MISSING",
            Self::InvalidConfig(_) => "INVALID_CONFIG",
            Self::InvalidCommand(_) => "INVALID_COMMAND",
            Self::Io(_) => "IO_ERROR",
            Self::Polars(_) => "POLARS_ERROR",
            Self::Json(_) => "JSON_ERROR",
            Self::WithContext { source, .. } => source.error_code(),
        }
    }

    /// Whether the error should be shown as a warning rather than a failure.
    ///
    /// The shell keeps running after any of these.
    pub fn is_warning(&self) -> bool {
        match self {
            Self::ValueColumnMissing(_) => true,
            Self::WithContext { source, .. } => source.is_warning(),
            _ => false,
        }
    }
}

impl Serialize for ExplorerError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("ExplorerError", 2)?;
        state.serialize_field("code", &self.error_code())?;
        state.serialize_field("message", &self.to_string())?;
        state.end()
    }
}

/// Result type alias for explorer operations.
pub type Result<T> = std::result::Result<T, ExplorerError>;

/// Extension trait for adding context to Results.
pub trait ResultExt<T> {
    /// Add context to an error result.
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, polars::error::PolarsError> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| ExplorerError::Polars(e).with_context(context))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code() {
        assert_eq!(
            ExplorerError::ColumnNotFound("Age".to_string()).error_code(),
            "COLUMN_NOT_FOUND"
        );
        assert_eq!(
            ExplorerError::ValueColumnMissing("Value".to_string()).error_code(),
            "VALUE_COLUMN_MISSING"
        );
    }

    #[test]
    fn test_is_warning() {
        assert!(ExplorerError::ValueColumnMissing("Value".to_string()).is_warning());
        assert!(!ExplorerError::ColumnNotFound("Value".to_string()).is_warning());
        assert!(
            ExplorerError::ValueColumnMissing("Value".to_string())
                .with_context("Relationships")
                .is_warning()
        );
    }

    #[test]
    fn test_error_serialization() {
        let error = ExplorerError::ColumnNotFound("State".to_string());
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("COLUMN_NOT_FOUND"));
        assert!(json.contains("State"));
    }

    #[test]
    fn test_with_context() {
        let error =
            ExplorerError::ColumnNotFound("Age".to_string()).with_context("During encoding");
        assert!(error.to_string().contains("During encoding"));
        assert_eq!(error.error_code(), "COLUMN_NOT_FOUND");
    }
}
