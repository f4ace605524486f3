//! Shared error types for the application

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for urban-stress operations
#[derive(Debug, Error)]
pub enum Error {
    /// A column required by the scorer or the loader is absent
    #[error("Missing required column: {column}")]
    MissingColumn { column: String },

    /// Zero-row dataset; min-max normalization is undefined
    #[error("Dataset is empty: at least one zone is required for normalization")]
    EmptyDataset,

    /// Malformed cell in a zone data file
    #[error("Parse error at line {line}: {message}")]
    Parse { line: u64, message: String },

    /// File system related errors
    #[error("File system error: {message}")]
    FileSystem {
        message: String,
        path: Option<PathBuf>,
        #[source]
        source: Option<std::io::Error>,
    },

    /// Remote text explainer failures
    #[error("Explainer error: {0}")]
    Explainer(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Generic errors with context
    #[error("{context}: {message}")]
    WithContext { context: String, message: String },

    /// IO errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// CSV errors
    #[error(transparent)]
    Csv(#[from] csv::Error),

    /// JSON errors
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// TOML errors
    #[error(transparent)]
    Toml(#[from] toml::de::Error),
}

impl Error {
    /// Create a missing column error
    pub fn missing_column(column: impl Into<String>) -> Self {
        Self::MissingColumn {
            column: column.into(),
        }
    }

    /// Create a file system error with path context
    pub fn file_system(message: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self::FileSystem {
            message: message.into(),
            path: Some(path.into()),
            source: None,
        }
    }

    /// Create a parse error with location
    pub fn parse(line: u64, message: impl Into<String>) -> Self {
        Self::Parse {
            line,
            message: message.into(),
        }
    }

    /// Add context to an error
    pub fn with_context(self, context: impl Into<String>) -> Self {
        Self::WithContext {
            context: context.into(),
            message: self.to_string(),
        }
    }
}

/// Result type alias using our error type
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_column_message_names_column() {
        let err = Error::missing_column("AQI");
        assert_eq!(err.to_string(), "Missing required column: AQI");
    }

    #[test]
    fn test_context_wraps_message() {
        let result: Result<()> = Err(Error::EmptyDataset);
        let err = result.context("scoring zones").unwrap_err();
        assert!(err.to_string().starts_with("scoring zones: Dataset is empty"));
    }

    #[test]
    fn test_parse_error_reports_line() {
        let err = Error::parse(4, "bad value");
        assert_eq!(err.to_string(), "Parse error at line 4: bad value");
    }
}
