//! Error types and exit codes for revsim
//!
//! Exit codes:
//! - 0: Success
//! - 1: Generic failure
//! - 2: Usage error (bad flags/args, invalid config values)
//! - 3: Data error (unreadable catalog, missing columns, unknown item)

mod macros;

use std::path::PathBuf;
use thiserror::Error;

/// Process exit codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Success (0)
    Success = 0,
    /// Generic failure (1)
    Failure = 1,
    /// Usage error - bad flags/args (2)
    Usage = 2,
    /// Data error - bad catalog, unknown item (3)
    Data = 3,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}

/// Errors that can occur while loading a catalog or querying the engine
#[derive(Error, Debug)]
pub enum RevsimError {
    // Usage errors (exit code 2)
    #[error("unknown format: {0} (expected: human, json, or records)")]
    UnknownFormat(String),

    #[error("{0}")]
    UsageError(String),

    #[error("invalid {context}: {value}")]
    InvalidValue { context: String, value: String },

    // Data errors (exit code 3)
    #[error("catalog not found: {path:?}")]
    CatalogNotFound { path: PathBuf },

    #[error(
        "required column(s) missing from catalog: {} (available: {})",
        .missing.join(", "),
        .available.join(", ")
    )]
    DataSchema {
        missing: Vec<String>,
        available: Vec<String>,
    },

    #[error("catalog is empty: no usable rows")]
    EmptyCatalog,

    #[error("no usable terms after preprocessing; every document is empty or stop words only")]
    EmptyVocabulary,

    #[error("item not found: {item}")]
    ItemNotFound { item: String },

    // Generic failures (exit code 1)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("failed to {operation} {target}: {reason}")]
    FailedOperation {
        operation: String,
        target: String,
        reason: String,
    },

    #[error("{0}")]
    Other(String),
}

impl RevsimError {
    /// Create an error for an invalid value or configuration
    pub fn invalid_value(context: &str, value: impl std::fmt::Display) -> Self {
        RevsimError::InvalidValue {
            context: context.to_string(),
            value: value.to_string(),
        }
    }

    /// Create a schema error listing the missing and available columns
    pub fn schema(missing: Vec<String>, available: Vec<String>) -> Self {
        RevsimError::DataSchema { missing, available }
    }

    /// Create an error for an item that is not in the index
    pub fn item_not_found(item: impl Into<String>) -> Self {
        RevsimError::ItemNotFound { item: item.into() }
    }

    /// Create an error for a failed IO operation on a path
    pub fn io_operation(
        operation: &str,
        path: impl std::fmt::Display,
        error: impl std::fmt::Display,
    ) -> Self {
        RevsimError::FailedOperation {
            operation: operation.to_string(),
            target: path.to_string(),
            reason: error.to_string(),
        }
    }

    /// Get the appropriate exit code for this error
    pub fn exit_code(&self) -> ExitCode {
        match self {
            RevsimError::UnknownFormat(_)
            | RevsimError::UsageError(_)
            | RevsimError::InvalidValue { .. } => ExitCode::Usage,

            RevsimError::CatalogNotFound { .. }
            | RevsimError::DataSchema { .. }
            | RevsimError::EmptyCatalog
            | RevsimError::EmptyVocabulary
            | RevsimError::ItemNotFound { .. } => ExitCode::Data,

            RevsimError::Io(_)
            | RevsimError::Csv(_)
            | RevsimError::Json(_)
            | RevsimError::Toml(_)
            | RevsimError::FailedOperation { .. }
            | RevsimError::Other(_) => ExitCode::Failure,
        }
    }

    /// Get the error type identifier
    pub fn error_type(&self) -> &'static str {
        match self {
            RevsimError::UnknownFormat(_) => "unknown_format",
            RevsimError::UsageError(_) => "usage_error",
            RevsimError::InvalidValue { .. } => "invalid_value",
            RevsimError::CatalogNotFound { .. } => "catalog_not_found",
            RevsimError::DataSchema { .. } => "data_schema",
            RevsimError::EmptyCatalog => "empty_catalog",
            RevsimError::EmptyVocabulary => "empty_vocabulary",
            RevsimError::ItemNotFound { .. } => "item_not_found",
            RevsimError::Io(_) => "io_error",
            RevsimError::Csv(_) => "csv_error",
            RevsimError::Json(_) => "json_error",
            RevsimError::Toml(_) => "toml_error",
            RevsimError::FailedOperation { .. } => "failed_operation",
            RevsimError::Other(_) => "other",
        }
    }

    /// Convert error to JSON representation for structured error output
    pub fn to_json(&self) -> serde_json::Value {
        let mut error_obj = serde_json::json!({
            "code": self.exit_code() as i32,
            "type": self.error_type(),
            "message": self.to_string(),
        });

        match self {
            RevsimError::DataSchema { missing, available } => {
                error_obj["missing"] = serde_json::json!(missing);
                error_obj["available"] = serde_json::json!(available);
            }
            RevsimError::ItemNotFound { item } => {
                error_obj["item"] = serde_json::json!(item);
            }
            _ => {}
        }

        serde_json::json!({ "error": error_obj })
    }
}

/// Result type alias for revsim operations
pub type Result<T> = std::result::Result<T, RevsimError>;
