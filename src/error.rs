use serde::Serialize;
use thiserror::Error;

/// Main error type for the query engine
#[derive(Error, Debug)]
pub enum QueryError {
    /// Malformed, missing or out-of-domain filter input
    #[error("Invalid value for '{field}': {message}")]
    Validation { field: String, message: String },

    /// Backing catalog could not be reached
    #[error("Catalog store unavailable: {0}")]
    StoreUnavailable(String),

    /// Database errors
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O errors (catalog import files)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Machine-readable error category handed to the transport layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    ValidationError,
    StoreUnavailable,
    InternalError,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::ValidationError => "validation_error",
            ErrorKind::StoreUnavailable => "store_unavailable",
            ErrorKind::InternalError => "internal_error",
        }
    }
}

impl QueryError {
    /// Build a validation error for a named filter field
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        QueryError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Category of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            QueryError::Validation { .. } => ErrorKind::ValidationError,
            QueryError::StoreUnavailable(_) | QueryError::Database(_) => {
                ErrorKind::StoreUnavailable
            }
            QueryError::Json(_) | QueryError::Io(_) | QueryError::Config(_) => {
                ErrorKind::InternalError
            }
        }
    }

    /// Offending field for validation errors
    pub fn field(&self) -> Option<&str> {
        match self {
            QueryError::Validation { field, .. } => Some(field),
            _ => None,
        }
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, QueryError>;
