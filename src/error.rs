//! Custom error types for ClearSpend
//!
//! This module defines the error hierarchy for the engine using thiserror
//! for ergonomic error definitions. `ImportError` is kept separate because
//! import callers need to tell access, format, and storage failures apart.

use thiserror::Error;

/// The main error type for ClearSpend operations
#[derive(Error, Debug)]
pub enum ClearSpendError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Validation errors for data models
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Storage errors, including commit failures
    #[error("Storage error: {0}")]
    Storage(String),

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),

    /// Import errors
    #[error(transparent)]
    Import(#[from] ImportError),
}

/// Failures of a CSV import
#[derive(Error, Debug)]
pub enum ImportError {
    /// The CSV source could not be opened (e.g. revoked file access)
    #[error("Permission denied: {path}. Please select the file again.")]
    PermissionDenied { path: String },

    /// The CSV source could not be read
    #[error("Failed to read file: {0}")]
    FileReadFailed(String),

    /// Header or overall shape is not a ClearSpend export
    #[error("Invalid CSV format: {0}")]
    InvalidFormat(String),

    /// The store failed while resolving entities or committing
    #[error("Storage error: {0}")]
    Storage(String),
}

impl ClearSpendError {
    /// Create a "not found" error for expenses
    pub fn expense_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Expense",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for categories
    pub fn category_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Category",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for month ledgers
    pub fn ledger_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Ledger",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

impl From<std::io::Error> for ClearSpendError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for ClearSpendError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<ClearSpendError> for ImportError {
    fn from(err: ClearSpendError) -> Self {
        match err {
            ClearSpendError::Import(inner) => inner,
            other => Self::Storage(other.to_string()),
        }
    }
}

/// Result type alias for ClearSpend operations
pub type ClearSpendResult<T> = Result<T, ClearSpendError>;
