//! # Error Types
//!
//! Structured error types for dough_core. Every variant carries enough
//! context to tell the caller which field, table or identifier was wrong.
//!
//! ## Example
//!
//! ```rust
//! use dough_core::errors::{CalcError, CalcResult};
//!
//! fn validate_salt(salt_pct: f64) -> CalcResult<()> {
//!     if !(1.5..=4.0).contains(&salt_pct) {
//!         return Err(CalcError::invalid_input(
//!             "salt_pct",
//!             salt_pct.to_string(),
//!             "Salt must be between 1.5% and 4.0%",
//!         ));
//!     }
//!     Ok(())
//! }
//!
//! assert!(validate_salt(2.8).is_ok());
//! assert!(validate_salt(5.0).is_err());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for dough_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for calculation operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// A parameter is outside its declared bounds
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// A flour preset, yeast type or poolish option id is not in the tables.
    ///
    /// This is a wiring error in the caller, never something to default around.
    #[error("Unknown {kind}: '{id}'")]
    UnknownIdentifier { kind: String, id: String },

    /// A reference table failed validation
    #[error("Invalid reference table '{table}': {reason}")]
    InvalidTable { table: String, reason: String },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// TOML/JSON serialization or deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },
}

impl CalcError {
    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create an UnknownIdentifier error
    pub fn unknown_identifier(kind: impl Into<String>, id: impl Into<String>) -> Self {
        CalcError::UnknownIdentifier {
            kind: kind.into(),
            id: id.into(),
        }
    }

    /// Create an InvalidTable error
    pub fn invalid_table(table: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidTable {
            table: table.into(),
            reason: reason.into(),
        }
    }

    /// Create a FileError
    pub fn file_error(operation: impl Into<String>, path: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a SerializationError
    pub fn serialization(reason: impl Into<String>) -> Self {
        CalcError::SerializationError {
            reason: reason.into(),
        }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::UnknownIdentifier { .. } => "UNKNOWN_IDENTIFIER",
            CalcError::InvalidTable { .. } => "INVALID_TABLE",
            CalcError::FileError { .. } => "FILE_ERROR",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
        }
    }
}

impl From<toml::de::Error> for CalcError {
    fn from(err: toml::de::Error) -> Self {
        CalcError::serialization(err.to_string())
    }
}

impl From<toml::ser::Error> for CalcError {
    fn from(err: toml::ser::Error) -> Self {
        CalcError::serialization(err.to_string())
    }
}

impl From<serde_json::Error> for CalcError {
    fn from(err: serde_json::Error) -> Self {
        CalcError::serialization(err.to_string())
    }
}
