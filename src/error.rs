//! Custom error types for fundbook
//!
//! This module defines the error hierarchy for the ledger using thiserror.
//! The four domain kinds (validation, not found, attribute, type) are what the
//! registry and ledger report to callers; the remaining variants cover
//! configuration loading and the binary's I/O.

use thiserror::Error;

/// The main error type for fundbook operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LedgerError {
    /// A field value failed a semantic constraint (bad name, balance, date, id, category...)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// The caller referenced an attribute that does not exist or cannot be used here
    #[error("Attribute error: {0}")]
    Attribute(String),

    /// A value of the wrong shape was supplied for a field or filter
    #[error("Type error: {0}")]
    Type(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON/YAML deserialization errors
    #[error("Parse error: {0}")]
    Json(String),

    /// In-memory store errors (poisoned locks)
    #[error("Storage error: {0}")]
    Storage(String),
}

impl LedgerError {
    /// Create a "not found" error for accounts
    pub fn account_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Account",
            identifier: identifier.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    pub fn is_attribute(&self) -> bool {
        matches!(self, Self::Attribute(_))
    }

    pub fn is_type(&self) -> bool {
        matches!(self, Self::Type(_))
    }
}

impl From<std::io::Error> for LedgerError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for LedgerError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<serde_yaml::Error> for LedgerError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for fundbook operations
pub type LedgerResult<T> = Result<T, LedgerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = LedgerError::Config("test error".into());
        assert_eq!(err.to_string(), "Configuration error: test error");
    }

    #[test]
    fn test_not_found_error() {
        let err = LedgerError::account_not_found("1234567890");
        assert_eq!(err.to_string(), "Account not found: 1234567890");
        assert!(err.is_not_found());
        assert!(!err.is_validation());
    }

    #[test]
    fn test_kind_predicates() {
        assert!(LedgerError::Validation("x".into()).is_validation());
        assert!(LedgerError::Attribute("x".into()).is_attribute());
        assert!(LedgerError::Type("x".into()).is_type());
        assert!(!LedgerError::Type("x".into()).is_attribute());
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: LedgerError = io_err.into();
        assert!(matches!(err, LedgerError::Io(_)));
    }
}
