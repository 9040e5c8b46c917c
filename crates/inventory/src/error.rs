//! Error types for the inventory crate.

use thiserror::Error;

/// Result type alias for inventory operations.
pub type InventoryResult<T> = Result<T, InventoryError>;

/// Errors raised by the entity model, the store and the service facade.
///
/// Every variant carries a human-readable message. The HTTP boundary maps
/// each kind to a status code; the core never does.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InventoryError {
    /// Malformed or out-of-range input: negative price or stock, blank
    /// required field, unparseable enum value, wrong-variant operation.
    #[error("Validation error: {0}")]
    Validation(String),

    /// A code lookup missed.
    #[error("Not found: {0}")]
    NotFound(String),

    /// An instrument with the same code already exists.
    #[error("Conflict: {0}")]
    Conflict(String),
}

/// Coarse classification of an [`InventoryError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Validation,
    NotFound,
    Conflict,
}

impl ErrorKind {
    /// Label used for metrics and structured logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Validation => "validation",
            ErrorKind::NotFound => "not_found",
            ErrorKind::Conflict => "conflict",
        }
    }
}

impl InventoryError {
    /// Create a validation error.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a not found error.
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Create a conflict error.
    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    /// Error raised when a guitar-only operation targets another variant.
    pub fn not_a_guitar(code: &str) -> Self {
        Self::Validation(format!("the code must belong to a guitar: {}", code))
    }

    /// The kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            InventoryError::Validation(_) => ErrorKind::Validation,
            InventoryError::NotFound(_) => ErrorKind::NotFound,
            InventoryError::Conflict(_) => ErrorKind::Conflict,
        }
    }

    /// The bare message, without the kind prefix.
    pub fn message(&self) -> &str {
        match self {
            InventoryError::Validation(msg)
            | InventoryError::NotFound(msg)
            | InventoryError::Conflict(msg) => msg,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kind_and_message() {
        let err = InventoryError::not_found("instrument GT-1");
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(err.message(), "instrument GT-1");
        assert_eq!(err.to_string(), "Not found: instrument GT-1");

        let err = InventoryError::not_a_guitar("KB-1");
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(err.message().contains("KB-1"));
    }

    #[test]
    fn test_error_kind_labels() {
        assert_eq!(ErrorKind::Validation.as_str(), "validation");
        assert_eq!(ErrorKind::NotFound.as_str(), "not_found");
        assert_eq!(ErrorKind::Conflict.as_str(), "conflict");
    }
}
