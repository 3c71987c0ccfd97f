/*
 * error.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! The data-value error type.

use thiserror::Error;

/// A malformed or mistyped runtime value encountered during evaluation.
///
/// Data errors are classified separately from generic render failures:
/// callers map them to a distinct error status without inspecting the full
/// cause chain, so the render boundary never unwraps past one.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct DataError {
    message: String,
}

impl DataError {
    /// Create a new data error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The error message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_is_message() {
        let err = DataError::new("expected a text value, got bool");
        assert_eq!(err.to_string(), "expected a text value, got bool");
        assert_eq!(err.message(), "expected a text value, got bool");
    }
}
