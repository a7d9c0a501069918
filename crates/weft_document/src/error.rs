//! Error types for the document module.

use thiserror::Error;

/// Result type alias for document operations.
pub type DocumentResult<T> = Result<T, DocumentError>;

/// Errors that can occur during document operations.
///
/// Absence of a value is never an error; path getters report it as `None`
/// so callers can treat "not found" as a legitimate state.
#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("Cannot parse field path '{path}': {reason}")]
    ParsePath { path: String, reason: String },

    #[error("Value at '{path}' is {actual}, expected {expected}")]
    TypeMismatch {
        path: String,
        expected: &'static str,
        actual: &'static str,
    },

    #[error("Document root must be a mapping, got {actual}")]
    NotAnObject { actual: &'static str },
}
