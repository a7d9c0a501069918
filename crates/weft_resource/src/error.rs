//! Error types for the resource module.

use thiserror::Error;

/// Result type alias for secret store operations.
pub type SecretStoreResult<T> = Result<T, SecretStoreError>;

/// Classified errors from a secret store.
///
/// Callers branch on the classification: a missing secret usually means
/// "no data yet", while cancellation must not be mistaken for a store
/// failure.
#[derive(Error, Debug)]
pub enum SecretStoreError {
    #[error("Secret {namespace}/{name} not found")]
    NotFound { name: String, namespace: String },

    #[error("Secret fetch cancelled: {0}")]
    Cancelled(String),

    #[error("Secret store error: {0}")]
    Store(String),
}

impl SecretStoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, SecretStoreError::NotFound { .. })
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, SecretStoreError::Cancelled(_))
    }
}
