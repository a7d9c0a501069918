//! Error types for the composition engine.
//!
//! Everything here localizes a fault in the template or its collaborators:
//! a patch index, a field path, a store failure. "Not found" outcomes used
//! for control decisions (secret absent, field absent, check unmet) are
//! result values, never errors. Nothing is retried internally.

use thiserror::Error;
use weft_document::DocumentError;
use weft_resource::SecretStoreError;

/// Result type alias for composition operations.
pub type ComposeResult<T> = Result<T, ComposeError>;

/// Errors that can occur while composing a resource.
#[derive(Error, Debug)]
pub enum ComposeError {
    #[error("Cannot apply base template to composed resource: {0}")]
    Unmarshal(#[source] DocumentError),

    #[error("Name prefix label '{0}' is missing from composite labels")]
    MissingNamePrefix(&'static str),

    #[error("Cannot apply the patch at index {index}: {source}")]
    Patch {
        index: usize,
        #[source]
        source: PatchError,
    },

    #[error("Cannot get connection secret of composed resource: {0}")]
    SecretFetch(#[source] SecretStoreError),

    #[error("Connection secret fetch cancelled: {0}")]
    Cancelled(String),

    #[error("Secret reference not found at path '{path}'")]
    SecretPathNotFound { path: String },

    #[error("Secret reference at path '{path}' is not a string")]
    SecretRefNotString { path: String },

    #[error("Readiness check at index {index} has an unknown type")]
    UnknownReadinessCheck { index: usize },

    #[error("Readiness check at index {index} hit a type mismatch: {source}")]
    ReadinessTypeMismatch {
        index: usize,
        #[source]
        source: DocumentError,
    },

    #[error("Document error: {0}")]
    Document(#[from] DocumentError),
}

/// Errors from applying a single patch.
#[derive(Error, Debug)]
pub enum PatchError {
    #[error("Source field '{path}' not found on composite")]
    SourceNotFound { path: String },

    #[error("Document error: {0}")]
    Document(#[from] DocumentError),
}
