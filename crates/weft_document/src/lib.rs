//! # weft_document
//!
//! Path-addressable access to schemaless documents for Weft.
//!
//! Composition operates over dynamic documents with no compile-time shape.
//! This crate provides the [`Document`] wrapper around a JSON value tree,
//! dotted/bracketed [`FieldPath`] parsing, and tri-state getters where
//! "not found" is a first-class outcome rather than an error.

pub mod document;
pub mod error;
pub mod path;

// Re-export main types for convenience
pub use document::Document;
pub use error::{DocumentError, DocumentResult};
pub use path::{FieldPath, Segment};
