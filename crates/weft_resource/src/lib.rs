//! # weft_resource
//!
//! Resource model for Weft composition.
//!
//! A **composite** (parent) supplies labels and values that templates
//! reference; a **composed** (child) resource is configured, patched, and
//! checked for readiness. Both are dynamic documents; identity and status
//! are read through the path layer rather than a compile-time shape.
//!
//! This crate also defines the [`SecretStore`] boundary used to fetch
//! connection secret material.

pub mod composed;
pub mod composite;
pub mod condition;
pub mod error;
pub mod labels;
mod meta;
pub mod secret;

// Re-export main types for convenience
pub use composed::Composed;
pub use composite::{Composite, CompositeResource};
pub use condition::ConditionKind;
pub use error::{SecretStoreError, SecretStoreResult};
pub use labels::{LABEL_CLAIM_NAME, LABEL_CLAIM_NAMESPACE, LABEL_NAME_PREFIX};
pub use secret::{Secret, SecretReference, SecretStore};
