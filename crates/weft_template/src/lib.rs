//! # weft_template
//!
//! Declarative composition templates for Weft.
//!
//! A [`Template`] carries everything needed to produce one composed
//! resource from a composite: the base document, ordered field patches,
//! connection detail specs, readiness checks, and an optional indirect
//! connection secret reference. This crate owns the model and its YAML/JSON
//! readers; applying a template is the engine's job.

pub mod error;
pub mod model;
pub mod reader;
pub mod validator;

// Re-export main types for convenience
pub use error::{TemplateError, TemplateResult};
pub use model::{
    ConnectionDetailSpec, PatchSpec, PathSecretRef, ReadinessCheck, ReadinessCheckType, Template,
};
pub use reader::TemplateReader;
pub use validator::{validate, TemplateValidation};
