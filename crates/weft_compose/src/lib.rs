//! # weft_compose
//!
//! Template-driven composition engine for Weft.
//!
//! Given a composite (parent) resource and a [`Template`], this crate
//! produces a fully configured composed (child) resource, resolves its
//! secret-derived connection details, and evaluates whether it is ready.
//!
//! # Pipeline
//!
//! - **[`Configurator`]**: applies the template's base document and lineage
//!   metadata.
//! - **[`OverlayApplicator`]**: applies the template's field patches in
//!   order.
//! - **[`ConnectionDetailsFetcher`]**: fetches the backing connection
//!   secret and maps it to connection details.
//! - **[`ReadinessChecker`]**: evaluates the template's readiness checks.
//!
//! Configure and overlay must run before fetch/readiness are meaningful,
//! since those read the post-patch document. Every operation is stateless
//! across invocations; independent children can be processed concurrently
//! with no coordination. Retry and backoff policy belong to the caller.
//!
//! # Example
//!
//! ```rust,ignore
//! use weft_compose::{
//!     Configurator, DefaultConfigurator, DefaultReadinessChecker,
//!     OverlayApplicator, PatchingOverlay, ReadinessChecker,
//! };
//!
//! DefaultConfigurator.configure(&composite, &mut composed, &template)?;
//! PatchingOverlay::default().overlay(&composite, &mut composed, &template)?;
//!
//! let details = SecretConnectionFetcher::new(store)
//!     .fetch(&composed, &template)
//!     .await?;
//! let ready = DefaultReadinessChecker.is_ready(&composed, &template).await?;
//! ```
//!
//! [`Template`]: weft_template::Template

pub mod configurator;
pub mod connection;
pub mod error;
pub mod overlay;
pub mod readiness;

// Re-export main types for convenience
pub use configurator::{Configurator, DefaultConfigurator};
pub use connection::{ConnectionDetails, ConnectionDetailsFetcher, SecretConnectionFetcher};
pub use error::{ComposeError, ComposeResult, PatchError};
pub use overlay::{FieldPatchApplicator, OverlayApplicator, PatchApplicator, PatchingOverlay};
pub use readiness::{DefaultReadinessChecker, ReadinessChecker};
