//! Ordered application of template patches.

use std::sync::Arc;

use tracing::debug;
use weft_resource::{Composed, Composite};
use weft_template::{PatchSpec, Template};

use crate::error::{ComposeError, ComposeResult, PatchError};

/// Applies a template's patch list to a composed resource.
pub trait OverlayApplicator: Send + Sync {
    fn overlay(
        &self,
        composite: &dyn Composite,
        composed: &mut Composed,
        template: &Template,
    ) -> ComposeResult<()>;
}

/// Applies one patch from the composite to the composed resource.
///
/// Path-mapping rules live behind this boundary; the overlay only sequences
/// patches and wraps failures with their template index.
pub trait PatchApplicator: Send + Sync {
    fn apply(
        &self,
        patch: &PatchSpec,
        composite: &dyn Composite,
        composed: &mut Composed,
    ) -> Result<(), PatchError>;
}

/// Copies the value at `fromFieldPath` on the composite's document to
/// `toFieldPath` (default: the same path) on the composed resource.
#[derive(Debug, Clone, Copy, Default)]
pub struct FieldPatchApplicator;

impl PatchApplicator for FieldPatchApplicator {
    fn apply(
        &self,
        patch: &PatchSpec,
        composite: &dyn Composite,
        composed: &mut Composed,
    ) -> Result<(), PatchError> {
        let value = composite
            .document()
            .get_value(&patch.from_field_path)?
            .ok_or_else(|| PatchError::SourceNotFound {
                path: patch.from_field_path.clone(),
            })?
            .clone();
        composed.document_mut().set_value(patch.target_path(), value)?;
        Ok(())
    }
}

/// Overlay that applies patches in template order and stops at the first
/// failure. Errors carry the 0-based index of the failing patch; patches
/// after it are not applied.
pub struct PatchingOverlay {
    applicator: Arc<dyn PatchApplicator>,
}

impl PatchingOverlay {
    pub fn new(applicator: Arc<dyn PatchApplicator>) -> Self {
        Self { applicator }
    }
}

impl Default for PatchingOverlay {
    fn default() -> Self {
        Self::new(Arc::new(FieldPatchApplicator))
    }
}

impl OverlayApplicator for PatchingOverlay {
    fn overlay(
        &self,
        composite: &dyn Composite,
        composed: &mut Composed,
        template: &Template,
    ) -> ComposeResult<()> {
        for (index, patch) in template.patches.iter().enumerate() {
            self.applicator
                .apply(patch, composite, composed)
                .map_err(|source| ComposeError::Patch { index, source })?;
        }
        debug!(patches = template.patches.len(), "Applied template patches");
        Ok(())
    }
}
