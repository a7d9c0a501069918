//! Read-only view of the composite (parent) resource.

use std::collections::BTreeMap;

use serde_json::Value;
use weft_document::{Document, DocumentResult};

use crate::condition::ConditionKind;
use crate::meta;

/// Capability a composing entity must provide.
///
/// `document()` is part of the trait so that path-addressability is demanded
/// at the interface boundary; no operation has to assert a concrete
/// representation mid-flight.
pub trait Composite: Send + Sync {
    /// The composite's labels.
    fn labels(&self) -> BTreeMap<String, String>;

    /// Whether the given status condition is true.
    fn is_condition_true(&self, kind: ConditionKind) -> bool;

    /// The composite's dynamic document.
    fn document(&self) -> &Document;
}

/// A dynamic composite resource backed by a document.
///
/// Labels come from `metadata.labels`, conditions from `status.conditions`
/// entries of shape `{type, status}`.
#[derive(Debug, Clone, PartialEq)]
pub struct CompositeResource {
    document: Document,
}

impl CompositeResource {
    pub fn new(document: Document) -> Self {
        Self { document }
    }

    /// Wrap a raw value. The root must be a mapping.
    pub fn from_value(value: Value) -> DocumentResult<Self> {
        Ok(Self {
            document: Document::from_value(value)?,
        })
    }
}

impl Composite for CompositeResource {
    fn labels(&self) -> BTreeMap<String, String> {
        meta::labels(&self.document)
    }

    fn is_condition_true(&self, kind: ConditionKind) -> bool {
        meta::is_condition_true(&self.document, kind)
    }

    fn document(&self) -> &Document {
        &self.document
    }
}
