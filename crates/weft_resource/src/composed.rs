//! The composed (child) resource being configured, patched, and checked.

use std::collections::BTreeMap;

use serde_json::{Map, Value};
use weft_document::{Document, DocumentResult};

use crate::condition::ConditionKind;
use crate::meta;
use crate::secret::SecretReference;

const PATH_NAME: &str = "metadata.name";
const PATH_GENERATE_NAME: &str = "metadata.generateName";
const PATH_NAMESPACE: &str = "metadata.namespace";
const PATH_LABELS: &str = "metadata.labels";
const PATH_SECRET_REF_NAME: &str = "spec.writeConnectionSecretToRef.name";
const PATH_SECRET_REF_NAMESPACE: &str = "spec.writeConnectionSecretToRef.namespace";

/// A dynamic composed resource.
///
/// Identity fields live inside the document under `metadata` and are read
/// and written through the path layer. A missing or non-string identity
/// field reads as empty.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Composed {
    document: Document,
}

impl Composed {
    /// Create an empty composed resource.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap a raw value. The root must be a mapping.
    pub fn from_value(value: Value) -> DocumentResult<Self> {
        Ok(Self {
            document: Document::from_value(value)?,
        })
    }

    pub fn from_document(document: Document) -> Self {
        Self { document }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    pub fn into_value(self) -> Value {
        self.document.into_value()
    }

    /// Overwrite the whole document content, e.g. with a template's base.
    pub fn replace_document(&mut self, value: Value) -> DocumentResult<()> {
        self.document.replace(value)
    }

    pub fn name(&self) -> String {
        self.string_at(PATH_NAME)
    }

    pub fn set_name(&mut self, name: &str) -> DocumentResult<()> {
        self.document.set_value(PATH_NAME, Value::from(name))
    }

    pub fn generate_name(&self) -> String {
        self.string_at(PATH_GENERATE_NAME)
    }

    pub fn set_generate_name(&mut self, prefix: &str) -> DocumentResult<()> {
        self.document.set_value(PATH_GENERATE_NAME, Value::from(prefix))
    }

    pub fn namespace(&self) -> String {
        self.string_at(PATH_NAMESPACE)
    }

    pub fn set_namespace(&mut self, namespace: &str) -> DocumentResult<()> {
        self.document.set_value(PATH_NAMESPACE, Value::from(namespace))
    }

    pub fn labels(&self) -> BTreeMap<String, String> {
        meta::labels(&self.document)
    }

    /// Merge labels into `metadata.labels`, overwriting same-named entries
    /// and preserving the rest. Label keys may contain dots, so the labels
    /// mapping is edited as a whole rather than through per-key paths.
    pub fn merge_labels(&mut self, labels: &BTreeMap<String, String>) -> DocumentResult<()> {
        let mut merged = match self.document.get_value(PATH_LABELS)? {
            Some(Value::Object(existing)) => existing.clone(),
            _ => Map::new(),
        };
        for (key, value) in labels {
            merged.insert(key.clone(), Value::String(value.clone()));
        }
        self.document.set_value(PATH_LABELS, Value::Object(merged))
    }

    /// Whether the given status condition is true.
    pub fn is_condition_true(&self, kind: ConditionKind) -> bool {
        meta::is_condition_true(&self.document, kind)
    }

    /// The resource's own connection secret reference, if it declares one
    /// under `spec.writeConnectionSecretToRef`.
    pub fn write_connection_secret_ref(&self) -> Option<SecretReference> {
        let name = self.string_at(PATH_SECRET_REF_NAME);
        let namespace = self.string_at(PATH_SECRET_REF_NAMESPACE);
        if name.is_empty() || namespace.is_empty() {
            return None;
        }
        Some(SecretReference { name, namespace })
    }

    fn string_at(&self, path: &str) -> String {
        self.document
            .get_string(path)
            .ok()
            .flatten()
            .map(str::to_string)
            .unwrap_or_default()
    }
}
