//! Path-addressable access to schemaless documents.
//!
//! A [`Document`] wraps an arbitrary nested JSON value whose root is a
//! mapping. Getters resolve a field path to a tri-state outcome: found,
//! not found (`Ok(None)`), or error. Not-found covers traversal through a
//! scalar and reads past an array's end, so callers can treat absence as a
//! legitimate state rather than a fault.

use serde_json::{Map, Value};

use crate::error::{DocumentError, DocumentResult};
use crate::path::{FieldPath, Segment};

/// A schemaless, path-addressable data tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    root: Value,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create an empty document.
    pub fn new() -> Self {
        Self {
            root: Value::Object(Map::new()),
        }
    }

    /// Wrap an existing value. The root must be a mapping.
    pub fn from_value(value: Value) -> DocumentResult<Self> {
        if !value.is_object() {
            return Err(DocumentError::NotAnObject {
                actual: value_kind(&value),
            });
        }
        Ok(Self { root: value })
    }

    /// Borrow the underlying value.
    pub fn as_value(&self) -> &Value {
        &self.root
    }

    /// Unwrap into the underlying value.
    pub fn into_value(self) -> Value {
        self.root
    }

    /// Overwrite the entire document content. The new root must be a mapping.
    pub fn replace(&mut self, value: Value) -> DocumentResult<()> {
        if !value.is_object() {
            return Err(DocumentError::NotAnObject {
                actual: value_kind(&value),
            });
        }
        self.root = value;
        Ok(())
    }

    /// Get the value at a field path, if any.
    pub fn get_value(&self, path: &str) -> DocumentResult<Option<&Value>> {
        let parsed = FieldPath::parse(path)?;
        let mut current = &self.root;
        for segment in parsed.segments() {
            let next = match segment {
                Segment::Field(name) => current.as_object().and_then(|map| map.get(name)),
                Segment::Index(index) => current.as_array().and_then(|array| array.get(*index)),
            };
            match next {
                Some(value) => current = value,
                None => return Ok(None),
            }
        }
        Ok(Some(current))
    }

    /// Get the string at a field path. A present non-string value is a
    /// type mismatch, distinguished from not-found.
    pub fn get_string(&self, path: &str) -> DocumentResult<Option<&str>> {
        match self.get_value(path)? {
            None => Ok(None),
            Some(Value::String(value)) => Ok(Some(value)),
            Some(other) => Err(DocumentError::TypeMismatch {
                path: path.to_string(),
                expected: "string",
                actual: value_kind(other),
            }),
        }
    }

    /// Get the integer at a field path. A present value that is not
    /// representable as `i64` is a type mismatch.
    pub fn get_integer(&self, path: &str) -> DocumentResult<Option<i64>> {
        match self.get_value(path)? {
            None => Ok(None),
            Some(Value::Number(number)) => match number.as_i64() {
                Some(value) => Ok(Some(value)),
                None => Err(DocumentError::TypeMismatch {
                    path: path.to_string(),
                    expected: "integer",
                    actual: "number",
                }),
            },
            Some(other) => Err(DocumentError::TypeMismatch {
                path: path.to_string(),
                expected: "integer",
                actual: value_kind(other),
            }),
        }
    }

    /// Set the value at a field path, creating intermediate mappings and
    /// padding arrays with nulls as needed. A scalar in the middle of the
    /// path is replaced by the container the path requires.
    pub fn set_value(&mut self, path: &str, value: Value) -> DocumentResult<()> {
        let parsed = FieldPath::parse(path)?;
        let Some((last, init)) = parsed.segments().split_last() else {
            // parse rejects empty paths
            return Err(DocumentError::ParsePath {
                path: path.to_string(),
                reason: "path is empty".to_string(),
            });
        };
        if matches!(parsed.segments().first(), Some(Segment::Index(_))) {
            return Err(DocumentError::ParsePath {
                path: path.to_string(),
                reason: "document root is a mapping, not an array".to_string(),
            });
        }

        let mut current = &mut self.root;
        for segment in init {
            current = match segment {
                Segment::Field(name) => object_slot(current).entry(name.clone()).or_insert(Value::Null),
                Segment::Index(index) => array_slot(current, *index),
            };
        }
        match last {
            Segment::Field(name) => {
                object_slot(current).insert(name.clone(), value);
            }
            Segment::Index(index) => {
                *array_slot(current, *index) = value;
            }
        }
        Ok(())
    }
}

/// View a slot as a mapping, replacing any other kind in place.
fn object_slot(slot: &mut Value) -> &mut Map<String, Value> {
    if !slot.is_object() {
        *slot = Value::Object(Map::new());
    }
    match slot {
        Value::Object(map) => map,
        _ => unreachable!("slot was just made a mapping"),
    }
}

/// View a slot as an array long enough to index, replacing any other kind
/// in place and padding with nulls.
fn array_slot(slot: &mut Value, index: usize) -> &mut Value {
    if !slot.is_array() {
        *slot = Value::Array(Vec::new());
    }
    match slot {
        Value::Array(array) => {
            while array.len() <= index {
                array.push(Value::Null);
            }
            &mut array[index]
        }
        _ => unreachable!("slot was just made an array"),
    }
}

/// Human-readable kind of a JSON value, for error messages.
pub(crate) fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "mapping",
    }
}
