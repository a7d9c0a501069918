//! Shared metadata helpers over dynamic documents.

use std::collections::BTreeMap;

use serde_json::Value;
use weft_document::Document;

use crate::condition::ConditionKind;

/// Read `metadata.labels` as a string map. Non-string values are skipped.
pub(crate) fn labels(document: &Document) -> BTreeMap<String, String> {
    let mut out = BTreeMap::new();
    if let Ok(Some(Value::Object(map))) = document.get_value("metadata.labels") {
        for (key, value) in map {
            if let Value::String(s) = value {
                out.insert(key.clone(), s.clone());
            }
        }
    }
    out
}

/// Whether `status.conditions` holds an entry of the given kind with
/// status `"True"`.
pub(crate) fn is_condition_true(document: &Document, kind: ConditionKind) -> bool {
    let Ok(Some(Value::Array(conditions))) = document.get_value("status.conditions") else {
        return false;
    };
    conditions.iter().any(|condition| {
        condition.get("type").and_then(Value::as_str) == Some(kind.as_str())
            && condition.get("status").and_then(Value::as_str) == Some("True")
    })
}
