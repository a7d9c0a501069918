//! Declarative template model.
//!
//! A template is the recipe for one composed resource: a base document,
//! an ordered list of field patches, connection detail specs, readiness
//! checks, and an optional indirect reference to the backing connection
//! secret. Templates are immutable once loaded and read-only to the
//! composition engine.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The declarative recipe governing one composed resource.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Template {
    /// The base document applied to the composed resource as a full
    /// overwrite.
    pub base: Value,
    /// Field patches applied in order from composite to composed.
    pub patches: Vec<PatchSpec>,
    /// Connection detail specs evaluated in order; later writes win.
    pub connection_details: Vec<ConnectionDetailSpec>,
    /// Readiness checks evaluated in order; all must pass.
    pub readiness_checks: Vec<ReadinessCheck>,
    /// Indirect reference to the composed resource's connection secret,
    /// taking priority over its own `writeConnectionSecretToRef`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connection_secret_ref: Option<PathSecretRef>,
}

impl Template {
    pub fn with_base(base: Value) -> Self {
        Self {
            base,
            ..Self::default()
        }
    }

    pub fn patch(mut self, patch: PatchSpec) -> Self {
        self.patches.push(patch);
        self
    }

    pub fn connection_detail(mut self, spec: ConnectionDetailSpec) -> Self {
        self.connection_details.push(spec);
        self
    }

    pub fn readiness_check(mut self, check: ReadinessCheck) -> Self {
        self.readiness_checks.push(check);
        self
    }

    pub fn connection_secret_ref(mut self, reference: PathSecretRef) -> Self {
        self.connection_secret_ref = Some(reference);
        self
    }
}

/// A parent-to-child field binding.
///
/// How a patch is applied is the patch applicator's concern; the template
/// only carries the paths.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatchSpec {
    /// Path read on the composite's document.
    pub from_field_path: String,
    /// Path written on the composed document; defaults to `from_field_path`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to_field_path: Option<String>,
}

impl PatchSpec {
    pub fn new(from_field_path: impl Into<String>) -> Self {
        Self {
            from_field_path: from_field_path.into(),
            to_field_path: None,
        }
    }

    pub fn to(mut self, to_field_path: impl Into<String>) -> Self {
        self.to_field_path = Some(to_field_path.into());
        self
    }

    /// The path written on the composed document.
    pub fn target_path(&self) -> &str {
        self.to_field_path
            .as_deref()
            .unwrap_or(&self.from_field_path)
    }
}

/// One connection detail: either a literal value carried by the template,
/// or a key looked up in the fetched connection secret.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConnectionDetailSpec {
    /// A constant detail injected by the template; does not touch the
    /// fetched secret.
    Literal { name: String, value: String },
    /// A detail copied from the fetched secret, optionally renamed.
    #[serde(rename_all = "camelCase")]
    FromSecretKey {
        from_secret_key: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        rename: Option<String>,
    },
}

/// Paths into the composed resource's own document that resolve to the
/// name and namespace of its backing connection secret.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PathSecretRef {
    pub name_path: String,
    pub namespace_path: String,
}

impl PathSecretRef {
    pub fn new(name_path: impl Into<String>, namespace_path: impl Into<String>) -> Self {
        Self {
            name_path: name_path.into(),
            namespace_path: namespace_path.into(),
        }
    }
}

/// Kinds of readiness check.
///
/// Unknown wire values deserialize to [`ReadinessCheckType::Unknown`] so the
/// evaluator can reject them with the offending index instead of the whole
/// template failing to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReadinessCheckType {
    NonEmpty,
    MatchString,
    MatchInteger,
    #[serde(other)]
    Unknown,
}

/// A typed predicate over the composed resource's document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadinessCheck {
    #[serde(rename = "type")]
    pub check_type: ReadinessCheckType,
    pub field_path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub match_string: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub match_integer: Option<i64>,
}

impl ReadinessCheck {
    pub fn non_empty(field_path: impl Into<String>) -> Self {
        Self {
            check_type: ReadinessCheckType::NonEmpty,
            field_path: field_path.into(),
            match_string: None,
            match_integer: None,
        }
    }

    pub fn match_string(field_path: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            check_type: ReadinessCheckType::MatchString,
            field_path: field_path.into(),
            match_string: Some(value.into()),
            match_integer: None,
        }
    }

    pub fn match_integer(field_path: impl Into<String>, value: i64) -> Self {
        Self {
            check_type: ReadinessCheckType::MatchInteger,
            field_path: field_path.into(),
            match_string: None,
            match_integer: Some(value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_connection_detail_untagged() {
        let literal: ConnectionDetailSpec =
            serde_json::from_value(json!({"name": "user", "value": "alice"})).unwrap();
        assert_eq!(
            literal,
            ConnectionDetailSpec::Literal {
                name: "user".to_string(),
                value: "alice".to_string(),
            }
        );

        let from_key: ConnectionDetailSpec =
            serde_json::from_value(json!({"fromSecretKey": "password", "rename": "pass"}))
                .unwrap();
        assert_eq!(
            from_key,
            ConnectionDetailSpec::FromSecretKey {
                from_secret_key: "password".to_string(),
                rename: Some("pass".to_string()),
            }
        );
    }

    #[test]
    fn test_readiness_check_unknown_type() {
        let check: ReadinessCheck =
            serde_json::from_value(json!({"type": "MatchRegex", "fieldPath": "status.phase"}))
                .unwrap();
        assert_eq!(check.check_type, ReadinessCheckType::Unknown);
    }

    #[test]
    fn test_patch_target_path_defaults() {
        let patch = PatchSpec::new("spec.region");
        assert_eq!(patch.target_path(), "spec.region");
        let patch = patch.to("spec.forProvider.region");
        assert_eq!(patch.target_path(), "spec.forProvider.region");
    }

    #[test]
    fn test_template_defaults() {
        let template: Template = serde_json::from_value(json!({"base": {"kind": "Bucket"}})).unwrap();
        assert!(template.patches.is_empty());
        assert!(template.readiness_checks.is_empty());
        assert!(template.connection_secret_ref.is_none());
    }
}
