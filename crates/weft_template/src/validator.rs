//! Advisory template validation.
//!
//! Validation goes no further than what applying the template needs:
//! paths that must be present, and per-type readiness check arguments.
//! The engine re-surfaces anything missed here with positional errors.

use crate::model::{ReadinessCheckType, Template};

/// Accumulated validation outcome for a template.
#[derive(Debug, Default)]
pub struct TemplateValidation {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl TemplateValidation {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    fn error(&mut self, msg: impl Into<String>) {
        self.errors.push(msg.into());
    }

    fn warning(&mut self, msg: impl Into<String>) {
        self.warnings.push(msg.into());
    }
}

/// Validate a template's internal consistency.
pub fn validate(template: &Template) -> TemplateValidation {
    let mut result = TemplateValidation::default();

    if !template.base.is_object() {
        result.error("base must be a mapping");
    }

    for (index, patch) in template.patches.iter().enumerate() {
        if patch.from_field_path.is_empty() {
            result.error(format!("patch {} has an empty fromFieldPath", index));
        }
    }

    for (index, check) in template.readiness_checks.iter().enumerate() {
        if check.field_path.is_empty() {
            result.error(format!("readiness check {} has an empty fieldPath", index));
        }
        match check.check_type {
            ReadinessCheckType::MatchString if check.match_string.is_none() => {
                result.error(format!("readiness check {} is missing matchString", index));
            }
            ReadinessCheckType::MatchInteger if check.match_integer.is_none() => {
                result.error(format!("readiness check {} is missing matchInteger", index));
            }
            ReadinessCheckType::Unknown => {
                result.warning(format!(
                    "readiness check {} has an unrecognized type and will fail evaluation",
                    index
                ));
            }
            _ => {}
        }
    }

    if let Some(reference) = &template.connection_secret_ref {
        if reference.name_path.is_empty() || reference.namespace_path.is_empty() {
            result.error("connectionSecretRef paths must be non-empty");
        }
    }

    result
}
