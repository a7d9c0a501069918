//! Readiness evaluation for composed resources.

use async_trait::async_trait;
use tracing::debug;
use weft_document::DocumentError;
use weft_resource::{Composed, ConditionKind};
use weft_template::{ReadinessCheck, ReadinessCheckType, Template};

use crate::error::{ComposeError, ComposeResult};

/// Decides whether a composed resource has reached a ready state.
#[async_trait]
pub trait ReadinessChecker: Send + Sync {
    async fn is_ready(&self, composed: &Composed, template: &Template) -> ComposeResult<bool>;
}

/// Evaluates a template's readiness checks in order.
///
/// All checks must pass; evaluation stops at the first unmet one. A check
/// whose path is absent is unmet, not an error — the resource simply is not
/// ready yet. With no checks declared, readiness degrades to the resource's
/// own `Ready` condition.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultReadinessChecker;

#[async_trait]
impl ReadinessChecker for DefaultReadinessChecker {
    async fn is_ready(&self, composed: &Composed, template: &Template) -> ComposeResult<bool> {
        if template.readiness_checks.is_empty() {
            return Ok(composed.is_condition_true(ConditionKind::Ready));
        }

        for (index, check) in template.readiness_checks.iter().enumerate() {
            if !evaluate(composed, check, index)? {
                debug!(index, path = %check.field_path, "Readiness check not yet satisfied");
                return Ok(false);
            }
        }
        Ok(true)
    }
}

fn evaluate(composed: &Composed, check: &ReadinessCheck, index: usize) -> ComposeResult<bool> {
    let document = composed.document();
    match check.check_type {
        ReadinessCheckType::NonEmpty => Ok(document.get_value(&check.field_path)?.is_some()),
        ReadinessCheckType::MatchString => {
            let expected = check.match_string.as_deref().unwrap_or_default();
            match document.get_string(&check.field_path) {
                Ok(value) => Ok(value == Some(expected)),
                Err(err @ DocumentError::TypeMismatch { .. }) => {
                    Err(ComposeError::ReadinessTypeMismatch { index, source: err })
                }
                Err(err) => Err(err.into()),
            }
        }
        ReadinessCheckType::MatchInteger => {
            let expected = check.match_integer.unwrap_or_default();
            match document.get_integer(&check.field_path) {
                Ok(value) => Ok(value == Some(expected)),
                Err(err @ DocumentError::TypeMismatch { .. }) => {
                    Err(ComposeError::ReadinessTypeMismatch { index, source: err })
                }
                Err(err) => Err(err.into()),
            }
        }
        ReadinessCheckType::Unknown => Err(ComposeError::UnknownReadinessCheck { index }),
    }
}
