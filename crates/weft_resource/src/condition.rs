//! Status condition kinds.

use std::fmt;

/// Kinds of status condition a resource can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConditionKind {
    /// The resource is ready for use.
    Ready,
    /// The resource's desired state has been applied.
    Synced,
}

impl ConditionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConditionKind::Ready => "Ready",
            ConditionKind::Synced => "Synced",
        }
    }
}

impl fmt::Display for ConditionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
