//! Connection secrets and the secret store boundary.

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::SecretStoreResult;

/// A literal reference to a secret by name and namespace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecretReference {
    pub name: String,
    pub namespace: String,
}

impl SecretReference {
    pub fn new(name: impl Into<String>, namespace: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: namespace.into(),
        }
    }
}

/// Secret material fetched from a store: opaque bytes per key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Secret {
    pub data: BTreeMap<String, Vec<u8>>,
}

impl Secret {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(mut self, key: impl Into<String>, value: impl Into<Vec<u8>>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }
}

/// Capability to fetch secrets.
///
/// Implementations are expected to honor the caller's cancellation or
/// deadline and report it as [`SecretStoreError::Cancelled`] rather than a
/// generic store failure.
///
/// [`SecretStoreError::Cancelled`]: crate::error::SecretStoreError::Cancelled
#[async_trait]
pub trait SecretStore: Send + Sync {
    /// Fetch the secret at the given reference.
    async fn get(&self, reference: &SecretReference) -> SecretStoreResult<Secret>;
}
