//! Connection detail resolution for composed resources.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tracing::debug;
use weft_document::DocumentError;
use weft_resource::{Composed, Secret, SecretReference, SecretStore, SecretStoreError};
use weft_template::{ConnectionDetailSpec, Template};

use crate::error::{ComposeError, ComposeResult};

/// Key/byte-value mapping exposed to consumers of a composed resource.
/// Keys are unique; within one resolution pass the last write wins.
pub type ConnectionDetails = BTreeMap<String, Vec<u8>>;

/// Resolves the connection details of a composed resource.
#[async_trait]
pub trait ConnectionDetailsFetcher: Send + Sync {
    /// Fetch connection details. `Ok(None)` means no secret is configured
    /// for this resource at all.
    async fn fetch(
        &self,
        composed: &Composed,
        template: &Template,
    ) -> ComposeResult<Option<ConnectionDetails>>;
}

/// Fetcher backed by an injected secret store.
pub struct SecretConnectionFetcher<S> {
    store: S,
}

impl<S: SecretStore> SecretConnectionFetcher<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }
}

#[async_trait]
impl<S: SecretStore> ConnectionDetailsFetcher for SecretConnectionFetcher<S> {
    async fn fetch(
        &self,
        composed: &Composed,
        template: &Template,
    ) -> ComposeResult<Option<ConnectionDetails>> {
        let reference = match secret_reference(composed, template)? {
            Some(reference) => reference,
            None => return Ok(None),
        };

        // A composed resource may want to write a connection secret but not
        // have done so yet. Treat a missing secret as "no data yet" and let
        // the mapping pass no-op against it; details propagate on a later
        // reconciliation.
        let secret = match self.store.get(&reference).await {
            Ok(secret) => secret,
            Err(err) if err.is_not_found() => Secret::default(),
            Err(SecretStoreError::Cancelled(message)) => {
                return Err(ComposeError::Cancelled(message))
            }
            Err(err) => return Err(ComposeError::SecretFetch(err)),
        };

        let mut details = ConnectionDetails::new();
        for spec in &template.connection_details {
            match spec {
                ConnectionDetailSpec::Literal { name, value } => {
                    details.insert(name.clone(), value.clone().into_bytes());
                }
                ConnectionDetailSpec::FromSecretKey {
                    from_secret_key,
                    rename,
                } => {
                    let data = match secret.data.get(from_secret_key) {
                        Some(data) if !data.is_empty() => data.clone(),
                        _ => continue,
                    };
                    let key = rename.as_ref().unwrap_or(from_secret_key);
                    details.insert(key.clone(), data);
                }
            }
        }

        debug!(
            secret = %reference.name,
            namespace = %reference.namespace,
            details = details.len(),
            "Resolved connection details"
        );
        Ok(Some(details))
    }
}

/// Resolve which secret backs the composed resource's connection details.
///
/// A template-level path reference takes priority over the resource's own
/// write-connection-secret reference. Resolving either path to an empty
/// string means "no secret configured", which is not an error.
fn secret_reference(
    composed: &Composed,
    template: &Template,
) -> ComposeResult<Option<SecretReference>> {
    let Some(path_ref) = &template.connection_secret_ref else {
        return Ok(composed.write_connection_secret_ref());
    };

    let name = resolve_ref_string(composed, &path_ref.name_path)?;
    let namespace = resolve_ref_string(composed, &path_ref.namespace_path)?;
    if name.is_empty() || namespace.is_empty() {
        return Ok(None);
    }
    Ok(Some(SecretReference { name, namespace }))
}

fn resolve_ref_string(composed: &Composed, path: &str) -> ComposeResult<String> {
    match composed.document().get_string(path) {
        Ok(Some(value)) => Ok(value.to_string()),
        Ok(None) => Err(ComposeError::SecretPathNotFound {
            path: path.to_string(),
        }),
        Err(DocumentError::TypeMismatch { .. }) => Err(ComposeError::SecretRefNotString {
            path: path.to_string(),
        }),
        Err(err) => Err(err.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::Mutex;
    use weft_resource::SecretStoreResult;
    use weft_template::PathSecretRef;

    /// Store holding one secret at one reference, recording requests.
    struct SingleSecretStore {
        reference: SecretReference,
        secret: Secret,
        requests: Mutex<Vec<SecretReference>>,
    }

    impl SingleSecretStore {
        fn new(reference: SecretReference, secret: Secret) -> Self {
            Self {
                reference,
                secret,
                requests: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl SecretStore for SingleSecretStore {
        async fn get(&self, reference: &SecretReference) -> SecretStoreResult<Secret> {
            self.requests.lock().unwrap().push(reference.clone());
            if *reference == self.reference {
                Ok(self.secret.clone())
            } else {
                Err(SecretStoreError::NotFound {
                    name: reference.name.clone(),
                    namespace: reference.namespace.clone(),
                })
            }
        }
    }

    struct CancelledStore;

    #[async_trait]
    impl SecretStore for CancelledStore {
        async fn get(&self, _reference: &SecretReference) -> SecretStoreResult<Secret> {
            Err(SecretStoreError::Cancelled("deadline exceeded".to_string()))
        }
    }

    struct BrokenStore;

    #[async_trait]
    impl SecretStore for BrokenStore {
        async fn get(&self, _reference: &SecretReference) -> SecretStoreResult<Secret> {
            Err(SecretStoreError::Store("connection refused".to_string()))
        }
    }

    fn child_with_default_ref() -> Composed {
        Composed::from_value(json!({
            "spec": {"writeConnectionSecretToRef": {"name": "default-conn", "namespace": "prod"}}
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn test_no_reference_yields_none() {
        let fetcher = SecretConnectionFetcher::new(SingleSecretStore::new(
            SecretReference::new("unused", "unused"),
            Secret::new(),
        ));
        let details = fetcher
            .fetch(&Composed::new(), &Template::default())
            .await
            .unwrap();
        assert!(details.is_none());
    }

    #[tokio::test]
    async fn test_indirect_reference_takes_priority() {
        let store = SingleSecretStore::new(
            SecretReference::new("indirect-conn", "prod"),
            Secret::new().with_entry("password", "s3cr3t"),
        );
        // Child carries both its own reference and the fields the template's
        // path reference points at.
        let composed = Composed::from_value(json!({
            "spec": {
                "writeConnectionSecretToRef": {"name": "default-conn", "namespace": "prod"},
                "secretName": "indirect-conn",
                "secretNamespace": "prod",
            }
        }))
        .unwrap();
        let template = Template::default()
            .connection_secret_ref(PathSecretRef::new("spec.secretName", "spec.secretNamespace"))
            .connection_detail(ConnectionDetailSpec::FromSecretKey {
                from_secret_key: "password".to_string(),
                rename: None,
            });

        let fetcher = SecretConnectionFetcher::new(store);
        let details = fetcher.fetch(&composed, &template).await.unwrap().unwrap();
        assert_eq!(details.get("password"), Some(&b"s3cr3t".to_vec()));

        let requests = fetcher.store.requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].name, "indirect-conn");
    }

    #[tokio::test]
    async fn test_literal_and_secret_details_merge() {
        let store = SingleSecretStore::new(
            SecretReference::new("default-conn", "prod"),
            Secret::new().with_entry("password", "s3cr3t"),
        );
        let template = Template::default()
            .connection_detail(ConnectionDetailSpec::Literal {
                name: "user".to_string(),
                value: "alice".to_string(),
            })
            .connection_detail(ConnectionDetailSpec::FromSecretKey {
                from_secret_key: "password".to_string(),
                rename: Some("pass".to_string()),
            });

        let fetcher = SecretConnectionFetcher::new(store);
        let details = fetcher
            .fetch(&child_with_default_ref(), &template)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(details.get("user"), Some(&b"alice".to_vec()));
        assert_eq!(details.get("pass"), Some(&b"s3cr3t".to_vec()));
        assert_eq!(details.len(), 2);
    }

    #[tokio::test]
    async fn test_missing_secret_is_no_data_yet() {
        let store = SingleSecretStore::new(
            SecretReference::new("somewhere-else", "prod"),
            Secret::new(),
        );
        let template = Template::default()
            .connection_detail(ConnectionDetailSpec::Literal {
                name: "user".to_string(),
                value: "alice".to_string(),
            })
            .connection_detail(ConnectionDetailSpec::FromSecretKey {
                from_secret_key: "password".to_string(),
                rename: None,
            });

        let fetcher = SecretConnectionFetcher::new(store);
        let details = fetcher
            .fetch(&child_with_default_ref(), &template)
            .await
            .unwrap()
            .unwrap();

        // Literal specs still apply; the secret-derived one no-ops.
        assert_eq!(details.get("user"), Some(&b"alice".to_vec()));
        assert_eq!(details.len(), 1);
    }

    #[tokio::test]
    async fn test_empty_secret_value_is_skipped() {
        let store = SingleSecretStore::new(
            SecretReference::new("default-conn", "prod"),
            Secret::new().with_entry("password", Vec::new()),
        );
        let template = Template::default().connection_detail(ConnectionDetailSpec::FromSecretKey {
            from_secret_key: "password".to_string(),
            rename: None,
        });

        let fetcher = SecretConnectionFetcher::new(store);
        let details = fetcher
            .fetch(&child_with_default_ref(), &template)
            .await
            .unwrap()
            .unwrap();
        assert!(details.is_empty());
    }

    #[tokio::test]
    async fn test_secret_path_not_found() {
        let template = Template::default()
            .connection_secret_ref(PathSecretRef::new("spec.secretName", "spec.secretNamespace"));
        let fetcher = SecretConnectionFetcher::new(BrokenStore);

        let err = fetcher
            .fetch(&Composed::new(), &template)
            .await
            .unwrap_err();
        assert!(matches!(err, ComposeError::SecretPathNotFound { .. }));
    }

    #[tokio::test]
    async fn test_secret_path_empty_means_no_secret() {
        let composed = Composed::from_value(json!({
            "spec": {"secretName": "", "secretNamespace": "prod"}
        }))
        .unwrap();
        let template = Template::default()
            .connection_secret_ref(PathSecretRef::new("spec.secretName", "spec.secretNamespace"));
        let fetcher = SecretConnectionFetcher::new(BrokenStore);

        let details = fetcher.fetch(&composed, &template).await.unwrap();
        assert!(details.is_none());
    }

    #[tokio::test]
    async fn test_secret_path_non_string_is_hard_error() {
        let composed = Composed::from_value(json!({
            "spec": {"secretName": 42, "secretNamespace": "prod"}
        }))
        .unwrap();
        let template = Template::default()
            .connection_secret_ref(PathSecretRef::new("spec.secretName", "spec.secretNamespace"));
        let fetcher = SecretConnectionFetcher::new(BrokenStore);

        let err = fetcher.fetch(&composed, &template).await.unwrap_err();
        assert!(matches!(err, ComposeError::SecretRefNotString { .. }));
    }

    #[tokio::test]
    async fn test_cancelled_fetch_is_classified() {
        let fetcher = SecretConnectionFetcher::new(CancelledStore);
        let err = fetcher
            .fetch(&child_with_default_ref(), &Template::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ComposeError::Cancelled(_)));
    }

    #[tokio::test]
    async fn test_store_failure_is_fatal() {
        let fetcher = SecretConnectionFetcher::new(BrokenStore);
        let err = fetcher
            .fetch(&child_with_default_ref(), &Template::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ComposeError::SecretFetch(_)));
    }
}
