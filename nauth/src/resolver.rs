//! Authorization header resolution from the stored credential.

use ncommon::{AUTHORIZATION, HeaderMap};

use crate::CredentialStore;

#[derive(Clone)]
pub struct AuthHeaderResolver {
    credentials: CredentialStore,
}

impl AuthHeaderResolver {
    pub fn new(credentials: CredentialStore) -> Self {
        Self { credentials }
    }

    pub fn credentials(&self) -> &CredentialStore {
        &self.credentials
    }

    /// Yields `Authorization: Bearer <token>` when a token is stored, otherwise an empty map.
    /// Never fails: a broken store degrades to unauthenticated headers.
    pub async fn resolve_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();

        let credential = match self.credentials.load().await {
            Ok(credential) => credential,
            Err(error) => {
                self.credentials
                    .hooks()
                    .on_storage_degraded("resolve_headers", &error);
                None
            }
        };

        if let Some(token) = credential.as_ref().and_then(|c| c.bearer_token()) {
            headers.insert(AUTHORIZATION.to_string(), format!("Bearer {token}"));
        }

        headers
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use ncommon::BoxFuture;

    use super::*;
    use crate::{
        Credential, CredentialHooks, InMemorySecretStore, SecretStore, StorageError,
    };

    #[derive(Debug, Default)]
    struct UnavailableSecretStore;

    impl SecretStore for UnavailableSecretStore {
        fn get<'a>(
            &'a self,
            _key: &'a str,
        ) -> BoxFuture<'a, Result<Option<String>, StorageError>> {
            Box::pin(async { Err(StorageError::unavailable("keychain locked")) })
        }

        fn set<'a>(
            &'a self,
            _key: &'a str,
            _value: String,
        ) -> BoxFuture<'a, Result<(), StorageError>> {
            Box::pin(async { Err(StorageError::unavailable("keychain locked")) })
        }

        fn delete<'a>(&'a self, _key: &'a str) -> BoxFuture<'a, Result<(), StorageError>> {
            Box::pin(async { Err(StorageError::unavailable("keychain locked")) })
        }
    }

    #[derive(Default)]
    struct DegradedHooks {
        operations: Mutex<Vec<String>>,
    }

    impl CredentialHooks for DegradedHooks {
        fn on_storage_degraded(&self, operation: &str, _error: &StorageError) {
            self.operations
                .lock()
                .expect("operations lock")
                .push(operation.to_string());
        }
    }

    #[tokio::test]
    async fn resolves_bearer_header_when_token_present() {
        let store = CredentialStore::new(Arc::new(InMemorySecretStore::new()));
        store
            .save(&Credential::new("a@b.in").with_token("tok-9"))
            .await
            .expect("save should work");

        let headers = AuthHeaderResolver::new(store).resolve_headers().await;
        assert_eq!(
            headers.get(AUTHORIZATION).map(String::as_str),
            Some("Bearer tok-9")
        );
    }

    #[tokio::test]
    async fn empty_headers_without_credential_or_token() {
        let store = CredentialStore::new(Arc::new(InMemorySecretStore::new()));
        let resolver = AuthHeaderResolver::new(store.clone());
        assert!(resolver.resolve_headers().await.is_empty());

        store
            .save(&Credential::new("a@b.in"))
            .await
            .expect("save should work");
        assert!(resolver.resolve_headers().await.is_empty());
    }

    #[tokio::test]
    async fn unavailable_store_degrades_to_no_auth() {
        let hooks = Arc::new(DegradedHooks::default());
        let store =
            CredentialStore::new(Arc::new(UnavailableSecretStore)).with_hooks(hooks.clone());

        let headers = AuthHeaderResolver::new(store).resolve_headers().await;

        assert!(headers.is_empty());
        assert_eq!(
            hooks.operations.lock().expect("operations lock").as_slice(),
            ["resolve_headers".to_string()]
        );
    }
}
