//! Single-record credential persistence over a [`SecretStore`].

use std::sync::Arc;

use crate::{Credential, CredentialHooks, NoopCredentialHooks, SecretStore, StorageError};

pub const DEFAULT_CREDENTIAL_KEY: &str = "nyaya.credential";

#[derive(Clone)]
pub struct CredentialStore {
    secrets: Arc<dyn SecretStore>,
    key: String,
    hooks: Arc<dyn CredentialHooks>,
}

impl CredentialStore {
    pub fn new(secrets: Arc<dyn SecretStore>) -> Self {
        Self {
            secrets,
            key: DEFAULT_CREDENTIAL_KEY.to_string(),
            hooks: Arc::new(NoopCredentialHooks),
        }
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    pub fn with_hooks(mut self, hooks: Arc<dyn CredentialHooks>) -> Self {
        self.hooks = hooks;
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub(crate) fn hooks(&self) -> &dyn CredentialHooks {
        self.hooks.as_ref()
    }

    /// Replaces the stored record wholesale.
    pub async fn save(&self, credential: &Credential) -> Result<(), StorageError> {
        let encoded = serde_json::to_string(credential).map_err(|error| {
            StorageError::serialization(format!("failed to serialize credential: {error}"))
        })?;

        self.secrets.set(&self.key, encoded).await?;
        self.hooks.on_credential_saved(&credential.email);
        Ok(())
    }

    /// Returns `Ok(None)` when nothing is stored or the stored record cannot be decoded.
    /// Only an unavailable store surfaces as an error.
    pub async fn load(&self) -> Result<Option<Credential>, StorageError> {
        let Some(raw) = self.secrets.get(&self.key).await? else {
            return Ok(None);
        };

        match serde_json::from_str::<Credential>(&raw) {
            Ok(credential) => Ok(Some(credential)),
            Err(error) => {
                let error = StorageError::invalid_record(format!(
                    "failed to deserialize credential: {error}"
                ));
                self.hooks.on_corrupt_record(&self.key, &error);
                Ok(None)
            }
        }
    }

    pub async fn clear(&self) -> Result<(), StorageError> {
        self.secrets.delete(&self.key).await?;
        self.hooks.on_credential_cleared();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::InMemorySecretStore;

    #[derive(Default)]
    struct RecordingHooks {
        events: Mutex<Vec<String>>,
    }

    impl CredentialHooks for RecordingHooks {
        fn on_credential_saved(&self, email: &str) {
            self.events
                .lock()
                .expect("events lock")
                .push(format!("saved:{email}"));
        }

        fn on_credential_cleared(&self) {
            self.events
                .lock()
                .expect("events lock")
                .push("cleared".to_string());
        }

        fn on_corrupt_record(&self, key: &str, error: &StorageError) {
            self.events
                .lock()
                .expect("events lock")
                .push(format!("corrupt:{key}:{:?}", error.kind));
        }
    }

    #[tokio::test]
    async fn save_then_load_returns_same_credential() {
        let store = CredentialStore::new(Arc::new(InMemorySecretStore::new()));
        let credential = Credential::new("advocate@example.in")
            .with_token("tok-123")
            .with_name("A. Advocate");

        store.save(&credential).await.expect("save should work");
        let loaded = store.load().await.expect("load should work");

        assert_eq!(loaded, Some(credential));
    }

    #[tokio::test]
    async fn clear_then_load_returns_none_and_clear_is_idempotent() {
        let store = CredentialStore::new(Arc::new(InMemorySecretStore::new()));
        store
            .save(&Credential::new("a@b.in").with_token("t"))
            .await
            .expect("save should work");

        store.clear().await.expect("clear should work");
        store.clear().await.expect("clearing twice should work");

        assert_eq!(store.load().await.expect("load should work"), None);
    }

    #[tokio::test]
    async fn corrupt_record_loads_as_none_and_is_reported() {
        let secrets = Arc::new(InMemorySecretStore::new());
        secrets
            .set(DEFAULT_CREDENTIAL_KEY, "{not json".to_string())
            .await
            .expect("seed corrupt record");

        let hooks = Arc::new(RecordingHooks::default());
        let store = CredentialStore::new(secrets).with_hooks(hooks.clone());

        assert_eq!(store.load().await.expect("load should not fail"), None);
        let events = hooks.events.lock().expect("events lock").clone();
        assert_eq!(
            events,
            vec![format!("corrupt:{DEFAULT_CREDENTIAL_KEY}:InvalidRecord")]
        );
    }

    #[tokio::test]
    async fn record_missing_email_is_treated_as_absent() {
        let secrets = Arc::new(InMemorySecretStore::new());
        secrets
            .set(DEFAULT_CREDENTIAL_KEY, "{\"token\":\"t\"}".to_string())
            .await
            .expect("seed partial record");

        let store = CredentialStore::new(secrets);
        assert_eq!(store.load().await.expect("load should not fail"), None);
    }

    #[tokio::test]
    async fn custom_key_isolates_records() {
        let secrets: Arc<dyn SecretStore> = Arc::new(InMemorySecretStore::new());
        let first = CredentialStore::new(Arc::clone(&secrets)).with_key("first");
        let second = CredentialStore::new(secrets).with_key("second");

        first
            .save(&Credential::new("one@b.in"))
            .await
            .expect("save should work");

        assert_eq!(second.load().await.expect("load"), None);
        assert_eq!(
            first.load().await.expect("load").map(|c| c.email),
            Some("one@b.in".to_string())
        );
    }

    #[tokio::test]
    async fn save_and_clear_notify_hooks() {
        let hooks = Arc::new(RecordingHooks::default());
        let store =
            CredentialStore::new(Arc::new(InMemorySecretStore::new())).with_hooks(hooks.clone());

        store
            .save(&Credential::new("a@b.in"))
            .await
            .expect("save should work");
        store.clear().await.expect("clear should work");

        let events = hooks.events.lock().expect("events lock").clone();
        assert_eq!(events, vec!["saved:a@b.in".to_string(), "cleared".to_string()]);
    }
}
