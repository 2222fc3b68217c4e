//! Secret store contract and in-memory store implementation.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use ncommon::BoxFuture;

use crate::backends::filesystem::default_secret_root;
use crate::error::StorageError;

pub use crate::backends::filesystem::FileSecretStore;

/// Async key-value store for small secrets. Each call is atomic on its own.
pub trait SecretStore: Send + Sync {
    fn get<'a>(&'a self, key: &'a str) -> BoxFuture<'a, Result<Option<String>, StorageError>>;

    fn set<'a>(&'a self, key: &'a str, value: String) -> BoxFuture<'a, Result<(), StorageError>>;

    /// Removing a missing key is not an error.
    fn delete<'a>(&'a self, key: &'a str) -> BoxFuture<'a, Result<(), StorageError>>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SecretStoreConfig {
    Filesystem { root: PathBuf },
    InMemory,
}

impl Default for SecretStoreConfig {
    fn default() -> Self {
        Self::Filesystem {
            root: default_secret_root(),
        }
    }
}

pub fn create_secret_store(config: SecretStoreConfig) -> Result<Arc<dyn SecretStore>, StorageError> {
    match config {
        SecretStoreConfig::Filesystem { root } => Ok(Arc::new(FileSecretStore::new(root)?)),
        SecretStoreConfig::InMemory => Ok(Arc::new(InMemorySecretStore::new())),
    }
}

pub fn create_default_secret_store() -> Result<Arc<dyn SecretStore>, StorageError> {
    create_secret_store(SecretStoreConfig::default())
}

#[derive(Debug, Default)]
pub struct InMemorySecretStore {
    entries: Mutex<HashMap<String, String>>,
}

impl InMemorySecretStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SecretStore for InMemorySecretStore {
    fn get<'a>(&'a self, key: &'a str) -> BoxFuture<'a, Result<Option<String>, StorageError>> {
        Box::pin(async move {
            let entries = self
                .entries
                .lock()
                .map_err(|_| StorageError::unavailable("secret store lock poisoned"))?;

            Ok(entries.get(key).cloned())
        })
    }

    fn set<'a>(&'a self, key: &'a str, value: String) -> BoxFuture<'a, Result<(), StorageError>> {
        Box::pin(async move {
            let mut entries = self
                .entries
                .lock()
                .map_err(|_| StorageError::unavailable("secret store lock poisoned"))?;

            entries.insert(key.to_string(), value);
            Ok(())
        })
    }

    fn delete<'a>(&'a self, key: &'a str) -> BoxFuture<'a, Result<(), StorageError>> {
        Box::pin(async move {
            let mut entries = self
                .entries
                .lock()
                .map_err(|_| StorageError::unavailable("secret store lock poisoned"))?;

            entries.remove(key);
            Ok(())
        })
    }
}
