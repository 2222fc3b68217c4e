//! Credential persistence and authorization header resolution.
//!
//! ```rust
//! use nauth::Credential;
//!
//! let credential = Credential::new("advocate@example.in").with_token("t-1");
//! assert_eq!(credential.bearer_token(), Some("t-1"));
//! assert!(!format!("{credential:?}").contains("t-1"));
//! ```

mod backend;
mod backends;
mod error;
mod hooks;
mod resolver;
mod secret;
mod store;
mod types;

pub mod prelude {
    pub use crate::{
        AuthHeaderResolver, Credential, CredentialHooks, CredentialStore, FileSecretStore,
        InMemorySecretStore, NoopCredentialHooks, SecretStore, SecretStoreConfig, SecretString,
        StorageError, StorageErrorKind, create_default_secret_store, create_secret_store,
    };
}

pub use backend::{
    FileSecretStore, InMemorySecretStore, SecretStore, SecretStoreConfig,
    create_default_secret_store, create_secret_store,
};
pub use error::{StorageError, StorageErrorKind};
pub use hooks::{CredentialHooks, NoopCredentialHooks};
pub use resolver::AuthHeaderResolver;
pub use secret::SecretString;
pub use store::{CredentialStore, DEFAULT_CREDENTIAL_KEY};
pub use types::Credential;
