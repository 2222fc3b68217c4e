//! Lifecycle hooks for credential persistence events.
//!
//! ```rust
//! use nauth::{CredentialHooks, NoopCredentialHooks};
//!
//! fn assert_hooks_trait(_hooks: &dyn CredentialHooks) {}
//!
//! let hooks = NoopCredentialHooks;
//! assert_hooks_trait(&hooks);
//! ```

use crate::StorageError;

pub trait CredentialHooks: Send + Sync {
    fn on_credential_saved(&self, _email: &str) {}

    fn on_credential_cleared(&self) {}

    /// A stored record could not be decoded and was treated as absent.
    fn on_corrupt_record(&self, _key: &str, _error: &StorageError) {}

    /// The secret store failed and the caller continued unauthenticated.
    fn on_storage_degraded(&self, _operation: &str, _error: &StorageError) {}
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoopCredentialHooks;

impl CredentialHooks for NoopCredentialHooks {}
