//! Unified facade over the nyaya workspace crates.
//!
//! Most applications depend on this crate alone: it re-exports the credential,
//! client, chat and observability crates and wires them together from a
//! [`ClientConfig`].
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use nyaya::{ClientConfig, InMemorySecretStore, build_client};
//!
//! let config = ClientConfig::new("http://localhost:8000");
//! let client = build_client(&config, Arc::new(InMemorySecretStore::new()))
//!     .expect("default config is valid");
//!
//! let session = client.chat_session();
//! assert!(session.session_id().is_none());
//! ```

mod config;

pub mod prelude;
pub mod runtime;

pub use nauth;
pub use nchat;
pub use nclient;
pub use ncommon;
pub use nobserve;

pub use nauth::{
    AuthHeaderResolver, Credential, CredentialHooks, CredentialStore, FileSecretStore,
    InMemorySecretStore, NoopCredentialHooks, SecretStore, SecretStoreConfig, SecretString,
    StorageError, StorageErrorKind, create_default_secret_store, create_secret_store,
};
pub use nchat::{
    ChatSession, ChatSessionHooks, ChatState, ConfidenceClassifier, ConfidenceLevel,
    ConfidenceResult, Message, NoopChatHooks, RejectReason, Role, TurnOutcome,
};
pub use nclient::{
    AuthClient, BackendTransport, CatalogPolicy, ChatApi, ChatReply, ClientError,
    ClientErrorKind, ClientOperation, ClientOperationHooks, DegradePolicy, HealthProbe,
    HealthStatus, HttpMethod, HttpRequest, HttpResponse, NoopClientHooks, RegisterRequest,
    RequestOrchestrator, ReqwestTransport, SessionCatalog, SessionDetail, SessionMessage,
    SessionSummary, Source, UserRecord,
};
pub use ncommon::{BoxFuture, HeaderMap, SessionId};
pub use nobserve::{
    MetricsObservabilityHooks, SafeChatHooks, SafeClientHooks, SafeCredentialHooks,
    TracingObservabilityHooks,
};

pub use config::{
    BASE_URL_ENV, CHAT_TIMEOUT_ENV, ClientConfig, DEFAULT_REQUEST_TIMEOUT,
};
pub use runtime::{
    ClientBundle, ClientHooks, build_client, build_client_with, build_client_with_transport,
};
