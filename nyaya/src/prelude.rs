//! Common imports for most nyaya applications.

pub use crate::{
    ClientBundle, ClientConfig, ClientHooks, build_client, build_client_with,
    build_client_with_transport,
};
pub use crate::{
    BackendTransport, BoxFuture, CatalogPolicy, ChatSession, ChatState, ClientError,
    ClientErrorKind, ConfidenceLevel, ConfidenceResult, Credential, DegradePolicy,
    FileSecretStore, HttpRequest, HttpResponse, InMemorySecretStore, Message, RegisterRequest,
    Role, SecretStore, SessionDetail, SessionId, SessionSummary, Source, TurnOutcome,
};
