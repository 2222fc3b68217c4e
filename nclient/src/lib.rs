//! Client for the legal question-answering backend.
//!
//! Every call is a single attempt through a [`BackendTransport`]; the chat endpoint is
//! additionally raced against a fixed deadline. Failures come back as [`ClientError`]
//! values and are reported to [`ClientOperationHooks`].

mod auth;
mod call;
mod catalog;
mod error;
mod health;
mod hooks;
mod orchestrator;
mod transport;
mod wire;

pub mod prelude;

pub use auth::{AuthClient, LOGIN_PATH, REGISTER_PATH};
pub use call::with_deadline;
pub use catalog::{CatalogPolicy, DegradePolicy, SESSIONS_PATH, SessionCatalog};
pub use error::{CANCELLED_MESSAGE, ClientError, ClientErrorKind, TIMEOUT_MESSAGE};
pub use health::{HEALTH_PATH, HealthProbe};
pub use hooks::{ClientOperation, ClientOperationHooks, NoopClientHooks};
pub use orchestrator::{CHAT_PATH, ChatApi, DEFAULT_CHAT_TIMEOUT, RequestOrchestrator};
pub use transport::{
    BackendTransport, DEFAULT_BASE_URL, HttpMethod, HttpRequest, HttpResponse, ReqwestTransport,
};
pub use wire::{
    ChatReply, HealthStatus, RegisterRequest, SessionDetail, SessionMessage, SessionSummary,
    Source, UserRecord,
};
pub use ncommon::{BoxFuture, HeaderMap, SessionId};
