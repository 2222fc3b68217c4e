//! Common `nclient` imports for downstream crates.

pub use crate::{
    AuthClient, BackendTransport, CatalogPolicy, ChatApi, ChatReply, ClientError,
    ClientErrorKind, ClientOperation, ClientOperationHooks, DegradePolicy, HealthProbe,
    HealthStatus, HttpMethod, HttpRequest, HttpResponse, NoopClientHooks, RegisterRequest,
    RequestOrchestrator, ReqwestTransport, SessionCatalog, SessionDetail, SessionMessage,
    SessionSummary, Source, UserRecord,
};
pub use ncommon::{BoxFuture, HeaderMap, SessionId};
