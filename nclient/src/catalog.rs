//! Server-side chat history: list, fetch, delete.

use std::sync::Arc;

use nauth::AuthHeaderResolver;
use ncommon::SessionId;

use crate::call::execute_call;
use crate::wire::decode_body;
use crate::{
    BackendTransport, ClientError, ClientOperation, ClientOperationHooks, HttpRequest,
    NoopClientHooks, SessionDetail, SessionSummary,
};

pub const SESSIONS_PATH: &str = "/api/v1/chat/sessions";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DegradePolicy {
    #[default]
    ReturnEmpty,
    Propagate,
}

/// How [`SessionCatalog::list`] treats failures. `get` and `delete` always propagate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CatalogPolicy {
    pub on_unauthorized: DegradePolicy,
    pub on_failure: DegradePolicy,
}

impl CatalogPolicy {
    pub fn strict() -> Self {
        Self {
            on_unauthorized: DegradePolicy::Propagate,
            on_failure: DegradePolicy::Propagate,
        }
    }

    pub fn with_on_unauthorized(mut self, policy: DegradePolicy) -> Self {
        self.on_unauthorized = policy;
        self
    }

    pub fn with_on_failure(mut self, policy: DegradePolicy) -> Self {
        self.on_failure = policy;
        self
    }

    fn for_error(&self, error: &ClientError) -> DegradePolicy {
        if error.is_unauthorized() {
            self.on_unauthorized
        } else {
            self.on_failure
        }
    }
}

#[derive(Clone)]
pub struct SessionCatalog {
    transport: Arc<dyn BackendTransport>,
    auth: AuthHeaderResolver,
    hooks: Arc<dyn ClientOperationHooks>,
    policy: CatalogPolicy,
}

impl SessionCatalog {
    pub fn new(transport: Arc<dyn BackendTransport>, auth: AuthHeaderResolver) -> Self {
        Self {
            transport,
            auth,
            hooks: Arc::new(NoopClientHooks),
            policy: CatalogPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: CatalogPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_hooks(mut self, hooks: Arc<dyn ClientOperationHooks>) -> Self {
        self.hooks = hooks;
        self
    }

    pub fn policy(&self) -> CatalogPolicy {
        self.policy
    }

    /// Sessions in server order (most recent first). Fresh on every call.
    pub async fn list(&self) -> Result<Vec<SessionSummary>, ClientError> {
        let request = HttpRequest::get(SESSIONS_PATH).with_headers(self.auth.resolve_headers().await);

        let result = execute_call(
            self.transport.as_ref(),
            self.hooks.as_ref(),
            ClientOperation::ListSessions,
            request,
            None,
            |response| decode_body::<Vec<SessionSummary>>(response, "session list"),
        )
        .await;

        match result {
            Ok(sessions) => Ok(sessions),
            Err(error) => match self.policy.for_error(&error) {
                DegradePolicy::ReturnEmpty => {
                    self.hooks
                        .on_failure_degraded(ClientOperation::ListSessions, &error);
                    Ok(Vec::new())
                }
                DegradePolicy::Propagate => Err(error),
            },
        }
    }

    pub async fn get(&self, session_id: &SessionId) -> Result<SessionDetail, ClientError> {
        let path = session_path(session_id)?;
        let request = HttpRequest::get(path).with_headers(self.auth.resolve_headers().await);

        execute_call(
            self.transport.as_ref(),
            self.hooks.as_ref(),
            ClientOperation::GetSession,
            request,
            None,
            |response| decode_body::<SessionDetail>(response, "session"),
        )
        .await
    }

    pub async fn delete(&self, session_id: &SessionId) -> Result<(), ClientError> {
        let path = session_path(session_id)?;
        let request = HttpRequest::delete(path).with_headers(self.auth.resolve_headers().await);

        execute_call(
            self.transport.as_ref(),
            self.hooks.as_ref(),
            ClientOperation::DeleteSession,
            request,
            None,
            |_| Ok(()),
        )
        .await
    }
}

fn session_path(session_id: &SessionId) -> Result<String, ClientError> {
    let id = session_id.as_str().trim();
    if id.is_empty() {
        return Err(ClientError::validation("session id must not be empty"));
    }

    if id.contains(['/', '?', '#']) {
        return Err(ClientError::validation(format!(
            "session id contains reserved characters: {id}"
        )));
    }

    Ok(format!("{SESSIONS_PATH}/{id}"))
}
