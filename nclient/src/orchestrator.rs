//! Bounded, authenticated chat requests.

use std::sync::Arc;
use std::time::Duration;

use nauth::AuthHeaderResolver;
use ncommon::{BoxFuture, SessionId, json_headers, merge_headers};

use crate::call::execute_call;
use crate::wire::{ChatRequestBody, decode_body};
use crate::{
    BackendTransport, ChatReply, ClientError, ClientOperation, ClientOperationHooks, HttpRequest,
    NoopClientHooks,
};

pub const CHAT_PATH: &str = "/api/v1/chat";
pub const DEFAULT_CHAT_TIMEOUT: Duration = Duration::from_secs(120);

/// Seam between the conversation state machine and the network.
pub trait ChatApi: Send + Sync {
    fn send_chat_message<'a>(
        &'a self,
        query: &'a str,
        session_id: Option<&'a SessionId>,
    ) -> BoxFuture<'a, Result<ChatReply, ClientError>>;
}

#[derive(Clone)]
pub struct RequestOrchestrator {
    transport: Arc<dyn BackendTransport>,
    auth: AuthHeaderResolver,
    hooks: Arc<dyn ClientOperationHooks>,
    timeout: Duration,
}

impl RequestOrchestrator {
    pub fn new(transport: Arc<dyn BackendTransport>, auth: AuthHeaderResolver) -> Self {
        Self {
            transport,
            auth,
            hooks: Arc::new(NoopClientHooks),
            timeout: DEFAULT_CHAT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_hooks(mut self, hooks: Arc<dyn ClientOperationHooks>) -> Self {
        self.hooks = hooks;
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Posts one chat turn. A single attempt: failures are returned, never retried.
    pub async fn send_chat_message(
        &self,
        query: &str,
        session_id: Option<&SessionId>,
    ) -> Result<ChatReply, ClientError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(ClientError::validation("query must not be empty"));
        }

        let body = ChatRequestBody {
            query,
            session_id: session_id.map(SessionId::as_str),
        };
        let body = serde_json::to_value(&body)
            .map_err(|err| ClientError::validation(format!("failed to encode chat request: {err}")))?;

        let headers = merge_headers(json_headers(), self.auth.resolve_headers().await);
        // The deadline race below is authoritative; the transport must not cut in earlier.
        let request = HttpRequest::post(CHAT_PATH)
            .with_headers(headers)
            .with_json(body)
            .with_timeout(self.timeout);

        execute_call(
            self.transport.as_ref(),
            self.hooks.as_ref(),
            ClientOperation::Chat,
            request,
            Some(self.timeout),
            |response| decode_body::<ChatReply>(response, "chat"),
        )
        .await
    }
}

impl ChatApi for RequestOrchestrator {
    fn send_chat_message<'a>(
        &'a self,
        query: &'a str,
        session_id: Option<&'a SessionId>,
    ) -> BoxFuture<'a, Result<ChatReply, ClientError>> {
        Box::pin(RequestOrchestrator::send_chat_message(self, query, session_id))
    }
}
