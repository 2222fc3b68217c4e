//! Operational hook contracts for backend calls.
//!
//! ```rust
//! use nclient::{ClientOperation, ClientOperationHooks, NoopClientHooks};
//!
//! fn assert_hooks_trait(_hooks: &dyn ClientOperationHooks) {}
//!
//! assert_hooks_trait(&NoopClientHooks);
//! assert_eq!(ClientOperation::ListSessions.to_string(), "list_sessions");
//! ```

use std::fmt::{Display, Formatter};
use std::time::Duration;

use crate::ClientError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClientOperation {
    Chat,
    ListSessions,
    GetSession,
    DeleteSession,
    Register,
    Login,
    Health,
}

impl ClientOperation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Chat => "chat",
            Self::ListSessions => "list_sessions",
            Self::GetSession => "get_session",
            Self::DeleteSession => "delete_session",
            Self::Register => "register",
            Self::Login => "login",
            Self::Health => "health",
        }
    }
}

impl Display for ClientOperation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

pub trait ClientOperationHooks: Send + Sync {
    fn on_request_start(&self, _operation: ClientOperation) {}

    fn on_request_success(&self, _operation: ClientOperation, _status: u16, _elapsed: Duration) {}

    fn on_request_failure(
        &self,
        _operation: ClientOperation,
        _error: &ClientError,
        _elapsed: Duration,
    ) {
    }

    /// A failure was absorbed by policy and the caller received a fallback value.
    fn on_failure_degraded(&self, _operation: ClientOperation, _error: &ClientError) {}
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoopClientHooks;

impl ClientOperationHooks for NoopClientHooks {}
