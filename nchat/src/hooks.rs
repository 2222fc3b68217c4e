//! Observation points for conversation turns.

use std::time::Duration;

use nclient::ClientError;
use ncommon::SessionId;

use crate::{ConfidenceResult, RejectReason};

pub trait ChatSessionHooks: Send + Sync {
    fn on_turn_start(&self, _session_id: Option<&SessionId>) {}

    /// Fires once, when the first server response binds the conversation.
    fn on_session_bound(&self, _session_id: &SessionId) {}

    fn on_turn_complete(
        &self,
        _session_id: Option<&SessionId>,
        _confidence: ConfidenceResult,
        _backend_latency_ms: Option<u64>,
        _elapsed: Duration,
    ) {
    }

    fn on_turn_failed(&self, _error: &ClientError, _elapsed: Duration) {}

    fn on_turn_rejected(&self, _reason: RejectReason) {}
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoopChatHooks;

impl ChatSessionHooks for NoopChatHooks {}
