//! Tracing-based hooks for credential storage, backend requests, and chat turns.
//!
//! ```rust
//! use nobserve::TracingObservabilityHooks;
//! use nchat::ChatSessionHooks;
//!
//! fn accepts_chat_hooks(_hooks: &dyn ChatSessionHooks) {}
//!
//! let hooks = TracingObservabilityHooks;
//! accepts_chat_hooks(&hooks);
//! ```

use std::time::Duration;

use nauth::{CredentialHooks, StorageError};
use nchat::{ChatSessionHooks, ConfidenceResult, RejectReason};
use nclient::{ClientError, ClientOperation, ClientOperationHooks};
use ncommon::SessionId;

#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObservabilityHooks;

impl CredentialHooks for TracingObservabilityHooks {
    fn on_credential_saved(&self, _email: &str) {
        tracing::info!(phase = "credential", event = "saved");
    }

    fn on_credential_cleared(&self) {
        tracing::info!(phase = "credential", event = "cleared");
    }

    fn on_corrupt_record(&self, key: &str, error: &StorageError) {
        tracing::warn!(
            phase = "credential",
            event = "corrupt_record",
            key,
            error_kind = ?error.kind,
            error = %error
        );
    }

    fn on_storage_degraded(&self, operation: &str, error: &StorageError) {
        tracing::warn!(
            phase = "credential",
            event = "storage_degraded",
            operation,
            error_kind = ?error.kind,
            error = %error
        );
    }
}

impl ClientOperationHooks for TracingObservabilityHooks {
    fn on_request_start(&self, operation: ClientOperation) {
        tracing::debug!(phase = "client", event = "request_start", operation = %operation);
    }

    fn on_request_success(&self, operation: ClientOperation, status: u16, elapsed: Duration) {
        tracing::info!(
            phase = "client",
            event = "request_success",
            operation = %operation,
            status,
            elapsed_ms = elapsed.as_millis() as u64
        );
    }

    fn on_request_failure(&self, operation: ClientOperation, error: &ClientError, elapsed: Duration) {
        tracing::error!(
            phase = "client",
            event = "request_failure",
            operation = %operation,
            elapsed_ms = elapsed.as_millis() as u64,
            error_kind = ?error.kind,
            status = error.status,
            retryable = error.retryable,
            error = %error
        );
    }

    fn on_failure_degraded(&self, operation: ClientOperation, error: &ClientError) {
        tracing::warn!(
            phase = "client",
            event = "failure_degraded",
            operation = %operation,
            error_kind = ?error.kind,
            status = error.status
        );
    }
}

impl ChatSessionHooks for TracingObservabilityHooks {
    fn on_turn_start(&self, session_id: Option<&SessionId>) {
        tracing::info!(
            phase = "chat",
            event = "turn_start",
            session_id = session_id.map(SessionId::as_str)
        );
    }

    fn on_session_bound(&self, session_id: &SessionId) {
        tracing::info!(phase = "chat", event = "session_bound", session_id = %session_id);
    }

    fn on_turn_complete(
        &self,
        session_id: Option<&SessionId>,
        confidence: ConfidenceResult,
        backend_latency_ms: Option<u64>,
        elapsed: Duration,
    ) {
        tracing::info!(
            phase = "chat",
            event = "turn_complete",
            session_id = session_id.map(SessionId::as_str),
            confidence = %confidence.level,
            score = confidence.score,
            backend_latency_ms,
            elapsed_ms = elapsed.as_millis() as u64
        );
    }

    fn on_turn_failed(&self, error: &ClientError, elapsed: Duration) {
        tracing::warn!(
            phase = "chat",
            event = "turn_failed",
            elapsed_ms = elapsed.as_millis() as u64,
            error_kind = ?error.kind,
            status = error.status,
            error = %error
        );
    }

    fn on_turn_rejected(&self, reason: RejectReason) {
        tracing::debug!(phase = "chat", event = "turn_rejected", reason = ?reason);
    }
}
