//! Metrics-based hooks for credential storage, backend requests, and chat turns.
//!
//! ```rust
//! use nobserve::MetricsObservabilityHooks;
//! use nclient::ClientOperationHooks;
//!
//! fn accepts_client_hooks(_hooks: &dyn ClientOperationHooks) {}
//!
//! let hooks = MetricsObservabilityHooks;
//! accepts_client_hooks(&hooks);
//! ```

use std::time::Duration;

use nauth::{CredentialHooks, StorageError};
use nchat::{ChatSessionHooks, ConfidenceResult, RejectReason};
use nclient::{ClientError, ClientOperation, ClientOperationHooks};
use ncommon::SessionId;

#[derive(Debug, Clone, Copy, Default)]
pub struct MetricsObservabilityHooks;

impl CredentialHooks for MetricsObservabilityHooks {
    fn on_corrupt_record(&self, _key: &str, error: &StorageError) {
        metrics::counter!(
            "nyaya_credential_degraded_total",
            "operation" => "load",
            "error_kind" => format!("{:?}", error.kind)
        )
        .increment(1);
    }

    fn on_storage_degraded(&self, operation: &str, error: &StorageError) {
        metrics::counter!(
            "nyaya_credential_degraded_total",
            "operation" => operation.to_string(),
            "error_kind" => format!("{:?}", error.kind)
        )
        .increment(1);
    }
}

impl ClientOperationHooks for MetricsObservabilityHooks {
    fn on_request_start(&self, operation: ClientOperation) {
        metrics::counter!(
            "nyaya_client_request_total",
            "operation" => operation.as_str()
        )
        .increment(1);
    }

    fn on_request_success(&self, operation: ClientOperation, _status: u16, elapsed: Duration) {
        metrics::histogram!(
            "nyaya_client_latency_seconds",
            "operation" => operation.as_str(),
            "outcome" => "success"
        )
        .record(elapsed.as_secs_f64());
    }

    fn on_request_failure(&self, operation: ClientOperation, error: &ClientError, elapsed: Duration) {
        metrics::counter!(
            "nyaya_client_failure_total",
            "operation" => operation.as_str(),
            "error_kind" => format!("{:?}", error.kind)
        )
        .increment(1);
        metrics::histogram!(
            "nyaya_client_latency_seconds",
            "operation" => operation.as_str(),
            "outcome" => "failure"
        )
        .record(elapsed.as_secs_f64());
    }
}

impl ChatSessionHooks for MetricsObservabilityHooks {
    fn on_turn_complete(
        &self,
        _session_id: Option<&SessionId>,
        confidence: ConfidenceResult,
        backend_latency_ms: Option<u64>,
        _elapsed: Duration,
    ) {
        metrics::counter!("nyaya_chat_turn_total", "outcome" => "answered").increment(1);
        metrics::counter!(
            "nyaya_chat_confidence_total",
            "level" => confidence.level.as_str()
        )
        .increment(1);
        if let Some(latency) = backend_latency_ms {
            metrics::histogram!("nyaya_backend_latency_ms").record(latency as f64);
        }
    }

    fn on_turn_failed(&self, error: &ClientError, _elapsed: Duration) {
        metrics::counter!(
            "nyaya_chat_turn_total",
            "outcome" => "failed",
            "error_kind" => format!("{:?}", error.kind)
        )
        .increment(1);
    }

    fn on_turn_rejected(&self, reason: RejectReason) {
        metrics::counter!(
            "nyaya_chat_turn_total",
            "outcome" => "rejected",
            "reason" => format!("{reason:?}")
        )
        .increment(1);
    }
}
