use std::panic::{AssertUnwindSafe, catch_unwind};
use std::time::Duration;

use nauth::{CredentialHooks, StorageError};
use nchat::{ChatSessionHooks, ConfidenceResult, RejectReason};
use nclient::{ClientError, ClientOperation, ClientOperationHooks};
use ncommon::SessionId;

pub struct SafeCredentialHooks<H> {
    inner: H,
}

impl<H> SafeCredentialHooks<H> {
    pub fn new(inner: H) -> Self {
        Self { inner }
    }
}

impl<H> CredentialHooks for SafeCredentialHooks<H>
where
    H: CredentialHooks,
{
    fn on_credential_saved(&self, email: &str) {
        let _ = catch_unwind(AssertUnwindSafe(|| self.inner.on_credential_saved(email)));
    }

    fn on_credential_cleared(&self) {
        let _ = catch_unwind(AssertUnwindSafe(|| self.inner.on_credential_cleared()));
    }

    fn on_corrupt_record(&self, key: &str, error: &StorageError) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner.on_corrupt_record(key, error)
        }));
    }

    fn on_storage_degraded(&self, operation: &str, error: &StorageError) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner.on_storage_degraded(operation, error)
        }));
    }
}

pub struct SafeClientHooks<H> {
    inner: H,
}

impl<H> SafeClientHooks<H> {
    pub fn new(inner: H) -> Self {
        Self { inner }
    }
}

impl<H> ClientOperationHooks for SafeClientHooks<H>
where
    H: ClientOperationHooks,
{
    fn on_request_start(&self, operation: ClientOperation) {
        let _ = catch_unwind(AssertUnwindSafe(|| self.inner.on_request_start(operation)));
    }

    fn on_request_success(&self, operation: ClientOperation, status: u16, elapsed: Duration) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner.on_request_success(operation, status, elapsed)
        }));
    }

    fn on_request_failure(&self, operation: ClientOperation, error: &ClientError, elapsed: Duration) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner.on_request_failure(operation, error, elapsed)
        }));
    }

    fn on_failure_degraded(&self, operation: ClientOperation, error: &ClientError) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner.on_failure_degraded(operation, error)
        }));
    }
}

pub struct SafeChatHooks<H> {
    inner: H,
}

impl<H> SafeChatHooks<H> {
    pub fn new(inner: H) -> Self {
        Self { inner }
    }
}

impl<H> ChatSessionHooks for SafeChatHooks<H>
where
    H: ChatSessionHooks,
{
    fn on_turn_start(&self, session_id: Option<&SessionId>) {
        let _ = catch_unwind(AssertUnwindSafe(|| self.inner.on_turn_start(session_id)));
    }

    fn on_session_bound(&self, session_id: &SessionId) {
        let _ = catch_unwind(AssertUnwindSafe(|| self.inner.on_session_bound(session_id)));
    }

    fn on_turn_complete(
        &self,
        session_id: Option<&SessionId>,
        confidence: ConfidenceResult,
        backend_latency_ms: Option<u64>,
        elapsed: Duration,
    ) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner
                .on_turn_complete(session_id, confidence, backend_latency_ms, elapsed)
        }));
    }

    fn on_turn_failed(&self, error: &ClientError, elapsed: Duration) {
        let _ = catch_unwind(AssertUnwindSafe(|| self.inner.on_turn_failed(error, elapsed)));
    }

    fn on_turn_rejected(&self, reason: RejectReason) {
        let _ = catch_unwind(AssertUnwindSafe(|| self.inner.on_turn_rejected(reason)));
    }
}
