//! Unauthenticated backend liveness probe.

use std::sync::Arc;

use crate::call::execute_call;
use crate::wire::decode_body;
use crate::{
    BackendTransport, ClientError, ClientOperation, ClientOperationHooks, HealthStatus,
    HttpRequest, NoopClientHooks,
};

pub const HEALTH_PATH: &str = "/health";

#[derive(Clone)]
pub struct HealthProbe {
    transport: Arc<dyn BackendTransport>,
    hooks: Arc<dyn ClientOperationHooks>,
}

impl HealthProbe {
    pub fn new(transport: Arc<dyn BackendTransport>) -> Self {
        Self {
            transport,
            hooks: Arc::new(NoopClientHooks),
        }
    }

    pub fn with_hooks(mut self, hooks: Arc<dyn ClientOperationHooks>) -> Self {
        self.hooks = hooks;
        self
    }

    pub async fn check(&self) -> Result<HealthStatus, ClientError> {
        execute_call(
            self.transport.as_ref(),
            self.hooks.as_ref(),
            ClientOperation::Health,
            HttpRequest::get(HEALTH_PATH),
            None,
            |response| decode_body::<HealthStatus>(response, "health"),
        )
        .await
    }

    pub async fn is_healthy(&self) -> bool {
        self.check()
            .await
            .map(|status| status.is_healthy())
            .unwrap_or(false)
    }
}
