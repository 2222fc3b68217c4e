//! Wiring helpers that assemble a ready-to-use client over one credential store.

use std::sync::Arc;

use nauth::{AuthHeaderResolver, CredentialHooks, CredentialStore, NoopCredentialHooks, SecretStore};
use nchat::{ChatSession, ChatSessionHooks, NoopChatHooks};
use nclient::{
    AuthClient, BackendTransport, ClientError, ClientOperationHooks, HealthProbe,
    NoopClientHooks, RequestOrchestrator, ReqwestTransport, SessionCatalog, SessionDetail,
};
use ncommon::SessionId;
use nobserve::{
    MetricsObservabilityHooks, SafeChatHooks, SafeClientHooks, SafeCredentialHooks,
    TracingObservabilityHooks,
};
use reqwest::Client;

use crate::ClientConfig;

#[derive(Clone)]
pub struct ClientHooks {
    pub credential: Arc<dyn CredentialHooks>,
    pub client: Arc<dyn ClientOperationHooks>,
    pub chat: Arc<dyn ChatSessionHooks>,
}

impl ClientHooks {
    pub fn noop() -> Self {
        Self {
            credential: Arc::new(NoopCredentialHooks),
            client: Arc::new(NoopClientHooks),
            chat: Arc::new(NoopChatHooks),
        }
    }

    pub fn tracing() -> Self {
        Self {
            credential: Arc::new(SafeCredentialHooks::new(TracingObservabilityHooks)),
            client: Arc::new(SafeClientHooks::new(TracingObservabilityHooks)),
            chat: Arc::new(SafeChatHooks::new(TracingObservabilityHooks)),
        }
    }

    pub fn metrics() -> Self {
        Self {
            credential: Arc::new(SafeCredentialHooks::new(MetricsObservabilityHooks)),
            client: Arc::new(SafeClientHooks::new(MetricsObservabilityHooks)),
            chat: Arc::new(SafeChatHooks::new(MetricsObservabilityHooks)),
        }
    }
}

impl Default for ClientHooks {
    fn default() -> Self {
        Self::noop()
    }
}

/// Every component shares the same credential store and transport.
#[derive(Clone)]
pub struct ClientBundle {
    pub credentials: CredentialStore,
    pub orchestrator: Arc<RequestOrchestrator>,
    pub catalog: SessionCatalog,
    pub auth: AuthClient,
    pub health: HealthProbe,
    chat_hooks: Arc<dyn ChatSessionHooks>,
}

impl ClientBundle {
    /// A fresh conversation with no server session bound yet.
    pub fn chat_session(&self) -> ChatSession {
        ChatSession::new(self.orchestrator.clone()).with_hooks(Arc::clone(&self.chat_hooks))
    }

    pub fn resume_session(&self, detail: SessionDetail) -> ChatSession {
        ChatSession::resume(self.orchestrator.clone(), detail)
            .with_hooks(Arc::clone(&self.chat_hooks))
    }

    /// Loads a stored conversation from the catalog and continues it.
    pub async fn open_session(&self, session_id: &SessionId) -> Result<ChatSession, ClientError> {
        let detail = self.catalog.get(session_id).await?;
        Ok(self.resume_session(detail))
    }
}

pub fn build_client(
    config: &ClientConfig,
    secrets: Arc<dyn SecretStore>,
) -> Result<ClientBundle, ClientError> {
    build_client_with(config, secrets, ClientHooks::default())
}

pub fn build_client_with(
    config: &ClientConfig,
    secrets: Arc<dyn SecretStore>,
    hooks: ClientHooks,
) -> Result<ClientBundle, ClientError> {
    config.validate()?;

    let http = Client::builder()
        .build()
        .map_err(|err| ClientError::transport(err.to_string()))?;
    let transport = ReqwestTransport::new(http)
        .with_base_url(config.base_url.clone())
        .with_request_timeout(config.request_timeout);

    Ok(build_client_with_transport(
        config,
        secrets,
        Arc::new(transport),
        hooks,
    ))
}

pub fn build_client_with_transport(
    config: &ClientConfig,
    secrets: Arc<dyn SecretStore>,
    transport: Arc<dyn BackendTransport>,
    hooks: ClientHooks,
) -> ClientBundle {
    let credentials = CredentialStore::new(secrets)
        .with_key(config.credential_key.clone())
        .with_hooks(hooks.credential);
    let resolver = AuthHeaderResolver::new(credentials.clone());

    let orchestrator = RequestOrchestrator::new(Arc::clone(&transport), resolver.clone())
        .with_timeout(config.chat_timeout)
        .with_hooks(Arc::clone(&hooks.client));
    let catalog = SessionCatalog::new(Arc::clone(&transport), resolver)
        .with_policy(config.catalog_policy)
        .with_hooks(Arc::clone(&hooks.client));
    let auth = AuthClient::new(Arc::clone(&transport), credentials.clone())
        .with_hooks(Arc::clone(&hooks.client));
    let health = HealthProbe::new(transport).with_hooks(hooks.client);

    ClientBundle {
        credentials,
        orchestrator: Arc::new(orchestrator),
        catalog,
        auth,
        health,
        chat_hooks: hooks.chat,
    }
}
