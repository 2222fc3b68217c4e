//! Registration, login and logout against the backend auth endpoints.

use std::sync::Arc;

use nauth::{Credential, CredentialStore};
use ncommon::json_headers;

use crate::call::execute_call;
use crate::wire::{LoginRequestBody, LoginResponseBody, decode_body, validate_login_fields};
use crate::{
    BackendTransport, ClientError, ClientOperation, ClientOperationHooks, HttpRequest,
    NoopClientHooks, RegisterRequest, UserRecord,
};

pub const REGISTER_PATH: &str = "/api/v1/auth/register";
pub const LOGIN_PATH: &str = "/api/v1/auth/login";

#[derive(Clone)]
pub struct AuthClient {
    transport: Arc<dyn BackendTransport>,
    credentials: CredentialStore,
    hooks: Arc<dyn ClientOperationHooks>,
}

impl AuthClient {
    pub fn new(transport: Arc<dyn BackendTransport>, credentials: CredentialStore) -> Self {
        Self {
            transport,
            credentials,
            hooks: Arc::new(NoopClientHooks),
        }
    }

    pub fn with_hooks(mut self, hooks: Arc<dyn ClientOperationHooks>) -> Self {
        self.hooks = hooks;
        self
    }

    /// Creates the account and stores a token-less credential carrying the display name.
    pub async fn register(&self, request: RegisterRequest) -> Result<UserRecord, ClientError> {
        request.validate()?;
        let body = serde_json::to_value(&request)
            .map_err(|err| ClientError::validation(format!("failed to encode register request: {err}")))?;

        let user = execute_call(
            self.transport.as_ref(),
            self.hooks.as_ref(),
            ClientOperation::Register,
            HttpRequest::post(REGISTER_PATH)
                .with_headers(json_headers())
                .with_json(body),
            None,
            |response| decode_body::<UserRecord>(response, "register"),
        )
        .await?;

        let name = user
            .full_name
            .clone()
            .unwrap_or_else(|| request.full_name.clone());
        let credential = Credential::new(request.email.trim()).with_name(name);
        self.credentials.save(&credential).await?;

        Ok(user)
    }

    /// Exchanges email/password for a bearer token and replaces the stored credential.
    pub async fn login(&self, email: &str, password: &str) -> Result<Credential, ClientError> {
        validate_login_fields(email, password)?;
        let email = email.trim();
        let body = serde_json::to_value(LoginRequestBody { email, password })
            .map_err(|err| ClientError::validation(format!("failed to encode login request: {err}")))?;

        let login = execute_call(
            self.transport.as_ref(),
            self.hooks.as_ref(),
            ClientOperation::Login,
            HttpRequest::post(LOGIN_PATH)
                .with_headers(json_headers())
                .with_json(body),
            None,
            |response| decode_body::<LoginResponseBody>(response, "login"),
        )
        .await?;

        if login.access_token.trim().is_empty() {
            return Err(ClientError::contract("login response carried an empty access_token"));
        }

        // Keep the display name from registration when the same account logs in.
        let previous_name = match self.credentials.load().await {
            Ok(Some(previous)) if previous.email.eq_ignore_ascii_case(email) => previous.name,
            _ => None,
        };

        let mut credential = Credential::new(email).with_token(login.access_token);
        credential.name = previous_name;
        self.credentials.save(&credential).await?;

        Ok(credential)
    }

    pub async fn logout(&self) -> Result<(), ClientError> {
        self.credentials.clear().await?;
        Ok(())
    }

    pub async fn current_user(&self) -> Result<Option<Credential>, ClientError> {
        Ok(self.credentials.load().await?)
    }
}
