//! Client configuration: backend location, deadlines, credential key, catalog policy.

use std::time::Duration;

use nauth::DEFAULT_CREDENTIAL_KEY;
use nclient::{CatalogPolicy, ClientError, DEFAULT_BASE_URL, DEFAULT_CHAT_TIMEOUT};

pub const BASE_URL_ENV: &str = "NYAYA_API_BASE_URL";
pub const CHAT_TIMEOUT_ENV: &str = "NYAYA_CHAT_TIMEOUT_SECS";
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    /// Deadline for the chat endpoint only.
    pub chat_timeout: Duration,
    /// Applied by the HTTP client to every other call.
    pub request_timeout: Duration,
    pub credential_key: String,
    pub catalog_policy: CatalogPolicy,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            chat_timeout: DEFAULT_CHAT_TIMEOUT,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            credential_key: DEFAULT_CREDENTIAL_KEY.to_string(),
            catalog_policy: CatalogPolicy::default(),
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::default().with_base_url(base_url)
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim().trim_end_matches('/').to_string();
        self
    }

    pub fn with_chat_timeout(mut self, timeout: Duration) -> Self {
        self.chat_timeout = timeout;
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_credential_key(mut self, key: impl Into<String>) -> Self {
        self.credential_key = key.into();
        self
    }

    pub fn with_catalog_policy(mut self, policy: CatalogPolicy) -> Self {
        self.catalog_policy = policy;
        self
    }

    /// Defaults overridden by `NYAYA_API_BASE_URL` and `NYAYA_CHAT_TIMEOUT_SECS` when set.
    pub fn from_env() -> Result<Self, ClientError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ClientError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(base_url) = lookup(BASE_URL_ENV).filter(|value| !value.trim().is_empty()) {
            config = config.with_base_url(base_url);
        }

        if let Some(raw) = lookup(CHAT_TIMEOUT_ENV).filter(|value| !value.trim().is_empty()) {
            let seconds = raw.trim().parse::<u64>().map_err(|_| {
                ClientError::validation(format!(
                    "{CHAT_TIMEOUT_ENV} must be a whole number of seconds, got '{raw}'"
                ))
            })?;
            config = config.with_chat_timeout(Duration::from_secs(seconds));
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ClientError> {
        if self.base_url.trim().is_empty() {
            return Err(ClientError::validation("base_url must not be empty"));
        }

        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(ClientError::validation(format!(
                "base_url must be an http(s) URL, got '{}'",
                self.base_url
            )));
        }

        if self.chat_timeout.is_zero() {
            return Err(ClientError::validation("chat_timeout must be greater than zero"));
        }

        if self.credential_key.trim().is_empty() {
            return Err(ClientError::validation("credential_key must not be empty"));
        }

        Ok(())
    }
}
