//! Client error kinds and error value helpers.
//!
//! ```rust
//! use nclient::{ClientError, TIMEOUT_MESSAGE};
//!
//! let timeout = ClientError::timeout();
//! assert!(timeout.retryable);
//! assert_eq!(timeout.message, TIMEOUT_MESSAGE);
//!
//! let remote = ClientError::remote(404, "Session not found");
//! assert_eq!(remote.status, Some(404));
//! assert!(!remote.is_unauthorized());
//! ```

use std::error::Error;
use std::fmt::{Display, Formatter};

use nauth::StorageError;

pub const TIMEOUT_MESSAGE: &str = "Request timed out. Please try again.";
pub const CANCELLED_MESSAGE: &str = "Request was cancelled.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientErrorKind {
    Validation,
    Timeout,
    Remote,
    Contract,
    Transport,
    Storage,
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientError {
    pub kind: ClientErrorKind,
    pub message: String,
    pub status: Option<u16>,
    pub retryable: bool,
}

impl ClientError {
    pub fn new(kind: ClientErrorKind, message: impl Into<String>, retryable: bool) -> Self {
        Self {
            kind,
            message: message.into(),
            status: None,
            retryable,
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ClientErrorKind::Validation, message, false)
    }

    pub fn timeout() -> Self {
        Self::new(ClientErrorKind::Timeout, TIMEOUT_MESSAGE, true)
    }

    pub fn remote(status: u16, message: impl Into<String>) -> Self {
        let mut error = Self::new(ClientErrorKind::Remote, message, status >= 500);
        error.status = Some(status);
        error
    }

    pub fn contract(message: impl Into<String>) -> Self {
        Self::new(ClientErrorKind::Contract, message, false)
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(ClientErrorKind::Transport, message, true)
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::new(ClientErrorKind::Storage, message, false)
    }

    pub fn cancelled() -> Self {
        Self::new(ClientErrorKind::Cancelled, CANCELLED_MESSAGE, true)
    }

    pub fn is_unauthorized(&self) -> bool {
        self.kind == ClientErrorKind::Remote && self.status == Some(401)
    }

    pub fn is_retryable(&self) -> bool {
        self.retryable
    }
}

impl Display for ClientError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.status {
            Some(status) => write!(f, "{:?} [status={}]: {}", self.kind, status, self.message),
            None => write!(f, "{:?}: {}", self.kind, self.message),
        }
    }
}

impl Error for ClientError {}

impl From<StorageError> for ClientError {
    fn from(value: StorageError) -> Self {
        ClientError::storage(value.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn helper_builders_assign_expected_retryability() {
        assert!(ClientError::timeout().is_retryable());
        assert!(ClientError::transport("connection refused").is_retryable());
        assert!(!ClientError::validation("empty").is_retryable());
        assert!(!ClientError::contract("missing answer").is_retryable());
        assert!(ClientError::remote(503, "down").is_retryable());
        assert!(!ClientError::remote(400, "bad").is_retryable());
    }

    #[test]
    fn unauthorized_requires_remote_401() {
        assert!(ClientError::remote(401, "Not authenticated").is_unauthorized());
        assert!(!ClientError::remote(403, "Forbidden").is_unauthorized());
        assert!(!ClientError::transport("401").is_unauthorized());
    }

    #[test]
    fn display_includes_status_when_present() {
        let rendered = ClientError::remote(500, "Server error: 500").to_string();
        assert_eq!(rendered, "Remote [status=500]: Server error: 500");
        assert_eq!(ClientError::timeout().to_string(), format!("Timeout: {TIMEOUT_MESSAGE}"));
    }

    #[test]
    fn storage_errors_convert_to_storage_kind() {
        let error: ClientError = StorageError::unavailable("disk gone").into();
        assert_eq!(error.kind, ClientErrorKind::Storage);
        assert_eq!(error.message, "disk gone");
    }
}
