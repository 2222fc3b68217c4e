//! The persisted identity record.

use serde::{Deserialize, Serialize};

use crate::SecretString;

/// Identity captured at login or registration; replaced wholesale, never patched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    pub token: Option<SecretString>,
    pub email: String,
    pub name: Option<String>,
}

impl Credential {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            token: None,
            email: email.into(),
            name: None,
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(SecretString::new(token));
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Returns the token only when one is present and non-blank.
    pub fn bearer_token(&self) -> Option<&str> {
        self.token
            .as_ref()
            .filter(|token| !token.is_empty())
            .map(SecretString::expose)
    }

    pub fn is_authenticated(&self) -> bool {
        self.bearer_token().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bearer_token_ignores_blank_tokens() {
        let blank = Credential::new("a@b.in").with_token("  ");
        assert_eq!(blank.bearer_token(), None);
        assert!(!blank.is_authenticated());

        let present = Credential::new("a@b.in").with_token("tok-1");
        assert_eq!(present.bearer_token(), Some("tok-1"));
    }

    #[test]
    fn credential_serializes_with_nullable_fields() {
        let credential = Credential::new("a@b.in").with_token("tok-1");
        let json = serde_json::to_value(&credential).expect("serialize");

        assert_eq!(json["token"], "tok-1");
        assert_eq!(json["email"], "a@b.in");
        assert!(json["name"].is_null());
    }

    #[test]
    fn debug_output_redacts_token() {
        let credential = Credential::new("a@b.in").with_token("super-secret");
        let rendered = format!("{credential:?}");

        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("[REDACTED]"));
    }
}
