//! Shared utilities and strongly-typed common values for workspace crates.
//!
//! ```rust
//! use ncommon::{HeaderMap, SessionId};
//!
//! let session = SessionId::from("abc123");
//! let mut headers = HeaderMap::new();
//! headers.insert("Content-Type".to_string(), "application/json".to_string());
//!
//! assert_eq!(session.as_str(), "abc123");
//! assert_eq!(headers.len(), 1);
//! ```

pub mod future {
    //! Shared async future aliases.
    //!
    //! ```rust
    //! use ncommon::BoxFuture;
    //!
    //! fn str_len<'a>(value: &'a str) -> BoxFuture<'a, usize> {
    //!     Box::pin(async move { value.len() })
    //! }
    //!
    //! let _future = str_len("hello");
    //! ```

    use std::future::Future;
    use std::pin::Pin;

    pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;
}

pub mod context {
    //! Server-side conversation identifiers.
    //!
    //! ```rust
    //! use ncommon::SessionId;
    //!
    //! let session = SessionId::new("session-42");
    //! assert_eq!(session.to_string(), "session-42");
    //! assert!(!session.is_blank());
    //! ```

    use std::fmt::{Display, Formatter};

    /// Opaque identifier the backend assigns to a conversation.
    #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
    pub struct SessionId(String);

    impl SessionId {
        pub fn new(value: impl Into<String>) -> Self {
            Self(value.into())
        }

        pub fn as_str(&self) -> &str {
            self.0.as_str()
        }

        pub fn is_blank(&self) -> bool {
            self.0.trim().is_empty()
        }

        pub fn into_inner(self) -> String {
            self.0
        }
    }

    impl Display for SessionId {
        fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
            f.write_str(&self.0)
        }
    }

    impl From<String> for SessionId {
        fn from(value: String) -> Self {
            Self(value)
        }
    }

    impl From<&str> for SessionId {
        fn from(value: &str) -> Self {
            Self(value.to_string())
        }
    }
}

pub mod headers {
    //! Header name/value maps exchanged between the auth and transport layers.
    //!
    //! ```rust
    //! use ncommon::{HeaderMap, merge_headers};
    //!
    //! let mut base = HeaderMap::new();
    //! base.insert("Content-Type".to_string(), "application/json".to_string());
    //!
    //! let mut auth = HeaderMap::new();
    //! auth.insert("Authorization".to_string(), "Bearer t".to_string());
    //!
    //! let merged = merge_headers(base, auth);
    //! assert_eq!(merged.len(), 2);
    //! ```

    use std::collections::BTreeMap;

    pub const AUTHORIZATION: &str = "Authorization";
    pub const CONTENT_TYPE: &str = "Content-Type";
    pub const JSON_CONTENT_TYPE: &str = "application/json";

    pub type HeaderMap = BTreeMap<String, String>;

    /// Merges `overlay` into `base`; entries in `overlay` win on name collisions.
    pub fn merge_headers(mut base: HeaderMap, overlay: HeaderMap) -> HeaderMap {
        base.extend(overlay);
        base
    }

    pub fn json_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE.to_string(), JSON_CONTENT_TYPE.to_string());
        headers
    }
}

pub use context::SessionId;
pub use future::BoxFuture;
pub use headers::{
    AUTHORIZATION, CONTENT_TYPE, HeaderMap, JSON_CONTENT_TYPE, json_headers, merge_headers,
};

#[cfg(test)]
mod tests {
    use super::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, SessionId, json_headers, merge_headers};

    #[test]
    fn session_id_round_trips_strings() {
        let session = SessionId::new("abc123");

        assert_eq!(session.as_str(), "abc123");
        assert_eq!(session.to_string(), "abc123");
        assert_eq!(SessionId::from("abc123".to_string()), session);
        assert_eq!(session.into_inner(), "abc123");
    }

    #[test]
    fn blank_session_ids_are_detected() {
        assert!(SessionId::new("   ").is_blank());
        assert!(SessionId::new("").is_blank());
        assert!(!SessionId::new("s-1").is_blank());
    }

    #[test]
    fn merge_headers_prefers_overlay_values() {
        let mut overlay = HeaderMap::new();
        overlay.insert(CONTENT_TYPE.to_string(), "text/plain".to_string());
        overlay.insert(AUTHORIZATION.to_string(), "Bearer abc".to_string());

        let merged = merge_headers(json_headers(), overlay);
        assert_eq!(merged.get(CONTENT_TYPE).map(String::as_str), Some("text/plain"));
        assert_eq!(
            merged.get(AUTHORIZATION).map(String::as_str),
            Some("Bearer abc")
        );
    }
}
