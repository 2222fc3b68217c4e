//! Backend JSON payloads and contract checks at the network boundary.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDateTime, Utc};
use ncommon::SessionId;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::{ClientError, HttpResponse};

/// A legal citation attached to an answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    pub act: String,
    #[serde(default)]
    pub section: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl Source {
    pub fn new(act: impl Into<String>) -> Self {
        Self {
            act: act.into(),
            section: None,
            title: None,
            content: None,
        }
    }

    pub fn with_section(mut self, section: impl Into<String>) -> Self {
        self.section = Some(section.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct ChatRequestBody<'a> {
    pub query: &'a str,
    pub session_id: Option<&'a str>,
}

/// Successful `/api/v1/chat` body. `answer`, `sources` and `is_fallback` are required.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatReply {
    pub answer: String,
    pub sources: Vec<Source>,
    pub is_fallback: bool,
    #[serde(default)]
    pub latency_ms: Option<u64>,
    #[serde(default)]
    pub session_id: Option<String>,
}

impl ChatReply {
    /// The server-assigned conversation id, ignoring blank values.
    pub fn session_id(&self) -> Option<SessionId> {
        self.session_id
            .as_deref()
            .map(SessionId::from)
            .filter(|id| !id.is_blank())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSummary {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default)]
    pub title: String,
    pub created_at: String,
}

impl SessionSummary {
    pub fn session_id(&self) -> SessionId {
        SessionId::from(self.id.as_str())
    }

    pub fn created_at_utc(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.created_at)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionMessage {
    pub role: String,
    pub content: String,
    #[serde(default)]
    pub sources: Vec<Source>,
    #[serde(default)]
    pub is_fallback: bool,
    #[serde(default)]
    pub latency_ms: Option<u64>,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionDetail {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub messages: Vec<SessionMessage>,
}

impl SessionDetail {
    pub fn session_id(&self) -> SessionId {
        SessionId::from(self.id.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegisterRequest {
    pub full_name: String,
    pub email: String,
    pub password: String,
}

impl RegisterRequest {
    pub fn new(
        full_name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            full_name: full_name.into(),
            email: email.into(),
            password: password.into(),
        }
    }

    pub(crate) fn validate(&self) -> Result<(), ClientError> {
        if self.full_name.trim().is_empty() {
            return Err(ClientError::validation("full_name must not be empty"));
        }

        validate_login_fields(&self.email, &self.password)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct LoginRequestBody<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub(crate) struct LoginResponseBody {
    pub access_token: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    #[serde(default, deserialize_with = "optional_string_or_number")]
    pub id: Option<String>,
    pub email: String,
    #[serde(default)]
    pub full_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(flatten)]
    pub details: BTreeMap<String, Value>,
}

impl HealthStatus {
    pub fn is_healthy(&self) -> bool {
        matches!(self.status.to_ascii_lowercase().as_str(), "healthy" | "ok")
    }
}

pub(crate) fn validate_login_fields(email: &str, password: &str) -> Result<(), ClientError> {
    if email.trim().is_empty() {
        return Err(ClientError::validation("email must not be empty"));
    }

    if password.is_empty() {
        return Err(ClientError::validation("password must not be empty"));
    }

    Ok(())
}

/// Builds the error for a non-success response, preferring the server's `detail` field.
pub(crate) fn remote_error(response: &HttpResponse) -> ClientError {
    let message = extract_error_detail(&response.body)
        .unwrap_or_else(|| format!("Server error: {}", response.status));
    ClientError::remote(response.status, message)
}

pub(crate) fn extract_error_detail(body: &str) -> Option<String> {
    let parsed = serde_json::from_str::<Value>(body).ok()?;
    match parsed.get("detail")? {
        Value::Null => None,
        Value::String(detail) if detail.trim().is_empty() => None,
        Value::String(detail) => Some(detail.clone()),
        other => Some(other.to_string()),
    }
}

pub(crate) fn decode_body<T>(response: &HttpResponse, what: &str) -> Result<T, ClientError>
where
    T: DeserializeOwned,
{
    serde_json::from_str::<T>(&response.body)
        .map_err(|err| ClientError::contract(format!("invalid {what} response: {err}")))
}

pub(crate) fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed.with_timezone(&Utc));
    }

    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(value) => Ok(value),
        Value::Number(value) => Ok(value.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number id, found {other}"
        ))),
    }
}

fn optional_string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(value)) => Ok(Some(value)),
        Some(Value::Number(value)) => Ok(Some(value.to_string())),
        Some(other) => Err(serde::de::Error::custom(format!(
            "expected string or number id, found {other}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ClientErrorKind;

    fn response(status: u16, body: &str) -> HttpResponse {
        HttpResponse::new(status, body)
    }

    #[test]
    fn chat_reply_requires_core_fields() {
        let ok = decode_body::<ChatReply>(
            &response(
                200,
                r#"{"answer":"a","sources":[{"act":"IPC","section":"302"}],"is_fallback":false,"latency_ms":850,"session_id":"abc123"}"#,
            ),
            "chat",
        )
        .expect("full body should decode");
        assert_eq!(ok.sources[0], Source::new("IPC").with_section("302"));
        assert_eq!(ok.session_id(), Some(SessionId::from("abc123")));

        let missing = decode_body::<ChatReply>(
            &response(200, r#"{"sources":[],"is_fallback":false}"#),
            "chat",
        )
        .expect_err("missing answer must fail");
        assert_eq!(missing.kind, ClientErrorKind::Contract);
        assert!(missing.message.contains("answer"));

        let not_json = decode_body::<ChatReply>(&response(200, "<html>"), "chat")
            .expect_err("non-json must fail");
        assert_eq!(not_json.kind, ClientErrorKind::Contract);
    }

    #[test]
    fn blank_session_id_is_treated_as_absent() {
        let reply = ChatReply {
            answer: "a".to_string(),
            sources: Vec::new(),
            is_fallback: false,
            latency_ms: None,
            session_id: Some("  ".to_string()),
        };
        assert_eq!(reply.session_id(), None);
    }

    #[test]
    fn remote_error_prefers_detail_then_status() {
        let with_detail = remote_error(&response(400, r#"{"detail":"Query too long"}"#));
        assert_eq!(with_detail.message, "Query too long");
        assert_eq!(with_detail.status, Some(400));

        let without_detail = remote_error(&response(502, "Bad Gateway"));
        assert_eq!(without_detail.message, "Server error: 502");

        let null_detail = remote_error(&response(500, r#"{"detail":null}"#));
        assert_eq!(null_detail.message, "Server error: 500");

        let structured = remote_error(&response(422, r#"{"detail":[{"msg":"field required"}]}"#));
        assert!(structured.message.contains("field required"));
    }

    #[test]
    fn session_ids_accept_numbers_and_strings() {
        let summaries = decode_body::<Vec<SessionSummary>>(
            &response(
                200,
                r#"[{"id":7,"title":"Bail","created_at":"2024-05-01T10:00:00Z"},{"id":"s-2","title":"Rent","created_at":"2024-05-02T09:30:00.123456"}]"#,
            ),
            "session list",
        )
        .expect("summaries should decode");

        assert_eq!(summaries[0].id, "7");
        assert_eq!(summaries[1].session_id(), SessionId::from("s-2"));
        assert!(summaries[0].created_at_utc().is_some());
        assert!(summaries[1].created_at_utc().is_some());
    }

    #[test]
    fn health_status_accepts_extra_fields() {
        let health = decode_body::<HealthStatus>(
            &response(200, r#"{"status":"healthy","documents":1200}"#),
            "health",
        )
        .expect("health should decode");

        assert!(health.is_healthy());
        assert_eq!(health.details.get("documents"), Some(&Value::from(1200)));
    }

    #[test]
    fn register_request_validates_fields() {
        assert!(RegisterRequest::new("A", "a@b.in", "pw").validate().is_ok());
        assert_eq!(
            RegisterRequest::new(" ", "a@b.in", "pw")
                .validate()
                .expect_err("blank name")
                .kind,
            ClientErrorKind::Validation
        );
        assert!(RegisterRequest::new("A", "", "pw").validate().is_err());
        assert!(RegisterRequest::new("A", "a@b.in", "").validate().is_err());
    }
}
