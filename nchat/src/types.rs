//! Conversation log entries and turn results.

use chrono::{SecondsFormat, Utc};
use nclient::{ChatReply, ClientError, SessionMessage, Source};
use ncommon::SessionId;

use crate::{ConfidenceClassifier, ConfidenceResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }

    pub fn from_wire(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "user" => Some(Self::User),
            "assistant" => Some(Self::Assistant),
            _ => None,
        }
    }
}

/// One entry of the conversation log. Never mutated once appended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub id: u64,
    pub role: Role,
    pub content: String,
    pub sources: Vec<Source>,
    pub is_fallback: bool,
    pub latency_ms: Option<u64>,
    /// RFC 3339, UTC.
    pub timestamp: String,
}

impl Message {
    pub fn user(id: u64, content: impl Into<String>) -> Self {
        Self {
            id,
            role: Role::User,
            content: content.into(),
            sources: Vec::new(),
            is_fallback: false,
            latency_ms: None,
            timestamp: now_timestamp(),
        }
    }

    pub fn assistant(id: u64, reply: ChatReply) -> Self {
        Self {
            id,
            role: Role::Assistant,
            content: reply.answer,
            sources: reply.sources,
            is_fallback: reply.is_fallback,
            latency_ms: reply.latency_ms,
            timestamp: now_timestamp(),
        }
    }

    /// Synthetic assistant entry used when a turn could not produce an answer.
    pub fn fallback(id: u64, content: impl Into<String>) -> Self {
        Self {
            id,
            role: Role::Assistant,
            content: content.into(),
            sources: Vec::new(),
            is_fallback: true,
            latency_ms: None,
            timestamp: now_timestamp(),
        }
    }

    pub(crate) fn from_history(id: u64, message: SessionMessage) -> Option<Self> {
        let role = Role::from_wire(&message.role)?;
        let timestamp = message
            .created_at
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(now_timestamp);

        Some(Self {
            id,
            role,
            content: message.content,
            sources: message.sources,
            is_fallback: message.is_fallback,
            latency_ms: message.latency_ms,
            timestamp,
        })
    }

    /// `None` for user messages.
    pub fn confidence(&self) -> Option<ConfidenceResult> {
        match self.role {
            Role::User => None,
            Role::Assistant => Some(ConfidenceClassifier::classify(
                self.is_fallback,
                self.sources.len(),
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    EmptyQuery,
    Busy,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnOutcome {
    /// Nothing was appended and no request was made.
    Rejected(RejectReason),
    Answered(Message),
    /// The appended fallback message and the error behind it.
    Failed { message: Message, error: ClientError },
    /// The conversation was reset while the turn was in flight; its result was discarded.
    Superseded,
}

impl TurnOutcome {
    pub fn message(&self) -> Option<&Message> {
        match self {
            Self::Answered(message) | Self::Failed { message, .. } => Some(message),
            Self::Rejected(_) | Self::Superseded => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ChatState {
    pub session_id: Option<SessionId>,
    pub messages: Vec<Message>,
    pub pending: bool,
}

pub(crate) fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}
