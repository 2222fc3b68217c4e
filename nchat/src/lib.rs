//! Conversation state for the legal assistant.
//!
//! [`ChatSession`] appends the user's message before the request goes out, binds the
//! server's session id from the first answer, and turns every failure into a
//! fallback-flagged assistant message so the log always ends coherently.
//!
//! ```rust
//! use nchat::{ConfidenceClassifier, ConfidenceLevel};
//!
//! let result = ConfidenceClassifier::classify(false, 1);
//! assert_eq!(result.level, ConfidenceLevel::Medium);
//! assert_eq!(result.score, 60);
//! ```

mod confidence;
mod hooks;
mod session;
mod types;

pub mod prelude {
    pub use crate::{
        ChatSession, ChatSessionHooks, ChatState, ConfidenceClassifier, ConfidenceLevel,
        ConfidenceResult, Message, NoopChatHooks, RejectReason, Role, TurnOutcome,
    };
    pub use ncommon::SessionId;
}

pub use confidence::{
    ConfidenceClassifier, ConfidenceLevel, ConfidenceResult, HIGH_CONFIDENCE, LOW_CONFIDENCE,
    MEDIUM_CONFIDENCE, NO_MATCH,
};
pub use hooks::{ChatSessionHooks, NoopChatHooks};
pub use session::{ChatSession, STOPPED_MESSAGE, apology_message};
pub use types::{ChatState, Message, RejectReason, Role, TurnOutcome};
pub use ncommon::SessionId;
