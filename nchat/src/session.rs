//! The turn-taking state machine: `Idle -> Sending -> Idle`.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use futures_util::future::{AbortHandle, Abortable, Aborted};
use nclient::{ChatApi, ChatReply, ClientError, SessionDetail};
use ncommon::SessionId;

use crate::{
    ChatSessionHooks, ChatState, ConfidenceClassifier, Message, NoopChatHooks, RejectReason,
    TurnOutcome,
};

pub const STOPPED_MESSAGE: &str = "Response generation was stopped.";

const RETRY_HINT: &str = "Please try again.";

/// Wraps a failure in the assistant's apology. A message that already ends
/// with the retry hint does not get it twice.
pub fn apology_message(error: &ClientError) -> String {
    let detail = error.message.trim();
    let detail = detail
        .strip_suffix(RETRY_HINT)
        .unwrap_or(detail)
        .trim_end()
        .trim_end_matches('.');
    format!("I apologize, but I encountered an error: {detail}. {RETRY_HINT}")
}

#[derive(Default)]
struct SessionState {
    session_id: Option<SessionId>,
    messages: Vec<Message>,
    pending: bool,
    next_id: u64,
    // Bumped by `reset`; a turn that started in an older epoch may not touch the log.
    epoch: u64,
    in_flight: Option<AbortHandle>,
}

impl SessionState {
    fn allocate_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    fn settle(&mut self) {
        self.pending = false;
        self.in_flight = None;
    }
}

/// One conversation with the backend.
///
/// At most one turn is in flight at a time. Share it behind an `Arc` to call
/// [`cancel`](Self::cancel) or [`reset`](Self::reset) while [`submit`](Self::submit) is pending.
pub struct ChatSession {
    api: Arc<dyn ChatApi>,
    hooks: Arc<dyn ChatSessionHooks>,
    state: Mutex<SessionState>,
}

impl ChatSession {
    pub fn new(api: Arc<dyn ChatApi>) -> Self {
        Self {
            api,
            hooks: Arc::new(NoopChatHooks),
            state: Mutex::new(SessionState::default()),
        }
    }

    /// Continues a stored conversation. History entries get fresh local ids in server order.
    pub fn resume(api: Arc<dyn ChatApi>, detail: SessionDetail) -> Self {
        let session_id = Some(detail.session_id()).filter(|id| !id.is_blank());
        let mut state = SessionState {
            session_id,
            ..SessionState::default()
        };

        for entry in detail.messages {
            let id = state.next_id + 1;
            if let Some(message) = Message::from_history(id, entry) {
                state.next_id = id;
                state.messages.push(message);
            }
        }

        Self {
            api,
            hooks: Arc::new(NoopChatHooks),
            state: Mutex::new(state),
        }
    }

    pub fn with_hooks(mut self, hooks: Arc<dyn ChatSessionHooks>) -> Self {
        self.hooks = hooks;
        self
    }

    pub async fn submit(&self, query: &str) -> TurnOutcome {
        let query = query.trim();
        if query.is_empty() {
            return self.reject(RejectReason::EmptyQuery);
        }

        let (session_id, epoch, handle, registration) = {
            let mut state = self.lock_state();
            if state.pending {
                drop(state);
                return self.reject(RejectReason::Busy);
            }

            let id = state.allocate_id();
            state.messages.push(Message::user(id, query));
            state.pending = true;
            let (handle, registration) = AbortHandle::new_pair();
            state.in_flight = Some(handle.clone());
            (state.session_id.clone(), state.epoch, handle, registration)
        };
        let guard = PendingGuard {
            state: &self.state,
            epoch,
            armed: true,
        };

        self.hooks.on_turn_start(session_id.as_ref());
        let started = Instant::now();
        let result = Abortable::new(
            self.api.send_chat_message(query, session_id.as_ref()),
            registration,
        )
        .await;
        let elapsed = started.elapsed();
        guard.disarm();

        let mut state = self.lock_state();
        if state.epoch != epoch {
            return TurnOutcome::Superseded;
        }
        state.settle();

        // `cancel` aborts under this lock, so once it has reported success the turn is stopped
        // even if the reply landed first.
        let result = if handle.is_aborted() { Err(Aborted) } else { result };
        match result {
            Ok(Ok(reply)) => self.settle_answer(state, reply, elapsed),
            Ok(Err(error)) => {
                let content = apology_message(&error);
                self.settle_failure(state, error, content, elapsed)
            }
            Err(Aborted) => {
                self.settle_failure(state, ClientError::cancelled(), STOPPED_MESSAGE, elapsed)
            }
        }
    }

    /// Stops the in-flight turn, if any. Returns `true` only when the turn will
    /// settle as cancelled with a fallback message.
    pub fn cancel(&self) -> bool {
        let state = self.lock_state();
        match &state.in_flight {
            Some(handle) => {
                handle.abort();
                true
            }
            None => false,
        }
    }

    /// Starts a new, unrelated conversation. An in-flight turn is abandoned.
    pub fn reset(&self) {
        let mut state = self.lock_state();
        if let Some(handle) = state.in_flight.take() {
            handle.abort();
        }

        state.epoch += 1;
        state.pending = false;
        state.session_id = None;
        state.messages.clear();
    }

    pub fn session_id(&self) -> Option<SessionId> {
        self.lock_state().session_id.clone()
    }

    pub fn messages(&self) -> Vec<Message> {
        self.lock_state().messages.clone()
    }

    pub fn is_pending(&self) -> bool {
        self.lock_state().pending
    }

    pub fn snapshot(&self) -> ChatState {
        let state = self.lock_state();
        ChatState {
            session_id: state.session_id.clone(),
            messages: state.messages.clone(),
            pending: state.pending,
        }
    }

    fn settle_answer(
        &self,
        mut state: MutexGuard<'_, SessionState>,
        reply: ChatReply,
        elapsed: Duration,
    ) -> TurnOutcome {
        let mut bound = None;
        if state.session_id.is_none()
            && let Some(id) = reply.session_id()
        {
            state.session_id = Some(id.clone());
            bound = Some(id);
        }

        let id = state.allocate_id();
        let message = Message::assistant(id, reply);
        state.messages.push(message.clone());
        let session_id = state.session_id.clone();
        drop(state);

        if let Some(id) = &bound {
            self.hooks.on_session_bound(id);
        }
        let confidence = ConfidenceClassifier::classify(message.is_fallback, message.sources.len());
        self.hooks
            .on_turn_complete(session_id.as_ref(), confidence, message.latency_ms, elapsed);

        TurnOutcome::Answered(message)
    }

    fn settle_failure(
        &self,
        mut state: MutexGuard<'_, SessionState>,
        error: ClientError,
        content: impl Into<String>,
        elapsed: Duration,
    ) -> TurnOutcome {
        let id = state.allocate_id();
        let message = Message::fallback(id, content);
        state.messages.push(message.clone());
        drop(state);

        self.hooks.on_turn_failed(&error, elapsed);
        TurnOutcome::Failed { message, error }
    }

    fn reject(&self, reason: RejectReason) -> TurnOutcome {
        self.hooks.on_turn_rejected(reason);
        TurnOutcome::Rejected(reason)
    }

    fn lock_state(&self) -> MutexGuard<'_, SessionState> {
        // Updates never panic halfway, so a poisoned lock still holds a consistent log.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Returns the session to `Idle` if `submit` is dropped before it settles.
struct PendingGuard<'a> {
    state: &'a Mutex<SessionState>,
    epoch: u64,
    armed: bool,
}

impl PendingGuard<'_> {
    fn disarm(mut self) {
        self.armed = false;
    }
}

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }

        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        if state.epoch == self.epoch {
            state.settle();
        }
    }
}
