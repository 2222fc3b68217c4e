//! Tracing- and metrics-backed hooks for credential, request, and chat-turn events.
//!
//! ```rust
//! use nobserve::{MetricsObservabilityHooks, SafeClientHooks, TracingObservabilityHooks};
//!
//! let _client_hooks = SafeClientHooks::new(TracingObservabilityHooks);
//! let _metrics = MetricsObservabilityHooks;
//! ```

mod metrics_hooks;
mod safe_hooks;
mod tracing_hooks;

pub use metrics_hooks::MetricsObservabilityHooks;
pub use safe_hooks::{SafeChatHooks, SafeClientHooks, SafeCredentialHooks};
pub use tracing_hooks::TracingObservabilityHooks;

pub mod prelude {
    pub use crate::{
        MetricsObservabilityHooks, SafeChatHooks, SafeClientHooks, SafeCredentialHooks,
        TracingObservabilityHooks,
    };
}
