use std::sync::Arc;
use std::time::Duration;

use nauth::{AuthHeaderResolver, CredentialStore, InMemorySecretStore};
use nchat::prelude::*;
use nclient::{
    BackendTransport, BoxFuture, ClientError, ClientErrorKind, HttpRequest, HttpResponse,
    RequestOrchestrator,
};

#[derive(Debug)]
struct StalledTransport;

impl BackendTransport for StalledTransport {
    fn execute<'a>(
        &'a self,
        _request: HttpRequest,
    ) -> BoxFuture<'a, Result<HttpResponse, ClientError>> {
        Box::pin(async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok(HttpResponse::new(
                200,
                r#"{"answer":"late","sources":[],"is_fallback":false,"session_id":"late"}"#,
            ))
        })
    }
}

#[tokio::test]
async fn timed_out_turn_settles_with_timeout_apology() {
    let auth = AuthHeaderResolver::new(CredentialStore::new(Arc::new(InMemorySecretStore::new())));
    let orchestrator = RequestOrchestrator::new(Arc::new(StalledTransport), auth)
        .with_timeout(Duration::from_millis(25));
    let session = ChatSession::new(Arc::new(orchestrator));

    let outcome = session.submit("What is Section 302 of IPC?").await;

    let (message, error) = match outcome {
        TurnOutcome::Failed { message, error } => (message, error),
        other => panic!("expected timeout, got {other:?}"),
    };
    assert_eq!(error.kind, ClientErrorKind::Timeout);
    assert!(message.is_fallback);
    assert_eq!(
        message.content,
        "I apologize, but I encountered an error: Request timed out. Please try again."
    );
    assert_eq!(session.session_id(), None);
    assert!(!session.is_pending());
}
