//! Single-attempt call runner: deadline race, status mapping, decoding, hook reporting.

use std::future::Future;
use std::time::{Duration, Instant};

use futures_timer::Delay;
use futures_util::future::{Either, select};

use crate::wire::remote_error;
use crate::{BackendTransport, ClientError, ClientOperation, ClientOperationHooks, HttpRequest, HttpResponse};

/// Races `future` against a timer. When the timer wins the future is dropped, so its
/// eventual completion can never be observed.
pub async fn with_deadline<T, F>(future: F, limit: Duration) -> Result<T, ClientError>
where
    F: Future<Output = Result<T, ClientError>> + Unpin,
{
    match select(future, Delay::new(limit)).await {
        Either::Left((result, _)) => result,
        Either::Right(((), _abandoned)) => Err(ClientError::timeout()),
    }
}

pub(crate) async fn execute_call<T, D>(
    transport: &dyn BackendTransport,
    hooks: &dyn ClientOperationHooks,
    operation: ClientOperation,
    request: HttpRequest,
    deadline: Option<Duration>,
    decode: D,
) -> Result<T, ClientError>
where
    D: FnOnce(&HttpResponse) -> Result<T, ClientError>,
{
    let started = Instant::now();
    hooks.on_request_start(operation);

    let exchange = match deadline {
        Some(limit) => with_deadline(transport.execute(request), limit).await,
        None => transport.execute(request).await,
    };

    let outcome = exchange.and_then(|response| {
        if !response.is_success() {
            return Err(remote_error(&response));
        }

        decode(&response).map(|value| (response.status, value))
    });

    match outcome {
        Ok((status, value)) => {
            hooks.on_request_success(operation, status, started.elapsed());
            Ok(value)
        }
        Err(error) => {
            hooks.on_request_failure(operation, &error, started.elapsed());
            Err(error)
        }
    }
}
