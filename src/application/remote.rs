//! Bounded, cancellable remote calls.

use std::future::Future;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::ports::GatewayError;

/// Runs one remote call under `timeout`, abandoning it if `cancel` fires.
///
/// Returns `None` when cancelled; the call's late result is dropped. An
/// expired timeout resolves to [`GatewayError::Timeout`].
pub(crate) async fn bounded<T, F>(
    cancel: &CancellationToken,
    timeout: Duration,
    call: F,
) -> Option<Result<T, GatewayError>>
where
    F: Future<Output = Result<T, GatewayError>>,
{
    tokio::select! {
        biased;
        _ = cancel.cancelled() => None,
        outcome = tokio::time::timeout(timeout, call) => {
            Some(outcome.unwrap_or_else(|_| Err(GatewayError::timed_out(timeout))))
        }
    }
}
