//! Execution controls for collaborator calls.
//!
//! Every search, fetch, summarize and classify call runs under a fixed time
//! budget. An elapsed budget is reported as `BackendError::Timeout` and is
//! handled like any other failed call: skipped, never retried.

use std::future::Future;
use std::time::Duration;

use claimcheck_backends::{BackendError, BackendResult};

/// Run `call` with a time limit.
pub async fn with_timeout<T, F>(limit: Duration, call: F) -> BackendResult<T>
where
    F: Future<Output = BackendResult<T>>,
{
    match tokio::time::timeout(limit, call).await {
        Ok(result) => result,
        Err(_elapsed) => Err(BackendError::Timeout {
            limit_ms: limit.as_millis() as u64,
        }),
    }
}
