//! Timeout-with-retry helper for model and tool calls.

use crate::error::{Result, TourdeskError};
use std::future::Future;
use std::time::Duration;
use tracing::warn;

/// Run `op` under `limit`, retrying up to `retries` extra times on timeout.
///
/// Errors from `op` itself are returned immediately. When every attempt times
/// out, `exhausted` builds the error.
pub(crate) async fn with_deadline<T, F, Fut>(
    what: &str,
    limit: Duration,
    retries: u32,
    mut op: F,
    exhausted: impl FnOnce() -> TourdeskError,
) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let mut attempt = 0;
    loop {
        match tokio::time::timeout(limit, op()).await {
            Ok(result) => return result,
            Err(_) if attempt < retries => {
                attempt += 1;
                warn!(
                    "{} timed out after {:?}, retrying ({}/{})",
                    what, limit, attempt, retries
                );
            }
            Err(_) => return Err(exhausted()),
        }
    }
}
