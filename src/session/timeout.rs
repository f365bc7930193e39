//! Timeout wrapper for page operations
//!
//! Keeps a slow DNS lookup or a page with endless long-polling from
//! hanging the whole batch.

use std::future::Future;
use std::time::Duration;

use crate::errors::{SessionError, SessionResult};

/// Run `operation` with an explicit upper bound
///
/// # Returns
/// * `Ok(T)` - Operation completed successfully
/// * `Err(SessionError::Timeout)` - The bound was reached first
/// * `Err(e)` - The operation itself failed
pub async fn with_timeout<F, T>(
    operation: F,
    after: Duration,
    operation_name: &'static str,
) -> SessionResult<T>
where
    F: Future<Output = SessionResult<T>>,
{
    match tokio::time::timeout(after, operation).await {
        Ok(result) => result,
        Err(_) => Err(SessionError::Timeout {
            operation: operation_name,
            after,
        }),
    }
}
