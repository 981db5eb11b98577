//! Timeout utilities for page operations
//!
//! Provides async timeout wrappers to prevent indefinite hangs during
//! page navigation, element reads, and other browser operations.

use std::future::Future;
use std::time::Duration;

use crate::session::{SessionError, SessionResult};

/// Wrap an async page operation with an explicit timeout
///
/// Distinguishes the two failure modes: the operation's own error is passed
/// through unchanged, an expired deadline becomes `SessionError::Timeout`
/// naming `operation_name`.
pub async fn with_page_timeout<F, T>(
    operation: F,
    timeout: Duration,
    operation_name: &str,
) -> SessionResult<T>
where
    F: Future<Output = SessionResult<T>>,
{
    match tokio::time::timeout(timeout, operation).await {
        Ok(result) => result,
        Err(_) => Err(SessionError::timeout(operation_name, timeout)),
    }
}
