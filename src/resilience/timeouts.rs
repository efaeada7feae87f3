//! Timeout enforcement.
//!
//! # Design Decisions
//! - Uses Tokio's timeout facilities
//! - Expiry drops the inner future, which cancels the in-flight request
//! - Timeout errors are distinct from other transport errors

use std::future::Future;
use std::time::Duration;
use tokio::time::timeout;

use crate::client::error::FetchError;

/// Run `fut` with a deadline, mapping expiry to [`FetchError::Timeout`].
pub async fn with_deadline<T, F>(deadline: Duration, fut: F) -> Result<T, FetchError>
where
    F: Future<Output = Result<T, FetchError>>,
{
    match timeout(deadline, fut).await {
        Ok(result) => result,
        Err(_) => Err(FetchError::Timeout(deadline)),
    }
}
