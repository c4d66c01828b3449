//! Remote submit port - the authenticated API that finally accepts a payload.

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SubmitError {
    #[error("network error: {0}")]
    Network(String),

    #[error("remote rejected payload: {0}")]
    Rejected(String),

    #[error("submit timed out after {0} ms")]
    Timeout(u64),

    #[error("submit cancelled")]
    Cancelled,
}

/// Remote capability accepting one queued payload.
///
/// `Ok(())` means the remote side acknowledged the write. The remote side does
/// not guarantee idempotency, so callers submit each entry at most once per
/// drain pass.
#[async_trait]
pub trait RemoteSubmitPort<T>: Send + Sync
where
    T: Send + Sync,
{
    async fn submit(&self, payload: &T) -> Result<(), SubmitError>;
}
