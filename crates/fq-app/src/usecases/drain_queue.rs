use std::sync::Arc;
use std::time::Duration;

use fq_core::config::DrainPolicy;
use fq_core::ids::EntryId;
use fq_core::ports::{RemoteSubmitPort, SubmitError};
use fq_core::{DurableQueue, QueueError};
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, info_span, warn, Instrument};

pub const DEFAULT_SUBMIT_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrainOptions {
    pub policy: DrainPolicy,
    /// Upper bound for one `submit`; a timed-out submit counts as a failure.
    pub submit_timeout: Duration,
}

impl Default for DrainOptions {
    fn default() -> Self {
        Self {
            policy: DrainPolicy::default(),
            submit_timeout: DEFAULT_SUBMIT_TIMEOUT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedSubmit {
    pub entry_id: EntryId,
    pub error: SubmitError,
}

/// Outcome of one drain pass over one queue.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DrainReport {
    /// Entries handed to the remote during this pass.
    pub attempted: usize,
    /// Entries acknowledged by the remote and removed, in submission order.
    pub confirmed: Vec<EntryId>,
    /// Entries that stay queued because their submit failed.
    pub failed: Vec<FailedSubmit>,
    /// Queue depth after the pass.
    pub remaining: usize,
    /// The pass stopped early because it was cancelled.
    pub cancelled: bool,
}

#[derive(Debug, Error)]
pub enum DrainError {
    /// The remote confirmed the entry but the queue could not drop it. The
    /// pass stops here; the entry will be submitted again next pass.
    #[error("failed to remove confirmed entry {entry_id}: {source}")]
    RemoveConfirmed {
        entry_id: EntryId,
        #[source]
        source: QueueError,
    },
}

/// Replays one queue against the remote API, oldest entry first.
///
/// An entry is removed only after the remote acknowledged it. Each entry is
/// attempted at most once per pass; entries enqueued while a pass runs wait
/// for the next one.
pub struct DrainQueueUseCase<T> {
    queue: Arc<DurableQueue<T>>,
    remote: Arc<dyn RemoteSubmitPort<T>>,
    options: DrainOptions,
}

impl<T> DrainQueueUseCase<T>
where
    T: Serialize + DeserializeOwned + Send + Sync + 'static,
{
    pub fn new(
        queue: Arc<DurableQueue<T>>,
        remote: Arc<dyn RemoteSubmitPort<T>>,
        options: DrainOptions,
    ) -> Self {
        Self {
            queue,
            remote,
            options,
        }
    }

    pub async fn execute(&self, cancel: &CancellationToken) -> Result<DrainReport, DrainError> {
        let span = info_span!(
            "usecase.queue.drain.execute",
            key = %self.queue.key(),
            policy = ?self.options.policy,
        );

        self.execute_inner(cancel).instrument(span).await
    }

    async fn execute_inner(&self, cancel: &CancellationToken) -> Result<DrainReport, DrainError> {
        let pending = self.queue.list();
        let mut report = DrainReport::default();

        if pending.is_empty() {
            debug!("Nothing queued, skipping drain");
            return Ok(report);
        }

        for entry in pending {
            if cancel.is_cancelled() {
                report.cancelled = true;
                break;
            }

            report.attempted += 1;
            match self.submit(&entry.payload, cancel).await {
                Ok(()) => {
                    self.queue
                        .remove(&entry.id)
                        .map_err(|source| DrainError::RemoveConfirmed {
                            entry_id: entry.id.clone(),
                            source,
                        })?;
                    debug!(entry_id = %entry.id, "Queued entry confirmed and removed");
                    report.confirmed.push(entry.id);
                }
                Err(SubmitError::Cancelled) => {
                    debug!(entry_id = %entry.id, "Submit abandoned, entry stays queued");
                    report.cancelled = true;
                    break;
                }
                Err(error) => {
                    warn!(entry_id = %entry.id, error = %error, "Submit failed, entry stays queued");
                    report.failed.push(FailedSubmit {
                        entry_id: entry.id,
                        error,
                    });
                    if self.options.policy == DrainPolicy::HaltOnFailure {
                        break;
                    }
                }
            }
        }

        report.remaining = self.queue.count();
        info!(
            attempted = report.attempted,
            confirmed = report.confirmed.len(),
            failed = report.failed.len(),
            remaining = report.remaining,
            cancelled = report.cancelled,
            "Drain pass finished"
        );
        Ok(report)
    }

    async fn submit(&self, payload: &T, cancel: &CancellationToken) -> Result<(), SubmitError> {
        let timeout = self.options.submit_timeout;
        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(SubmitError::Cancelled),
            outcome = tokio::time::timeout(timeout, self.remote.submit(payload)) => {
                outcome.unwrap_or_else(|_| Err(SubmitError::Timeout(duration_ms(timeout))))
            }
        }
    }
}

/// Milliseconds in `duration`, saturating at `u64::MAX`.
pub(crate) fn duration_ms(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}
