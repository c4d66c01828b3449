use std::sync::Arc;
use std::time::Duration;

use fq_core::ids::EntryId;
use fq_core::ports::{ConnectivityPort, RemoteSubmitPort};
use fq_core::{DurableQueue, QueueError};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info_span, warn, Instrument};

use super::drain_queue::duration_ms;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOutcome {
    /// The remote acknowledged the write immediately.
    Submitted,
    /// The write is queued and will be replayed by the next drain.
    Queued(EntryId),
}

/// Write path used by UI handlers: send now when possible, queue otherwise.
///
/// A write goes to the queue when the device is offline, when the immediate
/// submit fails or times out, or when older writes are still queued (so it
/// cannot overtake them).
pub struct SubmitOrEnqueueUseCase<T> {
    queue: Arc<DurableQueue<T>>,
    remote: Arc<dyn RemoteSubmitPort<T>>,
    connectivity: Arc<dyn ConnectivityPort>,
    submit_timeout: Duration,
}

impl<T> SubmitOrEnqueueUseCase<T>
where
    T: Serialize + DeserializeOwned + Send + Sync + 'static,
{
    pub fn new(
        queue: Arc<DurableQueue<T>>,
        remote: Arc<dyn RemoteSubmitPort<T>>,
        connectivity: Arc<dyn ConnectivityPort>,
        submit_timeout: Duration,
    ) -> Self {
        Self {
            queue,
            remote,
            connectivity,
            submit_timeout,
        }
    }

    /// Fails only when the write could neither be submitted nor queued.
    pub async fn execute(&self, payload: T) -> Result<WriteOutcome, QueueError> {
        let span = info_span!(
            "usecase.queue.submit_or_enqueue.execute",
            key = %self.queue.key(),
        );

        self.execute_inner(payload).instrument(span).await
    }

    async fn execute_inner(&self, payload: T) -> Result<WriteOutcome, QueueError> {
        if !self.connectivity.current().is_online() {
            debug!("Offline, queueing write");
            return self.enqueue(payload);
        }

        if !self.queue.is_empty() {
            debug!("Older writes still queued, queueing behind them");
            return self.enqueue(payload);
        }

        match tokio::time::timeout(self.submit_timeout, self.remote.submit(&payload)).await {
            Ok(Ok(())) => {
                debug!("Write submitted directly");
                Ok(WriteOutcome::Submitted)
            }
            Ok(Err(err)) => {
                warn!(error = %err, "Immediate submit failed, queueing write");
                self.enqueue(payload)
            }
            Err(_) => {
                warn!(
                    timeout_ms = duration_ms(self.submit_timeout),
                    "Immediate submit timed out, queueing write"
                );
                self.enqueue(payload)
            }
        }
    }

    fn enqueue(&self, payload: T) -> Result<WriteOutcome, QueueError> {
        self.queue.enqueue(payload).map(WriteOutcome::Queued)
    }
}
