use std::sync::Arc;

use fq_core::{DurableQueue, QueueError};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{info_span, warn};

/// Explicitly discard everything queued, e.g. when the user signs out.
pub struct PurgeQueueUseCase<T> {
    queue: Arc<DurableQueue<T>>,
}

impl<T> PurgeQueueUseCase<T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn new(queue: Arc<DurableQueue<T>>) -> Self {
        Self { queue }
    }

    /// Returns how many entries were discarded.
    pub fn execute(&self) -> Result<usize, QueueError> {
        let _span = info_span!("usecase.queue.purge.execute", key = %self.queue.key()).entered();

        let dropped = self.queue.purge()?;
        if dropped > 0 {
            warn!(dropped, "Discarded unsynced entries on request");
        }
        Ok(dropped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fq_core::ports::StorageKey;
    use fq_core::MutationQueue;
    use fq_infra::{InMemoryStore, SystemClock, UuidIdGenerator};
    use serde_json::json;

    #[test]
    fn purge_reports_dropped_entries() {
        let queue = Arc::new(MutationQueue::new(
            StorageKey::namespaced("t", "offline_queue"),
            Arc::new(InMemoryStore::new()),
            Arc::new(UuidIdGenerator),
            Arc::new(SystemClock),
        ));
        queue.enqueue_action(json!(1), "a").unwrap();
        queue.enqueue_action(json!(2), "b").unwrap();

        let usecase = PurgeQueueUseCase::new(queue.clone());
        assert_eq!(usecase.execute().unwrap(), 2);
        assert_eq!(queue.count(), 0);
    }
}
