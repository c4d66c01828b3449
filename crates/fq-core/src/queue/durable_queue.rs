use std::marker::PhantomData;
use std::sync::{Arc, Mutex, MutexGuard};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use super::{codec, QueueEntry, QueueError};
use crate::ids::EntryId;
use crate::ports::{ClockPort, DurableStorePort, IdGeneratorPort, StorageKey};

/// Attempts at drawing an id that is not already queued before giving up.
const MAX_ID_ATTEMPTS: usize = 8;

/// Ordered, durable log of pending writes stored as one blob under one key.
///
/// Every operation is a whole-sequence read-modify-write against the store,
/// so the queue holds no entries in memory between calls. Callers only ever
/// receive copies. Within one process, mutations of the same instance are
/// serialized; separate processes sharing the key may still lose an update.
///
/// 持久化有序队列：每次操作都读取、修改并整体写回存储。
pub struct DurableQueue<T> {
    key: StorageKey,
    store: Arc<dyn DurableStorePort>,
    ids: Arc<dyn IdGeneratorPort>,
    clock: Arc<dyn ClockPort>,
    write_lock: Mutex<()>,
    _payload: PhantomData<fn() -> T>,
}

impl<T> DurableQueue<T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn new(
        key: StorageKey,
        store: Arc<dyn DurableStorePort>,
        ids: Arc<dyn IdGeneratorPort>,
        clock: Arc<dyn ClockPort>,
    ) -> Self {
        Self {
            key,
            store,
            ids,
            clock,
            write_lock: Mutex::new(()),
            _payload: PhantomData,
        }
    }

    pub fn key(&self) -> &StorageKey {
        &self.key
    }

    /// All queued entries, oldest first. Never fails: an unreadable or
    /// corrupted blob reads as an empty queue.
    pub fn list(&self) -> Vec<QueueEntry<T>> {
        self.load()
    }

    pub fn count(&self) -> usize {
        self.load().len()
    }

    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }

    pub fn get(&self, id: &EntryId) -> Option<QueueEntry<T>> {
        self.load().into_iter().find(|entry| &entry.id == id)
    }

    /// Append `payload` behind every queued entry and persist the queue.
    ///
    /// Returns the new entry's id. A store that refuses the write surfaces as
    /// an error: the payload is not queued and the caller still owns it.
    pub fn enqueue(&self, payload: T) -> Result<EntryId, QueueError> {
        let _guard = self.lock();
        let mut entries = self.load_for_update()?;

        let id = self.fresh_id(&entries)?;
        let now = self.clock.now_ms();
        let enqueued_at = entries
            .last()
            .map_or(now, |last| now.max(last.enqueued_at));

        entries.push(QueueEntry::new(id.clone(), enqueued_at, payload));
        self.persist(&entries)?;

        debug!(
            key = %self.key,
            entry_id = %id,
            depth = entries.len(),
            "Entry enqueued"
        );
        Ok(id)
    }

    /// Drop the entry with `id`. Removing an id that is not queued is a no-op.
    pub fn remove(&self, id: &EntryId) -> Result<(), QueueError> {
        let _guard = self.lock();
        let mut entries = self.load_for_update()?;

        let before = entries.len();
        entries.retain(|entry| &entry.id != id);
        if entries.len() == before {
            debug!(key = %self.key, entry_id = %id, "Remove of absent entry ignored");
            return Ok(());
        }

        self.persist(&entries)?;
        debug!(
            key = %self.key,
            entry_id = %id,
            depth = entries.len(),
            "Entry removed"
        );
        Ok(())
    }

    /// Drop every queued entry. Returns how many were dropped.
    pub fn purge(&self) -> Result<usize, QueueError> {
        let _guard = self.lock();
        let dropped = self.load_for_update()?.len();
        self.persist(&[])?;

        warn!(key = %self.key, dropped, "Queue purged");
        Ok(dropped)
    }

    fn load(&self) -> Vec<QueueEntry<T>> {
        match self.store.read(&self.key) {
            Ok(Some(raw)) => codec::decode(&raw),
            Ok(None) => Vec::new(),
            Err(err) => {
                warn!(key = %self.key, error = %err, "Queue store unreadable, treating as empty");
                Vec::new()
            }
        }
    }

    /// Read path for read-modify-write cycles. A store that cannot be read
    /// is an error here, otherwise the write back would replace entries that
    /// are still on disk. Undecodable content still counts as empty.
    fn load_for_update(&self) -> Result<Vec<QueueEntry<T>>, QueueError> {
        Ok(self
            .store
            .read(&self.key)?
            .map(|raw| codec::decode(&raw))
            .unwrap_or_default())
    }

    fn persist(&self, entries: &[QueueEntry<T>]) -> Result<(), QueueError> {
        let blob = codec::encode(entries)?;
        self.store.write(&self.key, &blob)?;
        Ok(())
    }

    fn fresh_id(&self, entries: &[QueueEntry<T>]) -> Result<EntryId, QueueError> {
        let mut id = self.ids.next_id();
        for _ in 1..MAX_ID_ATTEMPTS {
            if !entries.iter().any(|entry| entry.id == id) {
                return Ok(id);
            }
            warn!(key = %self.key, entry_id = %id, "Generated id already queued, drawing again");
            id = self.ids.next_id();
        }

        if entries.iter().any(|entry| entry.id == id) {
            return Err(QueueError::IdCollision(id));
        }
        Ok(id)
    }

    fn lock(&self) -> MutexGuard<'_, ()> {
        self.write_lock
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
