use std::collections::HashMap;
use std::sync::Mutex;

use fq_core::ports::{DurableStorePort, StorageKey, StoreError};

/// Process-local store. Contents vanish with the process.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    blobs: Mutex<HashMap<String, String>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with one raw blob, e.g. a corrupted one.
    pub fn with_blob(key: &StorageKey, blob: impl Into<String>) -> Self {
        let mut blobs = HashMap::new();
        blobs.insert(key.as_str().to_string(), blob.into());
        Self {
            blobs: Mutex::new(blobs),
        }
    }

    /// Raw blob currently stored under `key`.
    pub fn raw(&self, key: &StorageKey) -> Option<String> {
        self.blobs
            .lock()
            .ok()
            .and_then(|blobs| blobs.get(key.as_str()).cloned())
    }
}

impl DurableStorePort for InMemoryStore {
    fn read(&self, key: &StorageKey) -> Result<Option<String>, StoreError> {
        let blobs = self
            .blobs
            .lock()
            .map_err(|_| StoreError::Unavailable("in-memory store lock poisoned".to_string()))?;
        Ok(blobs.get(key.as_str()).cloned())
    }

    fn write(&self, key: &StorageKey, blob: &str) -> Result<(), StoreError> {
        let mut blobs = self
            .blobs
            .lock()
            .map_err(|_| StoreError::Unavailable("in-memory store lock poisoned".to_string()))?;
        blobs.insert(key.as_str().to_string(), blob.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_of_unknown_key_is_none() {
        let store = InMemoryStore::new();
        let key = StorageKey::namespaced("t", "q");
        assert_eq!(store.read(&key).unwrap(), None);
    }

    #[test]
    fn write_replaces_previous_blob() {
        let key = StorageKey::namespaced("t", "q");
        let store = InMemoryStore::with_blob(&key, "[]");

        store.write(&key, "[1]").unwrap();
        assert_eq!(store.read(&key).unwrap().as_deref(), Some("[1]"));
        assert_eq!(store.raw(&key).as_deref(), Some("[1]"));
    }
}
