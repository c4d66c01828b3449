//! Structural JSON mapping between a queue blob and its entries.
//!
//! Decoding never fails: a blob that cannot be read as a list of entries is
//! treated as an empty queue. The store is a best-effort cache, the remote
//! API is the system of record.

use std::collections::HashSet;

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;
use tracing::warn;

use super::QueueEntry;

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("encode queue entries failed: {0}")]
    Encode(#[from] serde_json::Error),
}

pub fn encode<T: Serialize>(entries: &[QueueEntry<T>]) -> Result<String, CodecError> {
    Ok(serde_json::to_string(entries)?)
}

/// Decode a stored blob, oldest entry first.
///
/// Malformed input yields an empty vector. If the blob holds the same id more
/// than once, only the first occurrence is kept.
pub fn decode<T: DeserializeOwned>(raw: &str) -> Vec<QueueEntry<T>> {
    if raw.trim().is_empty() {
        return Vec::new();
    }

    let entries: Vec<QueueEntry<T>> = match serde_json::from_str(raw) {
        Ok(entries) => entries,
        Err(err) => {
            warn!(
                error = %err,
                blob_len = raw.len(),
                "Discarding malformed queue blob"
            );
            return Vec::new();
        }
    };

    let total = entries.len();
    let mut seen = HashSet::with_capacity(total);
    let unique: Vec<QueueEntry<T>> = entries
        .into_iter()
        .filter(|entry| seen.insert(entry.id.clone()))
        .collect();

    if unique.len() != total {
        warn!(
            dropped = total - unique.len(),
            "Queue blob contained duplicate entry ids"
        );
    }

    unique
}
