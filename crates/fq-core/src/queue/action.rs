use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::{DurableQueue, QueueError};
use crate::ids::EntryId;

/// A generic API write that could not be completed immediately.
///
/// `payload` is the request body handed to the remote API untouched;
/// `description` is the human-readable line shown in the pending list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendingAction<P = serde_json::Value> {
    pub payload: P,
    #[serde(default)]
    pub description: String,
}

impl<P> PendingAction<P> {
    pub fn new(payload: P, description: impl Into<String>) -> Self {
        Self {
            payload,
            description: description.into(),
        }
    }
}

/// Queue of pending generic API writes.
pub type MutationQueue<P = serde_json::Value> = DurableQueue<PendingAction<P>>;

impl<P> DurableQueue<PendingAction<P>>
where
    P: Serialize + DeserializeOwned,
{
    /// Enqueue a request body together with its display description.
    pub fn enqueue_action(
        &self,
        payload: P,
        description: impl Into<String>,
    ) -> Result<EntryId, QueueError> {
        self.enqueue(PendingAction::new(payload, description))
    }
}
