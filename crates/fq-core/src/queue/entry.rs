use serde::{Deserialize, Serialize};

use crate::ids::EntryId;

/// One durably persisted pending write awaiting remote confirmation.
///
/// The payload is flattened into the entry object, so a stored entry reads
/// `{"id": .., "timestamp": .., <payload fields>}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueueEntry<T> {
    pub id: EntryId,

    /// Epoch milliseconds at enqueue. Used for ordering and display only.
    #[serde(rename = "timestamp")]
    pub enqueued_at: i64,

    #[serde(flatten)]
    pub payload: T,
}

impl<T> QueueEntry<T> {
    pub fn new(id: EntryId, enqueued_at: i64, payload: T) -> Self {
        Self {
            id,
            enqueued_at,
            payload,
        }
    }

    /// Milliseconds the entry has been waiting, clamped at zero.
    pub fn age_ms(&self, now_ms: i64) -> i64 {
        (now_ms - self.enqueued_at).max(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Note {
        text: String,
    }

    #[test]
    fn payload_fields_are_flattened() {
        let entry = QueueEntry::new(
            EntryId::from("e-1"),
            1_700_000_000_000,
            Note {
                text: "dbh 31.5".to_string(),
            },
        );

        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(
            value,
            json!({"id": "e-1", "timestamp": 1_700_000_000_000_i64, "text": "dbh 31.5"})
        );
    }

    #[test]
    fn age_never_goes_negative() {
        let entry = QueueEntry::new(EntryId::from("e-1"), 2_000, ());
        assert_eq!(entry.age_ms(5_000), 3_000);
        assert_eq!(entry.age_ms(1_000), 0);
    }
}
