//! DurableQueue over the file-backed store: contents survive reopening and a
//! damaged file degrades to an empty queue.

use std::fs;
use std::sync::Arc;

use fq_core::ports::DurableStorePort;
use fq_core::{ImageType, ImageUploadQueue, MutationQueue, PendingImageUpload, StorageKey};
use fq_infra::{FileStore, SystemClock, TimestampIdGenerator, UuidIdGenerator};
use serde_json::json;
use tempfile::TempDir;

fn action_key() -> StorageKey {
    StorageKey::namespaced("maechaem", "offline_queue")
}

fn open_actions(dir: &TempDir) -> MutationQueue {
    MutationQueue::new(
        action_key(),
        Arc::new(FileStore::new(dir.path())),
        Arc::new(UuidIdGenerator),
        Arc::new(SystemClock),
    )
}

#[test]
fn queue_survives_reopen() {
    let dir = TempDir::new().unwrap();

    let (first, second) = {
        let queue = open_actions(&dir);
        let first = queue.enqueue_action(json!({"tree": 1, "dbh": 12.5}), "tree 1").unwrap();
        let second = queue.enqueue_action(json!({"tree": 2, "dbh": 30.1}), "tree 2").unwrap();
        (first, second)
    };

    let reopened = open_actions(&dir);
    let entries = reopened.list();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].id, first);
    assert_eq!(entries[1].id, second);
    assert_eq!(entries[1].payload.payload["dbh"], json!(30.1));

    reopened.remove(&first).unwrap();
    assert_eq!(open_actions(&dir).count(), 1);
}

#[test]
fn persisted_layout_is_a_flat_json_array() {
    let dir = TempDir::new().unwrap();
    let queue = open_actions(&dir);
    let id = queue.enqueue_action(json!({"plot": "P-07"}), "edit plot").unwrap();

    let raw = fs::read_to_string(dir.path().join("maechaem_offline_queue.json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();

    let entry = &value.as_array().unwrap()[0];
    assert_eq!(entry["id"], json!(id.as_str()));
    assert!(entry["timestamp"].is_i64());
    assert_eq!(entry["payload"], json!({"plot": "P-07"}));
    assert_eq!(entry["description"], json!("edit plot"));
}

#[test]
fn corrupted_file_reads_as_empty_and_is_replaced_on_enqueue() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("maechaem_offline_queue.json"), "{not json").unwrap();

    let queue = open_actions(&dir);
    assert!(queue.list().is_empty());

    queue.enqueue_action(json!(1), "after corruption").unwrap();
    assert_eq!(open_actions(&dir).count(), 1);
}

#[test]
fn image_data_is_stored_byte_for_byte() {
    let dir = TempDir::new().unwrap();
    let store: Arc<dyn DurableStorePort> = Arc::new(FileStore::new(dir.path()));
    let clock = Arc::new(SystemClock);
    let queue = ImageUploadQueue::new(
        StorageKey::namespaced("maechaem", "offline_image_queue"),
        store.clone(),
        Arc::new(TimestampIdGenerator::new(clock.clone())),
        clock,
    );
    let data = "data:image/webp;base64,UklGRiIAAABXRUJQVlA4IBYAAAAwAQCdASoBAAEADsD+JaQAA3AAAAAA";

    queue
        .enqueue(
            PendingImageUpload::new("P-03", ImageType::Soil, data)
                .with_description("pit 2")
                .with_uploader("field-team"),
        )
        .unwrap();

    let stored = queue.list().remove(0).payload;
    assert_eq!(stored.base64_data, data);
    assert_eq!(stored.mime_type(), Some("image/webp"));

    let raw = store
        .read(&StorageKey::namespaced("maechaem", "offline_image_queue"))
        .unwrap()
        .unwrap();
    assert!(raw.contains("\"plotCode\":\"P-03\""));
    assert!(!raw.contains("galleryCategory"));
}
