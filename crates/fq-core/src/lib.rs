//! # fq-core
//!
//! Core domain models and ports for the fieldqueue offline write queue.
//!
//! This crate contains the durable queue logic without any infrastructure
//! dependencies. Storage, clocks and identifier generation are injected
//! through the traits in [`ports`].

// Public module exports
pub mod config;
pub mod ids;
pub mod ports;
pub mod queue;

// Re-export commonly used types at the crate root
pub use config::{DrainPolicy, IdStrategy, QueueConfig};
pub use ids::EntryId;
pub use queue::{
    DurableQueue, GalleryCategory, ImageType, ImageUploadQueue, MutationQueue, PendingAction,
    PendingImageUpload, QueueEntry, QueueError, StorageKey,
};
