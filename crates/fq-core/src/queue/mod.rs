//! Durable ordered queue of pending writes.
//!
//! One generic [`DurableQueue`] is specialized twice: [`MutationQueue`] for
//! arbitrary API payloads and [`ImageUploadQueue`] for data-URL image uploads.

mod action;
pub mod codec;
mod durable_queue;
mod entry;
mod error;
mod image;

pub use action::{MutationQueue, PendingAction};
pub use codec::CodecError;
pub use durable_queue::DurableQueue;
pub use entry::QueueEntry;
pub use error::QueueError;
pub use image::{GalleryCategory, ImageType, ImageUploadQueue, PendingImageUpload};

pub use crate::ports::StorageKey;

/// Namespace of the storage keys written by earlier releases.
pub const DEFAULT_NAMESPACE: &str = "maechaem";

/// Storage name of the generic mutation queue.
pub const MUTATION_QUEUE_NAME: &str = "offline_queue";

/// Storage name of the image upload queue.
pub const IMAGE_QUEUE_NAME: &str = "offline_image_queue";
