//! Queue use cases
//!
//!   UI event handler
//!         ↓
//!   SubmitOrEnqueueUseCase  → remote now, or queue for later
//!         ↓
//!   [MutationQueue / ImageUploadQueue]
//!         ↓
//!   DrainQueueUseCase       → connectivity returned
//!         ↓
//!   GetPendingStatusUseCase → "N changes waiting to sync"

pub mod drain_queue;
pub mod pending_status;
pub mod purge_queue;
pub mod submit_or_enqueue;

pub use drain_queue::{DrainError, DrainOptions, DrainQueueUseCase, DrainReport, FailedSubmit};
pub use pending_status::{GetPendingStatusUseCase, PendingSyncStatus};
pub use purge_queue::PurgeQueueUseCase;
pub use submit_or_enqueue::{SubmitOrEnqueueUseCase, WriteOutcome};
