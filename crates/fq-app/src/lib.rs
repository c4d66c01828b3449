//! fieldqueue Application Orchestration Layer
//!
//! Use cases that write through or around the offline queues, and the
//! coordinator that drains them when connectivity returns.

pub mod deps;
pub mod sync_coordinator;
pub mod usecases;

pub use deps::SyncDeps;
pub use sync_coordinator::{SyncCoordinator, SyncPassReport};
pub use usecases::{
    DrainError, DrainOptions, DrainQueueUseCase, DrainReport, GetPendingStatusUseCase,
    PendingSyncStatus, PurgeQueueUseCase, SubmitOrEnqueueUseCase, WriteOutcome,
};
