use std::fmt::{Display, Formatter};
use std::sync::Arc;

use fq_core::{ImageUploadQueue, MutationQueue};
use serde::Serialize;

/// What the user sees: how many writes are still waiting for the remote.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PendingSyncStatus {
    pub actions: usize,
    pub images: usize,
}

impl PendingSyncStatus {
    pub fn total(&self) -> usize {
        self.actions + self.images
    }

    pub fn is_synced(&self) -> bool {
        self.total() == 0
    }
}

impl Display for PendingSyncStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.total() {
            0 => write!(f, "All changes synced"),
            1 => write!(f, "1 change waiting to sync"),
            n => write!(f, "{n} changes waiting to sync"),
        }
    }
}

pub struct GetPendingStatusUseCase {
    actions: Arc<MutationQueue>,
    images: Arc<ImageUploadQueue>,
}

impl GetPendingStatusUseCase {
    pub fn new(actions: Arc<MutationQueue>, images: Arc<ImageUploadQueue>) -> Self {
        Self { actions, images }
    }

    pub fn execute(&self) -> PendingSyncStatus {
        PendingSyncStatus {
            actions: self.actions.count(),
            images: self.images.count(),
        }
    }
}
