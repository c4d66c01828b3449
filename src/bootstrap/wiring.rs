//! # Dependency Injection / 依赖注入
//!
//! Builds the two offline queues and the sync coordinator from a resolved
//! configuration. This is the only place that names concrete adapters.

use std::sync::Arc;

use fq_app::{SubmitOrEnqueueUseCase, SyncCoordinator, SyncDeps};
use fq_core::ports::{ClockPort, Connectivity, ConnectivityPort, DurableStorePort, RemoteSubmitPort};
use fq_core::queue::{IMAGE_QUEUE_NAME, MUTATION_QUEUE_NAME};
use fq_core::{
    ImageUploadQueue, MutationQueue, PendingAction, PendingImageUpload, StorageKey,
};
use fq_infra::{select_id_generator, FileStore, SystemClock};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::info;

use super::config::ResolvedConfig;

/// Remote API collaborators, one per queue.
pub struct RemoteDeps {
    pub actions: Arc<dyn RemoteSubmitPort<PendingAction>>,
    pub images: Arc<dyn RemoteSubmitPort<PendingImageUpload>>,
}

/// Everything the UI layer needs to write offline-safe and watch sync state.
pub struct OfflineQueues {
    pub actions: Arc<MutationQueue>,
    pub images: Arc<ImageUploadQueue>,
    pub coordinator: Arc<SyncCoordinator>,
    remotes: RemoteDeps,
    config: ResolvedConfig,
}

impl OfflineQueues {
    /// Write path for generic API actions.
    pub fn action_writer(
        &self,
        connectivity: Arc<dyn ConnectivityPort>,
    ) -> SubmitOrEnqueueUseCase<PendingAction> {
        SubmitOrEnqueueUseCase::new(
            self.actions.clone(),
            self.remotes.actions.clone(),
            connectivity,
            self.config.submit_timeout,
        )
    }

    /// Write path for image uploads.
    pub fn image_writer(
        &self,
        connectivity: Arc<dyn ConnectivityPort>,
    ) -> SubmitOrEnqueueUseCase<PendingImageUpload> {
        SubmitOrEnqueueUseCase::new(
            self.images.clone(),
            self.remotes.images.clone(),
            connectivity,
            self.config.submit_timeout,
        )
    }

    /// Start draining on every reconnect. Stop with
    /// `coordinator.shutdown()`.
    pub fn spawn_sync(&self, connectivity: watch::Receiver<Connectivity>) -> JoinHandle<()> {
        let coordinator = self.coordinator.clone();
        tokio::spawn(async move { coordinator.run(connectivity).await })
    }
}

/// Wire the queues over a [`FileStore`] in `<data_dir>/queue`.
pub fn wire_offline_queues(config: &ResolvedConfig, remotes: RemoteDeps) -> OfflineQueues {
    let store = Arc::new(FileStore::new(config.queue_dir()));
    info!(dir = %store.dir().display(), "Offline queue storage ready");
    wire_with_store(config, store, remotes)
}

/// Wire the queues over any store, e.g. an in-memory one for an ephemeral
/// session.
pub fn wire_with_store(
    config: &ResolvedConfig,
    store: Arc<dyn DurableStorePort>,
    remotes: RemoteDeps,
) -> OfflineQueues {
    let clock: Arc<dyn ClockPort> = Arc::new(SystemClock);
    let ids = select_id_generator(config.id_strategy, clock.clone());

    let actions = Arc::new(MutationQueue::new(
        StorageKey::namespaced(&config.namespace, MUTATION_QUEUE_NAME),
        store.clone(),
        ids.clone(),
        clock.clone(),
    ));
    let images = Arc::new(ImageUploadQueue::new(
        StorageKey::namespaced(&config.namespace, IMAGE_QUEUE_NAME),
        store,
        ids,
        clock,
    ));

    let coordinator = Arc::new(SyncCoordinator::new(SyncDeps {
        action_queue: actions.clone(),
        image_queue: images.clone(),
        action_remote: remotes.actions.clone(),
        image_remote: remotes.images.clone(),
        options: config.drain_options(),
    }));

    OfflineQueues {
        actions,
        images,
        coordinator,
        remotes,
        config: config.clone(),
    }
}
