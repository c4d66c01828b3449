use std::sync::{Arc, Mutex};

use fq_core::ports::Connectivity;
use fq_core::{PendingAction, PendingImageUpload};
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, info_span, Instrument};

use crate::deps::SyncDeps;
use crate::usecases::{
    DrainError, DrainQueueUseCase, DrainReport, GetPendingStatusUseCase, PendingSyncStatus,
};

/// Reports of one coordinated pass over both queues.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncPassReport {
    pub actions: DrainReport,
    pub images: DrainReport,
}

/// Drains the mutation and image queues when connectivity returns.
///
/// Only one pass runs at a time; a pass requested while another is running is
/// skipped rather than queued, so no entry is submitted twice concurrently.
/// The two queues drain side by side with no ordering between them.
pub struct SyncCoordinator {
    actions: DrainQueueUseCase<PendingAction>,
    images: DrainQueueUseCase<PendingImageUpload>,
    status: GetPendingStatusUseCase,
    status_tx: watch::Sender<PendingSyncStatus>,
    pass_lock: tokio::sync::Mutex<()>,
    in_flight: Mutex<Option<CancellationToken>>,
    shutdown: CancellationToken,
}

impl SyncCoordinator {
    pub fn new(deps: SyncDeps) -> Self {
        let SyncDeps {
            action_queue,
            image_queue,
            action_remote,
            image_remote,
            options,
        } = deps;

        let status = GetPendingStatusUseCase::new(action_queue.clone(), image_queue.clone());
        let (status_tx, _) = watch::channel(status.execute());

        Self {
            actions: DrainQueueUseCase::new(action_queue, action_remote, options),
            images: DrainQueueUseCase::new(image_queue, image_remote, options),
            status,
            status_tx,
            pass_lock: tokio::sync::Mutex::new(()),
            in_flight: Mutex::new(None),
            shutdown: CancellationToken::new(),
        }
    }

    /// Pending counts, republished after every pass and every
    /// [`refresh_status`](Self::refresh_status).
    pub fn subscribe_status(&self) -> watch::Receiver<PendingSyncStatus> {
        self.status_tx.subscribe()
    }

    /// Recount both queues and publish the result. Call after enqueueing.
    pub fn refresh_status(&self) -> PendingSyncStatus {
        let status = self.status.execute();
        self.status_tx.send_replace(status);
        status
    }

    /// Run one pass over both queues.
    ///
    /// Returns `Ok(None)` when another pass is already running.
    pub async fn drain_all(&self) -> Result<Option<SyncPassReport>, DrainError> {
        let Ok(_pass) = self.pass_lock.try_lock() else {
            debug!("Drain already in progress, skipping");
            return Ok(None);
        };

        let token = self.shutdown.child_token();
        self.set_in_flight(Some(token.clone()));

        let span = info_span!("coordinator.sync.drain_all");
        let (actions, images) = async {
            tokio::join!(self.actions.execute(&token), self.images.execute(&token))
        }
        .instrument(span)
        .await;

        self.set_in_flight(None);
        let status = self.refresh_status();
        info!(pending = status.total(), "Sync pass finished");

        match (actions, images) {
            (Ok(actions), Ok(images)) => Ok(Some(SyncPassReport { actions, images })),
            (Err(err), Ok(images)) => {
                info!(
                    confirmed = images.confirmed.len(),
                    remaining = images.remaining,
                    "Image drain finished, action drain failed"
                );
                Err(err)
            }
            (Ok(actions), Err(err)) => {
                info!(
                    confirmed = actions.confirmed.len(),
                    remaining = actions.remaining,
                    "Action drain finished, image drain failed"
                );
                Err(err)
            }
            (Err(err), Err(image_err)) => {
                error!(error = %image_err, "Image drain failed");
                Err(err)
            }
        }
    }

    /// Stop the running pass between entries. Entries not yet confirmed stay
    /// queued.
    pub fn cancel_current(&self) {
        let guard = self
            .in_flight
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Some(token) = guard.as_ref() {
            debug!("Cancelling in-flight drain");
            token.cancel();
        }
    }

    /// Stop [`run`](Self::run) and any pass in flight.
    pub fn shutdown(&self) {
        self.shutdown.cancel();
    }

    /// Drain whenever `connectivity` turns online; cancel the pass in flight
    /// when it turns offline. Returns on [`shutdown`](Self::shutdown) or when
    /// the connectivity sender is dropped.
    pub async fn run(&self, mut connectivity: watch::Receiver<Connectivity>) {
        let mut drain_requested = connectivity.borrow_and_update().is_online();

        loop {
            if drain_requested && !self.shutdown.is_cancelled() {
                drain_requested = self.drain_while_online(&mut connectivity).await;
                if drain_requested {
                    continue;
                }
            }

            tokio::select! {
                _ = self.shutdown.cancelled() => break,
                changed = connectivity.changed() => {
                    if changed.is_err() {
                        debug!("Connectivity signal closed, stopping coordinator");
                        break;
                    }
                    drain_requested = connectivity.borrow_and_update().is_online();
                }
            }
        }
    }

    /// Runs one pass while watching connectivity. Returns true when the pass
    /// was cut short by going offline and the device is back online already.
    async fn drain_while_online(&self, connectivity: &mut watch::Receiver<Connectivity>) -> bool {
        let pass = self.drain_all();
        tokio::pin!(pass);

        let mut interrupted = false;
        let mut signal_open = true;
        let result = loop {
            tokio::select! {
                result = &mut pass => break result,
                changed = connectivity.changed(), if signal_open => {
                    if changed.is_err() {
                        signal_open = false;
                        continue;
                    }
                    if !connectivity.borrow_and_update().is_online() {
                        interrupted = true;
                        self.cancel_current();
                    }
                }
            }
        };

        if let Err(err) = result {
            error!(error = %err, "Sync pass aborted");
        }

        interrupted && signal_open && connectivity.borrow().is_online()
    }

    fn set_in_flight(&self, token: Option<CancellationToken>) {
        let mut guard = self
            .in_flight
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *guard = token;
    }
}
