//! Drain passes against a file-backed queue with a mocked remote API.

use std::sync::{Arc, Once};
use std::time::Duration;

use async_trait::async_trait;
use fq_app::{DrainOptions, SubmitOrEnqueueUseCase, SyncCoordinator, SyncDeps, WriteOutcome};
use fq_core::ports::{Connectivity, ConnectivityPort, RemoteSubmitPort, SubmitError};
use fq_core::{
    DrainPolicy, ImageUploadQueue, MutationQueue, PendingAction, PendingImageUpload, StorageKey,
};
use fq_infra::{FileStore, SystemClock, UuidIdGenerator, WatchConnectivity};
use mockall::{mock, Sequence};
use serde_json::json;
use tempfile::TempDir;

mock! {
    ActionRemote {}

    #[async_trait]
    impl RemoteSubmitPort<PendingAction> for ActionRemote {
        async fn submit(&self, payload: &PendingAction) -> Result<(), SubmitError>;
    }
}

mock! {
    ImageRemote {}

    #[async_trait]
    impl RemoteSubmitPort<PendingImageUpload> for ImageRemote {
        async fn submit(&self, payload: &PendingImageUpload) -> Result<(), SubmitError>;
    }
}

static INIT: Once = Once::new();

fn init_tracing() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::new("debug"))
            .with_test_writer()
            .try_init();
    });
}

fn open_queues(dir: &TempDir) -> (Arc<MutationQueue>, Arc<ImageUploadQueue>) {
    let store = Arc::new(FileStore::new(dir.path()));
    let actions = Arc::new(MutationQueue::new(
        StorageKey::namespaced("maechaem", "offline_queue"),
        store.clone(),
        Arc::new(UuidIdGenerator),
        Arc::new(SystemClock),
    ));
    let images = Arc::new(ImageUploadQueue::new(
        StorageKey::namespaced("maechaem", "offline_image_queue"),
        store,
        Arc::new(UuidIdGenerator),
        Arc::new(SystemClock),
    ));
    (actions, images)
}

fn coordinator(
    actions: Arc<MutationQueue>,
    images: Arc<ImageUploadQueue>,
    action_remote: MockActionRemote,
    policy: DrainPolicy,
) -> SyncCoordinator {
    let mut image_remote = MockImageRemote::new();
    image_remote.expect_submit().never();

    SyncCoordinator::new(SyncDeps {
        action_queue: actions,
        image_queue: images,
        action_remote: Arc::new(action_remote),
        image_remote: Arc::new(image_remote),
        options: DrainOptions {
            policy,
            submit_timeout: Duration::from_secs(5),
        },
    })
}

#[tokio::test]
async fn failed_entry_keeps_its_place_for_the_next_pass() {
    init_tracing();
    let dir = TempDir::new().unwrap();
    let (actions, images) = open_queues(&dir);
    for n in 1..=3 {
        actions.enqueue_action(json!({"n": n}), format!("edit {n}")).unwrap();
    }

    let mut seq = Sequence::new();
    let mut remote = MockActionRemote::new();
    remote
        .expect_submit()
        .withf(|action| action.description == "edit 1")
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_| Ok(()));
    remote
        .expect_submit()
        .withf(|action| action.description == "edit 2")
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_| Err(SubmitError::Network("connection reset".into())));
    remote
        .expect_submit()
        .withf(|action| action.description == "edit 3")
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_| Ok(()));

    let coordinator = coordinator(actions.clone(), images, remote, DrainPolicy::ContinueOnFailure);
    let report = coordinator.drain_all().await.unwrap().unwrap();

    assert_eq!(report.actions.attempted, 3);
    assert_eq!(report.actions.confirmed.len(), 2);
    assert_eq!(report.actions.failed.len(), 1);
    assert_eq!(report.actions.remaining, 1);

    let (reopened, _) = open_queues(&dir);
    let left: Vec<_> = reopened
        .list()
        .into_iter()
        .map(|entry| entry.payload.description)
        .collect();
    assert_eq!(left, vec!["edit 2"]);
    assert_eq!(coordinator.subscribe_status().borrow().total(), 1);
}

#[tokio::test]
async fn halt_policy_stops_at_first_failure() {
    init_tracing();
    let dir = TempDir::new().unwrap();
    let (actions, images) = open_queues(&dir);
    for n in 1..=3 {
        actions.enqueue_action(json!({"n": n}), format!("edit {n}")).unwrap();
    }

    let mut remote = MockActionRemote::new();
    remote
        .expect_submit()
        .times(2)
        .returning(|action| {
            if action.description == "edit 2" {
                Err(SubmitError::Rejected("503".into()))
            } else {
                Ok(())
            }
        });

    let coordinator = coordinator(actions.clone(), images, remote, DrainPolicy::HaltOnFailure);
    coordinator.drain_all().await.unwrap().unwrap();

    let left: Vec<_> = actions
        .list()
        .into_iter()
        .map(|entry| entry.payload.description)
        .collect();
    assert_eq!(left, vec!["edit 2", "edit 3"]);
}

#[tokio::test]
async fn offline_write_is_queued_then_drained() {
    init_tracing();
    let dir = TempDir::new().unwrap();
    let (actions, images) = open_queues(&dir);
    let connectivity = Arc::new(WatchConnectivity::new(Connectivity::Offline));

    let mut direct = MockActionRemote::new();
    direct.expect_submit().never();
    let writer = SubmitOrEnqueueUseCase::new(
        actions.clone(),
        Arc::new(direct),
        connectivity.clone(),
        Duration::from_secs(5),
    );
    let outcome = writer
        .execute(PendingAction::new(json!({"plot": "P-02"}), "new plot"))
        .await
        .unwrap();
    let WriteOutcome::Queued(id) = outcome else {
        panic!("expected the write to be queued, got {outcome:?}");
    };

    let mut remote = MockActionRemote::new();
    remote
        .expect_submit()
        .withf(|action| action.payload == json!({"plot": "P-02"}))
        .times(1)
        .returning(|_| Ok(()));
    let coordinator = Arc::new(coordinator(
        actions.clone(),
        images,
        remote,
        DrainPolicy::ContinueOnFailure,
    ));

    let runner = tokio::spawn({
        let coordinator = coordinator.clone();
        let rx = connectivity.subscribe();
        async move { coordinator.run(rx).await }
    });
    let mut status = coordinator.subscribe_status();
    connectivity.set(Connectivity::Online);

    tokio::time::timeout(Duration::from_secs(5), async {
        while !status.borrow_and_update().is_synced() {
            status.changed().await.unwrap();
        }
    })
    .await
    .unwrap();

    assert!(actions.get(&id).is_none());
    coordinator.shutdown();
    runner.await.unwrap();
}
