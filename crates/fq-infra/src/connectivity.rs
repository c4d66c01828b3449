use fq_core::ports::{Connectivity, ConnectivityPort};
use tokio::sync::watch;
use tracing::info;

/// Connectivity signal fed by whatever observes the network (a platform
/// listener, a health probe, or a test).
pub struct WatchConnectivity {
    sender: watch::Sender<Connectivity>,
}

impl WatchConnectivity {
    pub fn new(initial: Connectivity) -> Self {
        let (sender, _) = watch::channel(initial);
        Self { sender }
    }

    /// Publish a new connectivity state. Repeating the current state does not
    /// wake subscribers.
    pub fn set(&self, state: Connectivity) {
        let changed = self.sender.send_if_modified(|current| {
            if *current == state {
                false
            } else {
                *current = state;
                true
            }
        });
        if changed {
            info!(connectivity = ?state, "Connectivity changed");
        }
    }
}

impl ConnectivityPort for WatchConnectivity {
    fn current(&self) -> Connectivity {
        *self.sender.borrow()
    }

    fn subscribe(&self) -> watch::Receiver<Connectivity> {
        self.sender.subscribe()
    }
}
