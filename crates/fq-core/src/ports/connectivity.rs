use serde::{Deserialize, Serialize};
use tokio::sync::watch;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Connectivity {
    Online,
    Offline,
}

impl Connectivity {
    pub fn is_online(self) -> bool {
        matches!(self, Connectivity::Online)
    }
}

/// Connectivity signal published by the platform (browser `online`/`offline`
/// events, OS network monitor, ...).
pub trait ConnectivityPort: Send + Sync {
    fn current(&self) -> Connectivity;

    fn subscribe(&self) -> watch::Receiver<Connectivity>;
}
