pub mod config;
pub mod run;
pub mod tracing;
pub mod wiring;

pub use self::config::{load_config, resolve, ResolvedConfig};
pub use self::run::start;
pub use self::tracing::init_tracing_subscriber;
pub use self::wiring::{wire_offline_queues, wire_with_store, OfflineQueues, RemoteDeps};
