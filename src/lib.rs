//! # fieldqueue
//!
//! Offline write queue for field data collection: writes made without network
//! are kept durably on the device and replayed in order once connectivity
//! returns.
//!
//! The domain lives in `fq-core`, adapters in `fq-infra` and the sync use
//! cases in `fq-app`. This crate only loads configuration, installs tracing
//! and wires the pieces together.

pub mod bootstrap;

pub use bootstrap::{
    init_tracing_subscriber, load_config, resolve, start, wire_offline_queues, wire_with_store,
    OfflineQueues, RemoteDeps, ResolvedConfig,
};
