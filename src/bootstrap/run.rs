//! Startup entry point: config, tracing, then wiring.

use std::path::PathBuf;

use anyhow::Context;
use fq_core::QueueConfig;
use tracing::info;

use super::config::{load_config, resolve};
use super::tracing::init_tracing_subscriber;
use super::wiring::{wire_offline_queues, OfflineQueues, RemoteDeps};

/// Bring the offline queues up.
///
/// Without a config file every value takes its default. Logs go to stdout and
/// to `<data_dir>/logs`. Call once per process: the tracing subscriber is
/// global.
pub fn start(config_path: Option<PathBuf>, remotes: RemoteDeps) -> anyhow::Result<OfflineQueues> {
    let config = match config_path {
        Some(path) => load_config(path)?,
        None => QueueConfig::empty(),
    };
    let resolved = resolve(&config)?;

    init_tracing_subscriber(Some(&resolved.logs_dir()))
        .context("Failed to initialize tracing")?;
    info!(
        namespace = %resolved.namespace,
        data_dir = %resolved.data_dir.display(),
        policy = ?resolved.drain_policy,
        "Offline queues starting"
    );

    Ok(wire_offline_queues(&resolved, remotes))
}
