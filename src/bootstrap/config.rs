//! # Configuration Loader / 配置加载器
//!
//! ## Responsibilities / 职责
//!
//! - ✅ Read TOML configuration files / 读取 TOML 配置文件
//! - ✅ Parse TOML into the QueueConfig DTO / 将 TOML 解析为 QueueConfig DTO
//! - ✅ Resolve missing facts to runtime defaults / 为缺失的值补全运行时默认值
//!
//! Loading accepts whatever is in the file; defaults are applied only in
//! [`resolve`].

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use fq_app::usecases::drain_queue::DEFAULT_SUBMIT_TIMEOUT;
use fq_app::DrainOptions;
use fq_core::config::{DrainPolicy, IdStrategy, QueueConfig};
use fq_core::queue::DEFAULT_NAMESPACE;
use tracing::warn;

/// Load configuration from a TOML file
/// 从 TOML 文件加载配置
///
/// **NO validation is performed**: empty strings and unknown policy names are
/// kept as they are and only interpreted by [`resolve`].
///
/// # Errors / 错误
///
/// Returns error if the file cannot be read or is not valid TOML.
pub fn load_config(config_path: PathBuf) -> anyhow::Result<QueueConfig> {
    let content = std::fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;
    let toml_value: toml::Value =
        toml::from_str(&content).context("Failed to parse config as TOML")?;
    QueueConfig::from_toml(&toml_value)
}

/// Configuration with every default applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    pub namespace: String,
    pub data_dir: PathBuf,
    pub submit_timeout: Duration,
    pub drain_policy: DrainPolicy,
    pub id_strategy: IdStrategy,
}

impl ResolvedConfig {
    pub fn drain_options(&self) -> DrainOptions {
        DrainOptions {
            policy: self.drain_policy,
            submit_timeout: self.submit_timeout,
        }
    }

    /// Queue blobs live in `<data_dir>/queue`.
    pub fn queue_dir(&self) -> PathBuf {
        self.data_dir.join("queue")
    }

    pub fn logs_dir(&self) -> PathBuf {
        self.data_dir.join("logs")
    }
}

/// Fill in defaults for every missing fact.
///
/// Unknown policy or strategy names fall back to the default with a warning.
/// Fails only when no data directory is configured and the platform has none.
pub fn resolve(config: &QueueConfig) -> anyhow::Result<ResolvedConfig> {
    let namespace = if config.namespace.trim().is_empty() {
        DEFAULT_NAMESPACE.to_string()
    } else {
        config.namespace.trim().to_string()
    };

    let data_dir = if config.data_dir.as_os_str().is_empty() {
        fq_infra::fs::app_data_dir().context("No data_dir configured")?
    } else {
        config.data_dir.clone()
    };

    let submit_timeout = if config.submit_timeout_ms == 0 {
        DEFAULT_SUBMIT_TIMEOUT
    } else {
        Duration::from_millis(config.submit_timeout_ms)
    };

    Ok(ResolvedConfig {
        namespace,
        data_dir,
        submit_timeout,
        drain_policy: parse_or_default(&config.drain_policy, "sync.drain_policy", DrainPolicy::parse),
        id_strategy: parse_or_default(&config.id_strategy, "ids.strategy", IdStrategy::parse),
    })
}

fn parse_or_default<T: Default>(raw: &str, field: &str, parse: fn(&str) -> Option<T>) -> T {
    if raw.trim().is_empty() {
        return T::default();
    }
    parse(raw).unwrap_or_else(|| {
        warn!(field, value = raw, "Unknown config value, using default");
        T::default()
    })
}
