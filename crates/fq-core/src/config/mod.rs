//! # Pure Data Module / 纯数据模块 - Data Transfer Objects Only
//!
//! ## Responsibilities / 职责
//!
//! - ✅ Define queue configuration data structures / 定义队列配置数据结构
//! - ✅ Provide TOML → DTO mapping / 提供 TOML → DTO 的映射
//!
//! ## Prohibited / 禁止事项
//!
//! ❌ **No default value calculation / 禁止默认值计算** - defaults are applied at bootstrap
//!
//! ## Iron Rule / 铁律
//!
//! > **Missing values are facts, not errors.**

use std::path::PathBuf;

/// What a drain pass does after one entry fails to submit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DrainPolicy {
    /// Keep the failed entry queued and move on to the next one. Later
    /// writes may reach the remote before the failed one.
    ContinueOnFailure,
    /// Keep the failed entry and everything behind it for the next pass, so
    /// the remote sees writes strictly in enqueue order.
    #[default]
    HaltOnFailure,
}

impl DrainPolicy {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "continue" => Some(Self::ContinueOnFailure),
            "halt" => Some(Self::HaltOnFailure),
            _ => None,
        }
    }
}

/// How entry identifiers are generated. Chosen once at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IdStrategy {
    /// Random UUID when the OS random source works, timestamp fallback otherwise.
    #[default]
    Auto,
    Uuid,
    Timestamp,
}

impl IdStrategy {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "auto" => Some(Self::Auto),
            "uuid" => Some(Self::Uuid),
            "timestamp" => Some(Self::Timestamp),
            _ => None,
        }
    }
}

/// Queue configuration DTO (pure data, no logic)
/// 队列配置 DTO（纯数据，无逻辑）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueConfig {
    /// Storage key namespace (may be empty)
    pub namespace: String,

    /// Directory holding the queue blobs (path info only, no existence check)
    pub data_dir: PathBuf,

    /// Per-entry submit timeout; 0 when not configured
    pub submit_timeout_ms: u64,

    /// Raw drain policy string, e.g. `continue` or `halt`
    pub drain_policy: String,

    /// Raw id strategy string, e.g. `auto`, `uuid` or `timestamp`
    pub id_strategy: String,
}

impl QueueConfig {
    /// Create QueueConfig from TOML value
    /// 从 TOML 值创建 QueueConfig
    pub fn from_toml(toml_value: &toml::Value) -> anyhow::Result<Self> {
        let str_at = |section: &str, field: &str| {
            toml_value
                .get(section)
                .and_then(|s| s.get(field))
                .and_then(|v| v.as_str())
                .unwrap_or("")
                .to_string()
        };

        Ok(Self {
            namespace: str_at("storage", "namespace"),
            data_dir: PathBuf::from(str_at("storage", "data_dir")),
            submit_timeout_ms: toml_value
                .get("sync")
                .and_then(|s| s.get("submit_timeout_ms"))
                .and_then(|v| v.as_integer())
                .map(|v| v.max(0) as u64)
                .unwrap_or(0),
            drain_policy: str_at("sync", "drain_policy"),
            id_strategy: str_at("ids", "strategy"),
        })
    }

    /// Create empty QueueConfig (all empty/default values)
    pub fn empty() -> Self {
        Self {
            namespace: String::new(),
            data_dir: PathBuf::new(),
            submit_timeout_ms: 0,
            drain_policy: String::new(),
            id_strategy: String::new(),
        }
    }
}
