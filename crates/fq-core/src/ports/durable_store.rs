use std::fmt::{Display, Formatter};

use thiserror::Error;

/// Durable store errors.
///
/// 持久化存储错误类型。
#[derive(Debug, Error)]
pub enum StoreError {
    /// The underlying medium could not be read or written.
    ///
    /// 底层介质读写失败。
    #[error("durable store io failed: {0}")]
    Io(String),

    /// The medium refused the write because it is full.
    ///
    /// 存储空间不足，写入被拒绝。
    #[error("durable store quota exceeded: {0}")]
    QuotaExceeded(String),

    /// The store is not available in this context.
    ///
    /// 当前上下文中存储不可用。
    #[error("durable store unavailable: {0}")]
    Unavailable(String),
}

/// Namespaced key under which one queue blob is stored.
///
/// Keys are `<namespace>_<name>`, so the namespace `maechaem` and the name
/// `offline_queue` address `maechaem_offline_queue`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StorageKey(String);

impl StorageKey {
    pub fn namespaced(namespace: &str, name: &str) -> Self {
        if namespace.is_empty() {
            Self(name.to_string())
        } else {
            Self(format!("{namespace}_{name}"))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for StorageKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Key-value persistence surface holding one serialized blob per key.
///
/// Implementations must be callable from several contexts at once but are not
/// required to provide transactions across them: two writers racing on the
/// same key may lose one update.
///
/// 键值持久化端口：每个 key 保存一个完整的序列化数据块。
pub trait DurableStorePort: Send + Sync {
    /// Read the blob stored under `key`, or `None` if nothing was written yet.
    fn read(&self, key: &StorageKey) -> Result<Option<String>, StoreError>;

    /// Replace the blob stored under `key`.
    fn write(&self, key: &StorageKey, blob: &str) -> Result<(), StoreError>;
}

#[cfg(test)]
mockall::mock! {
    pub DurableStore {}

    impl DurableStorePort for DurableStore {
        fn read(&self, key: &StorageKey) -> Result<Option<String>, StoreError>;
        fn write(&self, key: &StorageKey, blob: &str) -> Result<(), StoreError>;
    }
}
