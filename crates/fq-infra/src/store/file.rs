use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use fq_core::ports::{DurableStorePort, StorageKey, StoreError};
use tracing::debug;

/// Durable store keeping one `<key>.json` file per key inside a directory.
///
/// Writes go to a temporary sibling first and are renamed over the target, so
/// the file always holds either the previous blob or the complete new one.
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Creates a FileStore rooted at `dir`. The directory is created lazily on
    /// the first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file backing `key`. Characters outside `[A-Za-z0-9_-]` are
    /// replaced so a key can never escape the directory.
    pub fn path_for(&self, key: &StorageKey) -> PathBuf {
        let file_stem: String = key
            .as_str()
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.dir.join(format!("{file_stem}.json"))
    }

    fn atomic_write(&self, path: &Path, content: &str) -> Result<(), StoreError> {
        fs::create_dir_all(&self.dir).map_err(|e| {
            map_io(e, format!("create queue dir failed: {}", self.dir.display()))
        })?;

        let tmp_path = path.with_extension(format!("json.{}.tmp", std::process::id()));
        let write_tmp = || -> io::Result<()> {
            let mut file = fs::File::create(&tmp_path)?;
            file.write_all(content.as_bytes())?;
            file.sync_all()
        };
        if let Err(e) = write_tmp() {
            let _ = fs::remove_file(&tmp_path);
            return Err(map_io(
                e,
                format!("write temp queue blob failed: {}", tmp_path.display()),
            ));
        }

        fs::rename(&tmp_path, path).map_err(|e| {
            let _ = fs::remove_file(&tmp_path);
            map_io(
                e,
                format!(
                    "rename temp queue blob to target failed: {} -> {}",
                    tmp_path.display(),
                    path.display()
                ),
            )
        })
    }
}

impl DurableStorePort for FileStore {
    fn read(&self, key: &StorageKey) -> Result<Option<String>, StoreError> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(map_io(
                e,
                format!("read queue blob failed: {}", path.display()),
            )),
        }
    }

    fn write(&self, key: &StorageKey, blob: &str) -> Result<(), StoreError> {
        let path = self.path_for(key);
        self.atomic_write(&path, blob)?;
        debug!(key = %key, path = %path.display(), bytes = blob.len(), "Queue blob written");
        Ok(())
    }
}

fn map_io(err: io::Error, context: String) -> StoreError {
    if is_storage_full(&err) {
        StoreError::QuotaExceeded(format!("{context}: {err}"))
    } else {
        StoreError::Io(format!("{context}: {err}"))
    }
}

#[cfg(unix)]
fn is_storage_full(err: &io::Error) -> bool {
    // ENOSPC / EDQUOT
    matches!(err.raw_os_error(), Some(28) | Some(122))
}

#[cfg(windows)]
fn is_storage_full(err: &io::Error) -> bool {
    // ERROR_HANDLE_DISK_FULL / ERROR_DISK_FULL
    matches!(err.raw_os_error(), Some(39) | Some(112))
}

#[cfg(not(any(unix, windows)))]
fn is_storage_full(_err: &io::Error) -> bool {
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn key() -> StorageKey {
        StorageKey::namespaced("maechaem", "offline_queue")
    }

    #[test]
    fn missing_file_reads_as_none() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path().join("not-yet-created"));
        assert_eq!(store.read(&key()).unwrap(), None);
    }

    #[test]
    fn write_creates_dir_and_persists_blob() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path().join("queue"));

        store.write(&key(), r#"[{"id":"a"}]"#).unwrap();

        let path = store.path_for(&key());
        assert!(path.ends_with("maechaem_offline_queue.json"));
        assert_eq!(fs::read_to_string(&path).unwrap(), r#"[{"id":"a"}]"#);
        assert_eq!(
            store.read(&key()).unwrap().as_deref(),
            Some(r#"[{"id":"a"}]"#)
        );
    }

    #[test]
    fn write_leaves_no_temp_files_behind() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path());

        store.write(&key(), "[]").unwrap();
        store.write(&key(), "[1]").unwrap();

        let names: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().into_string().unwrap())
            .collect();
        assert_eq!(names, vec!["maechaem_offline_queue.json".to_string()]);
    }

    #[test]
    fn keys_cannot_escape_the_directory() {
        let store = FileStore::new("/data/queue");
        let path = store.path_for(&StorageKey::namespaced("..", "/etc/passwd"));
        assert_eq!(path, PathBuf::from("/data/queue/____etc_passwd.json"));
    }

    #[test]
    fn non_utf8_file_is_a_read_error() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path());
        fs::write(store.path_for(&key()), [0xff, 0xfe, 0x00]).unwrap();

        assert!(matches!(store.read(&key()), Err(StoreError::Io(_))));
    }
}
