//! JSON-file key-value store.
//!
//! The whole store is one JSON object on disk. Every write rewrites the
//! file through a temporary sibling and a rename, so a crash leaves either
//! the old or the new contents.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use liorian_core::error::AppError;
use liorian_core::result::AppResult;
use liorian_core::traits::KeyValueStore;

/// Key-value store persisted to a single JSON file.
#[derive(Debug)]
pub struct FileKvStore {
    path: PathBuf,
    entries: RwLock<BTreeMap<String, String>>,
}

impl FileKvStore {
    /// Open (or create) the store at `path`.
    ///
    /// A file that cannot be parsed is logged and treated as empty; it is
    /// overwritten on the next write.
    pub async fn open(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await.map_err(|e| {
                    AppError::storage(format!(
                        "Failed to create directory '{}': {e}",
                        parent.display()
                    ))
                })?;
            }
        }

        let entries = match tokio::fs::read_to_string(&path).await {
            Ok(raw) if raw.trim().is_empty() => BTreeMap::new(),
            Ok(raw) => match serde_json::from_str(&raw) {
                Ok(map) => map,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Store file is corrupt, starting empty");
                    BTreeMap::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => {
                return Err(AppError::storage(format!(
                    "Failed to read '{}': {e}",
                    path.display()
                )));
            }
        };

        debug!(path = %path.display(), keys = entries.len(), "Opened file store");

        Ok(Self {
            path,
            entries: RwLock::new(entries),
        })
    }

    /// Location of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn persist(&self, entries: &BTreeMap<String, String>) -> AppResult<()> {
        let json = serde_json::to_string_pretty(entries)?;
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, json).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }

    /// Apply `change` to a copy, persist it, and only then make it visible.
    /// `change` returns `false` when nothing changed.
    async fn commit<F>(&self, change: F) -> AppResult<()>
    where
        F: FnOnce(&mut BTreeMap<String, String>) -> bool,
    {
        let mut entries = self.entries.write().await;
        let mut next = entries.clone();
        if !change(&mut next) {
            return Ok(());
        }
        if let Err(e) = self.persist(&next).await {
            warn!(path = %self.path.display(), error = %e, "Store write failed, keeping previous contents");
            return Err(e);
        }
        *entries = next;
        Ok(())
    }
}

#[async_trait]
impl KeyValueStore for FileKvStore {
    fn provider_type(&self) -> &str {
        "file"
    }

    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> AppResult<()> {
        self.commit(|entries| {
            entries.insert(key.to_string(), value.to_string());
            true
        })
        .await
    }

    async fn remove(&self, key: &str) -> AppResult<()> {
        self.commit(|entries| entries.remove(key).is_some()).await
    }

    async fn keys(&self) -> AppResult<Vec<String>> {
        Ok(self.entries.read().await.keys().cloned().collect())
    }

    async fn clear(&self) -> AppResult<()> {
        self.commit(|entries| {
            entries.clear();
            true
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_values_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("storage.json");

        let store = FileKvStore::open(&path).await.unwrap();
        store.set("liorian_courses", "[]").await.unwrap();
        store.set("userType", "admin").await.unwrap();
        store.remove("userType").await.unwrap();
        drop(store);

        let reopened = FileKvStore::open(&path).await.unwrap();
        assert_eq!(
            reopened.get("liorian_courses").await.unwrap(),
            Some("[]".to_string())
        );
        assert_eq!(reopened.get("userType").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_corrupt_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        tokio::fs::write(&path, "{not json").await.unwrap();

        let store = FileKvStore::open(&path).await.unwrap();
        assert!(store.keys().await.unwrap().is_empty());
        store.set("a", "1").await.unwrap();
        assert_eq!(store.get("a").await.unwrap(), Some("1".to_string()));
    }

    #[tokio::test]
    async fn test_failed_write_leaves_memory_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gone").join("storage.json");
        let store = FileKvStore::open(&path).await.unwrap();
        store.set("userType", "staff").await.unwrap();

        tokio::fs::remove_dir_all(dir.path().join("gone")).await.unwrap();

        assert!(store.set("adminToken", "t").await.is_err());
        assert_eq!(store.get("adminToken").await.unwrap(), None);

        assert!(store.remove("userType").await.is_err());
        assert!(store.clear().await.is_err());
        assert_eq!(store.get("userType").await.unwrap(), Some("staff".to_string()));
        assert_eq!(store.keys().await.unwrap(), vec!["userType".to_string()]);
    }
}
