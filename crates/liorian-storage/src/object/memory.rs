//! In-memory object store used for tests, local runs and when S3 is off.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use liorian_core::error::AppError;
use liorian_core::result::AppResult;
use liorian_core::traits::{Clock, ObjectMeta, ObjectStore, SystemClock};

use super::common_prefix;

#[derive(Debug, Clone)]
struct StoredObject {
    data: Bytes,
    content_type: String,
    last_modified: DateTime<Utc>,
}

/// Object store held in a sorted map. Clones share the same objects.
#[derive(Debug, Clone)]
pub struct MemoryObjectStore {
    bucket: String,
    objects: Arc<RwLock<BTreeMap<String, StoredObject>>>,
    clock: Arc<dyn Clock>,
}

impl MemoryObjectStore {
    /// Create an empty store named `bucket`, stamped by the system clock.
    pub fn new(bucket: impl Into<String>) -> Self {
        Self::with_clock(bucket, Arc::new(SystemClock))
    }

    /// Create an empty store whose last-modified stamps come from `clock`.
    pub fn with_clock(bucket: impl Into<String>, clock: Arc<dyn Clock>) -> Self {
        Self {
            bucket: bucket.into(),
            objects: Arc::new(RwLock::new(BTreeMap::new())),
            clock,
        }
    }

    /// Number of stored objects.
    pub async fn len(&self) -> usize {
        self.objects.read().await.len()
    }

    /// Whether the store holds no objects.
    pub async fn is_empty(&self) -> bool {
        self.objects.read().await.is_empty()
    }

    /// Content type recorded for `key`.
    pub async fn content_type(&self, key: &str) -> Option<String> {
        self.objects
            .read()
            .await
            .get(key)
            .map(|o| o.content_type.clone())
    }
}

#[async_trait]
impl ObjectStore for MemoryObjectStore {
    fn provider_type(&self) -> &str {
        "memory"
    }

    async fn put(&self, key: &str, data: Bytes, content_type: &str) -> AppResult<()> {
        let object = StoredObject {
            data,
            content_type: content_type.to_string(),
            last_modified: self.clock.now(),
        };
        self.objects.write().await.insert(key.to_string(), object);
        Ok(())
    }

    async fn get(&self, key: &str) -> AppResult<Bytes> {
        self.objects
            .read()
            .await
            .get(key)
            .map(|o| o.data.clone())
            .ok_or_else(|| AppError::not_found(format!("Object '{key}' not found")))
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        self.objects.write().await.remove(key);
        Ok(())
    }

    async fn list(&self, prefix: &str) -> AppResult<Vec<ObjectMeta>> {
        let objects = self.objects.read().await;
        Ok(objects
            .range(prefix.to_string()..)
            .take_while(|(key, _)| key.starts_with(prefix))
            .map(|(key, object)| ObjectMeta {
                key: key.clone(),
                size_bytes: object.data.len() as u64,
                last_modified: Some(object.last_modified),
            })
            .collect())
    }

    async fn list_prefixes(&self, prefix: &str) -> AppResult<Vec<String>> {
        let objects = self.objects.read().await;
        let prefixes: BTreeSet<String> = objects
            .keys()
            .filter_map(|key| common_prefix(prefix, key))
            .collect();
        Ok(prefixes.into_iter().collect())
    }

    fn object_url(&self, key: &str) -> String {
        format!("memory://{}/{}", self.bucket, key)
    }
}
