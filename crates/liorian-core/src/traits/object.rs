//! Object store trait for blob backends (S3 and in-memory).

use async_trait::async_trait;
use bytes::Bytes;
use chrono::{DateTime, Utc};

use crate::result::AppResult;

/// Metadata about a stored object.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ObjectMeta {
    /// Full object key.
    pub key: String,
    /// Size in bytes.
    pub size_bytes: u64,
    /// Last modified timestamp (if reported by the backend).
    pub last_modified: Option<DateTime<Utc>>,
}

/// Trait for blob storage backends.
///
/// Keys are `/`-separated paths. Listing returns every match; backends
/// that page their results must follow continuation tokens to the end.
#[async_trait]
pub trait ObjectStore: Send + Sync + std::fmt::Debug + 'static {
    /// Return the provider type name (e.g., "s3", "memory").
    fn provider_type(&self) -> &str;

    /// Write an object, replacing any existing one.
    async fn put(&self, key: &str, data: Bytes, content_type: &str) -> AppResult<()>;

    /// Read an object. Missing objects yield a not-found error.
    async fn get(&self, key: &str) -> AppResult<Bytes>;

    /// Delete an object. Deleting a missing object is not an error.
    async fn delete(&self, key: &str) -> AppResult<()>;

    /// List all objects whose key starts with `prefix`, sorted by key.
    async fn list(&self, prefix: &str) -> AppResult<Vec<ObjectMeta>>;

    /// List the distinct "directories" directly below `prefix`
    /// (S3 common prefixes with `/` as delimiter), each ending in `/`.
    async fn list_prefixes(&self, prefix: &str) -> AppResult<Vec<String>>;

    /// Public URL of an object.
    fn object_url(&self, key: &str) -> String;
}
