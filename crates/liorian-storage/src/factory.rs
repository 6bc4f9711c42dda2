//! Build storage backends from configuration.

use std::sync::Arc;

use tracing::{info, warn};

use liorian_core::config::storage::{KvStorageConfig, S3StorageConfig};
use liorian_core::error::AppError;
use liorian_core::result::AppResult;
use liorian_core::traits::{KeyValueStore, ObjectStore};

use crate::kv::{FileKvStore, MemoryKvStore, SerializedStore};
use crate::object::MemoryObjectStore;

/// Build the shared key-value store.
///
/// The backend is wrapped in a [`SerializedStore`], so every caller goes
/// through one writer.
pub async fn build_kv_store(config: &KvStorageConfig) -> AppResult<Arc<dyn KeyValueStore>> {
    let backend: Arc<dyn KeyValueStore> = match config.provider.as_str() {
        "file" => Arc::new(FileKvStore::open(&config.path).await?),
        "memory" => Arc::new(MemoryKvStore::new()),
        other => {
            return Err(AppError::configuration(format!(
                "Unknown key-value provider '{other}' (expected 'file' or 'memory')"
            )));
        }
    };
    info!(provider = %config.provider, "Key-value store ready");
    Ok(Arc::new(SerializedStore::spawn(backend)))
}

/// Build the object store used for training data.
pub async fn build_object_store(config: &S3StorageConfig) -> AppResult<Arc<dyn ObjectStore>> {
    if config.enabled {
        #[cfg(feature = "s3")]
        {
            let store = crate::object::S3ObjectStore::new(config).await?;
            return Ok(Arc::new(store));
        }
        #[cfg(not(feature = "s3"))]
        {
            return Err(AppError::configuration(
                "S3 is enabled but this build lacks the 's3' feature",
            ));
        }
    }

    warn!("S3 is not configured; training data is kept in memory only");
    let bucket = if config.bucket.is_empty() {
        "liorian-local".to_string()
    } else {
        config.bucket.clone()
    };
    Ok(Arc::new(MemoryObjectStore::new(bucket)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_kv_provider() {
        let config = KvStorageConfig {
            provider: "memory".to_string(),
            path: String::new(),
        };
        let store = build_kv_store(&config).await.unwrap();
        assert_eq!(store.provider_type(), "serialized:memory");
    }

    #[tokio::test]
    async fn test_unknown_kv_provider_rejected() {
        let config = KvStorageConfig {
            provider: "redis".to_string(),
            path: String::new(),
        };
        let err = build_kv_store(&config).await.unwrap_err();
        assert!(err.to_string().contains("redis"));
    }

    #[tokio::test]
    async fn test_disabled_s3_falls_back_to_memory() {
        let store = build_object_store(&S3StorageConfig::default()).await.unwrap();
        assert_eq!(store.provider_type(), "memory");
    }
}
