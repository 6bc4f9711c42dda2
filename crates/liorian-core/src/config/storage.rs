//! Storage configuration: the key-value store and the S3 object store.

use serde::{Deserialize, Serialize};

/// Top-level storage configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Key-value store settings.
    #[serde(default)]
    pub kv: KvStorageConfig,
    /// S3 object storage settings.
    #[serde(default)]
    pub s3: S3StorageConfig,
}

/// Key-value store configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KvStorageConfig {
    /// Backend: `"file"` (JSON file on disk) or `"memory"`.
    #[serde(default = "default_kv_provider")]
    pub provider: String,
    /// Path of the JSON file for the `file` backend.
    #[serde(default = "default_kv_path")]
    pub path: String,
}

impl Default for KvStorageConfig {
    fn default() -> Self {
        Self {
            provider: default_kv_provider(),
            path: default_kv_path(),
        }
    }
}

/// S3 object storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct S3StorageConfig {
    /// Whether S3 is used. When disabled an in-memory object store is used.
    #[serde(default)]
    pub enabled: bool,
    /// Custom endpoint URL (MinIO and other S3-compatible services).
    #[serde(default)]
    pub endpoint: String,
    /// AWS region.
    #[serde(default = "default_region")]
    pub region: String,
    /// Bucket name.
    #[serde(default)]
    pub bucket: String,
    /// Access key ID.
    #[serde(default)]
    pub access_key: String,
    /// Secret access key.
    #[serde(default)]
    pub secret_key: String,
}

impl Default for S3StorageConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            endpoint: String::new(),
            region: default_region(),
            bucket: String::new(),
            access_key: String::new(),
            secret_key: String::new(),
        }
    }
}

impl S3StorageConfig {
    /// Overlay `AWS_REGION`, `AWS_ACCESS_KEY_ID`, `AWS_SECRET_ACCESS_KEY`
    /// and `AWS_S3_BUCKET`. A bucket from the environment enables S3.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(region) = lookup("AWS_REGION").filter(|v| !v.is_empty()) {
            self.region = region;
        }
        if let Some(key) = lookup("AWS_ACCESS_KEY_ID").filter(|v| !v.is_empty()) {
            self.access_key = key;
        }
        if let Some(secret) = lookup("AWS_SECRET_ACCESS_KEY").filter(|v| !v.is_empty()) {
            self.secret_key = secret;
        }
        if let Some(bucket) = lookup("AWS_S3_BUCKET").filter(|v| !v.is_empty()) {
            self.bucket = bucket;
            self.enabled = true;
        }
    }
}

fn default_kv_provider() -> String {
    "file".to_string()
}

fn default_kv_path() -> String {
    "./data/storage.json".to_string()
}

fn default_region() -> String {
    "us-east-1".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aws_env_overlay() {
        let mut s3 = S3StorageConfig::default();
        s3.apply_env(|name| match name {
            "AWS_REGION" => Some("eu-west-2".to_string()),
            "AWS_S3_BUCKET" => Some("liorian-training".to_string()),
            _ => None,
        });
        assert_eq!(s3.region, "eu-west-2");
        assert_eq!(s3.bucket, "liorian-training");
        assert!(s3.enabled);
        assert!(s3.access_key.is_empty());
    }

    #[test]
    fn test_empty_env_values_ignored() {
        let mut s3 = S3StorageConfig::default();
        s3.apply_env(|_| Some(String::new()));
        assert_eq!(s3.region, "us-east-1");
        assert!(!s3.enabled);
    }
}
