//! S3 object store built on the AWS SDK.

use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_s3::Client;
use aws_sdk_s3::config::Credentials;
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::primitives::ByteStream;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use tracing::{debug, info};

use liorian_core::config::storage::S3StorageConfig;
use liorian_core::error::AppError;
use liorian_core::result::AppResult;
use liorian_core::traits::{ObjectMeta, ObjectStore};

/// S3 (or S3-compatible) object store.
#[derive(Debug, Clone)]
pub struct S3ObjectStore {
    client: Client,
    bucket: String,
    region: String,
    endpoint: Option<String>,
}

impl S3ObjectStore {
    /// Build a client from configuration.
    ///
    /// Explicit keys take precedence over the default AWS credential chain.
    /// A custom endpoint switches to path-style addressing.
    pub async fn new(config: &S3StorageConfig) -> AppResult<Self> {
        if config.bucket.is_empty() {
            return Err(AppError::configuration("S3 bucket name is not set"));
        }

        info!(
            region = %config.region,
            bucket = %config.bucket,
            endpoint = %config.endpoint,
            "Initializing S3 object store"
        );

        let mut loader =
            aws_config::defaults(BehaviorVersion::latest()).region(Region::new(config.region.clone()));
        if !config.access_key.is_empty() && !config.secret_key.is_empty() {
            loader = loader.credentials_provider(Credentials::new(
                config.access_key.clone(),
                config.secret_key.clone(),
                None,
                None,
                "liorian-config",
            ));
        }
        let shared = loader.load().await;

        let mut builder = aws_sdk_s3::config::Builder::from(&shared);
        let endpoint = (!config.endpoint.is_empty()).then(|| config.endpoint.clone());
        if let Some(url) = &endpoint {
            builder = builder.endpoint_url(url).force_path_style(true);
        }

        Ok(Self {
            client: Client::from_conf(builder.build()),
            bucket: config.bucket.clone(),
            region: config.region.clone(),
            endpoint,
        })
    }

    /// Bucket this store writes to.
    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    /// Check that the bucket is reachable with the configured credentials.
    pub async fn health_check(&self) -> AppResult<()> {
        self.client
            .head_bucket()
            .bucket(&self.bucket)
            .send()
            .await
            .map_err(|e| {
                AppError::external(format!("S3 head_bucket failed: {}", DisplayErrorContext(&e)))
            })?;
        Ok(())
    }
}

fn to_chrono(ts: &aws_sdk_s3::primitives::DateTime) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(ts.secs(), ts.subsec_nanos())
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    fn provider_type(&self) -> &str {
        "s3"
    }

    async fn put(&self, key: &str, data: Bytes, content_type: &str) -> AppResult<()> {
        debug!(key, bytes = data.len(), "S3 put");
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .content_type(content_type)
            .body(ByteStream::from(data))
            .send()
            .await
            .map_err(|e| {
                AppError::external(format!("S3 put '{key}' failed: {}", DisplayErrorContext(&e)))
            })?;
        Ok(())
    }

    async fn get(&self, key: &str) -> AppResult<Bytes> {
        let output = match self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
        {
            Ok(output) => output,
            Err(e) => {
                let service = e.into_service_error();
                if service.is_no_such_key() {
                    return Err(AppError::not_found(format!("Object '{key}' not found")));
                }
                return Err(AppError::external(format!(
                    "S3 get '{key}' failed: {}",
                    DisplayErrorContext(&service)
                )));
            }
        };

        let body = output.body.collect().await.map_err(|e| {
            AppError::external(format!("S3 read body '{key}' failed: {e}"))
        })?;
        Ok(body.into_bytes())
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| {
                AppError::external(format!("S3 delete '{key}' failed: {}", DisplayErrorContext(&e)))
            })?;
        Ok(())
    }

    async fn list(&self, prefix: &str) -> AppResult<Vec<ObjectMeta>> {
        let mut objects = Vec::new();
        let mut token: Option<String> = None;

        loop {
            let page = self
                .client
                .list_objects_v2()
                .bucket(&self.bucket)
                .prefix(prefix)
                .set_continuation_token(token.take())
                .send()
                .await
                .map_err(|e| {
                    AppError::external(format!(
                        "S3 list '{prefix}' failed: {}",
                        DisplayErrorContext(&e)
                    ))
                })?;

            for object in page.contents() {
                let Some(key) = object.key() else { continue };
                objects.push(ObjectMeta {
                    key: key.to_string(),
                    size_bytes: object.size().unwrap_or(0).max(0) as u64,
                    last_modified: object.last_modified().and_then(to_chrono),
                });
            }

            match (page.is_truncated(), page.next_continuation_token()) {
                (Some(true), Some(next)) => token = Some(next.to_string()),
                _ => break,
            }
        }

        objects.sort_by(|a, b| a.key.cmp(&b.key));
        debug!(prefix, count = objects.len(), "S3 list complete");
        Ok(objects)
    }

    async fn list_prefixes(&self, prefix: &str) -> AppResult<Vec<String>> {
        let mut prefixes = Vec::new();
        let mut token: Option<String> = None;

        loop {
            let page = self
                .client
                .list_objects_v2()
                .bucket(&self.bucket)
                .prefix(prefix)
                .delimiter("/")
                .set_continuation_token(token.take())
                .send()
                .await
                .map_err(|e| {
                    AppError::external(format!(
                        "S3 list prefixes '{prefix}' failed: {}",
                        DisplayErrorContext(&e)
                    ))
                })?;

            prefixes.extend(
                page.common_prefixes()
                    .iter()
                    .filter_map(|p| p.prefix().map(str::to_string)),
            );

            match (page.is_truncated(), page.next_continuation_token()) {
                (Some(true), Some(next)) => token = Some(next.to_string()),
                _ => break,
            }
        }

        prefixes.sort();
        prefixes.dedup();
        Ok(prefixes)
    }

    fn object_url(&self, key: &str) -> String {
        match &self.endpoint {
            Some(endpoint) => format!("{}/{}/{}", endpoint.trim_end_matches('/'), self.bucket, key),
            None => format!("https://{}.s3.{}.amazonaws.com/{}", self.bucket, self.region, key),
        }
    }
}
