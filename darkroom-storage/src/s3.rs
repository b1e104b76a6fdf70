//! AWS S3 storage backend.

use async_trait::async_trait;
use aws_sdk_s3::{
    Client,
    config::ProvideCredentials,
    error::SdkError,
    primitives::ByteStream,
    types::{Delete, ObjectCannedAcl, ObjectIdentifier, StorageClass},
};
use bytes::Bytes;
use tracing::{debug, info};

use crate::{
    DeleteOutcome, ObjectStore, Result, StoreError, StoredObject, calculate_checksum,
};

/// S3 storage configuration.
#[derive(Debug, Clone)]
pub struct S3Config {
    /// S3 bucket name.
    pub bucket: String,
    /// AWS region, used for URL construction.
    pub region: Option<String>,
    /// Custom endpoint (for S3-compatible services).
    pub endpoint: Option<String>,
    /// Canned ACL for uploaded objects.
    pub default_acl: Option<String>,
    /// Storage class for uploaded objects.
    pub storage_class: Option<String>,
    /// Maximum accepted object size in bytes.
    pub max_object_size: Option<u64>,
}

impl Default for S3Config {
    fn default() -> Self {
        Self {
            bucket: String::new(),
            region: None,
            endpoint: None,
            default_acl: None,
            storage_class: None,
            max_object_size: Some(100 * 1024 * 1024), // 100 MB
        }
    }
}

impl S3Config {
    /// Create configuration for a bucket.
    pub fn new(bucket: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            ..Default::default()
        }
    }

    /// Set the region.
    pub fn region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    /// Set a custom endpoint (for S3-compatible services like MinIO).
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Set the canned ACL.
    pub fn acl(mut self, acl: impl Into<String>) -> Self {
        self.default_acl = Some(acl.into());
        self
    }

    /// Enable public read access.
    pub fn public_read(self) -> Self {
        self.acl("public-read")
    }

    /// Set the storage class.
    pub fn storage_class(mut self, storage_class: impl Into<String>) -> Self {
        self.storage_class = Some(storage_class.into());
        self
    }

    /// Set the maximum accepted object size.
    pub fn max_object_size(mut self, bytes: u64) -> Self {
        self.max_object_size = Some(bytes);
        self
    }
}

/// AWS S3 storage backend.
pub struct S3Store {
    client: Client,
    config: S3Config,
}

impl S3Store {
    /// Create a new S3 storage backend.
    ///
    /// Fails fast: an empty bucket name or unresolved credentials are
    /// reported here, at startup, not on the first upload.
    pub async fn new(config: S3Config) -> Result<Self> {
        if config.bucket.trim().is_empty() {
            return Err(StoreError::Config("S3 bucket name is empty".into()));
        }

        let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;

        let provider = aws_config.credentials_provider().ok_or_else(|| {
            StoreError::Config("no AWS credentials provider configured".into())
        })?;
        provider.provide_credentials().await.map_err(|e| {
            StoreError::Config(format!("AWS credentials unavailable: {e}"))
        })?;

        let mut s3_config = aws_sdk_s3::config::Builder::from(&aws_config);

        if let Some(endpoint) = &config.endpoint {
            s3_config = s3_config.endpoint_url(endpoint);
            s3_config = s3_config.force_path_style(true);
        }

        let client = Client::from_conf(s3_config.build());

        info!(bucket = %config.bucket, "initialized S3 storage");

        Ok(Self { client, config })
    }

    /// Create from an existing AWS SDK client.
    pub fn from_client(client: Client, config: S3Config) -> Self {
        Self { client, config }
    }

    /// Public URL for a key.
    pub fn public_url(&self, key: &str) -> String {
        if let Some(endpoint) = &self.config.endpoint {
            format!("{}/{}/{}", endpoint.trim_end_matches('/'), self.config.bucket, key)
        } else if let Some(region) = &self.config.region {
            format!(
                "https://{}.s3.{}.amazonaws.com/{}",
                self.config.bucket, region, key
            )
        } else {
            format!(
                "https://{}.s3.amazonaws.com/{}",
                self.config.bucket, key
            )
        }
    }
}

/// A dispatch or timeout failure means the backend was unreachable; a
/// service error means it answered and refused.
fn map_sdk_err<E>(err: SdkError<E>) -> StoreError
where
    E: std::error::Error + Send + Sync + 'static,
{
    match &err {
        SdkError::ServiceError(_) => StoreError::Rejected(err.to_string()),
        _ => StoreError::Unavailable(err.to_string()),
    }
}

#[async_trait]
impl ObjectStore for S3Store {
    async fn put(&self, key: &str, data: Bytes, content_type: &str) -> Result<StoredObject> {
        if let Some(max_size) = self.config.max_object_size
            && data.len() as u64 > max_size
        {
            return Err(StoreError::TooLarge {
                size: data.len() as u64,
                limit: max_size,
            });
        }

        let size = data.len() as u64;
        let checksum = calculate_checksum(&data);

        let mut request = self
            .client
            .put_object()
            .bucket(&self.config.bucket)
            .key(key)
            .body(ByteStream::from(data))
            .content_type(content_type);

        if let Some(acl) = &self.config.default_acl
            && let Ok(acl) = acl.parse::<ObjectCannedAcl>()
        {
            request = request.acl(acl);
        }

        if let Some(storage_class) = &self.config.storage_class
            && let Ok(storage_class) = storage_class.parse::<StorageClass>()
        {
            request = request.storage_class(storage_class);
        }

        request.send().await.map_err(map_sdk_err)?;

        debug!(key = %key, bucket = %self.config.bucket, size = size, "uploaded to S3");

        let mut stored = StoredObject::new(key, self.public_url(key), &self.config.bucket, size)
            .with_content_type(content_type)
            .with_checksum(checksum);
        stored.acl = self.config.default_acl.clone();
        stored.storage_class = self.config.storage_class.clone();

        Ok(stored)
    }

    async fn get(&self, key: &str) -> Result<Bytes> {
        let response = self
            .client
            .get_object()
            .bucket(&self.config.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| {
                let err_str = e.to_string();
                if err_str.contains("NoSuchKey") {
                    StoreError::NotFound(key.to_string())
                } else {
                    map_sdk_err(e)
                }
            })?;

        let bytes = response
            .body
            .collect()
            .await
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;

        Ok(bytes.into_bytes())
    }

    async fn delete_many(&self, keys: &[String]) -> Result<DeleteOutcome> {
        if keys.is_empty() {
            return Ok(DeleteOutcome::default());
        }

        let mut objects = Vec::with_capacity(keys.len());
        for key in keys {
            let identifier = ObjectIdentifier::builder()
                .key(key)
                .build()
                .map_err(|e| StoreError::Rejected(e.to_string()))?;
            objects.push(identifier);
        }

        let delete = Delete::builder()
            .set_objects(Some(objects))
            .build()
            .map_err(|e| StoreError::Rejected(e.to_string()))?;

        let response = self
            .client
            .delete_objects()
            .bucket(&self.config.bucket)
            .delete(delete)
            .send()
            .await
            .map_err(map_sdk_err)?;

        let mut outcome = DeleteOutcome::default();

        // DeleteObjects reports absent keys as deleted, so the batch is
        // idempotent.
        for deleted in response.deleted() {
            if let Some(key) = deleted.key() {
                outcome.deleted.push(key.to_string());
            }
        }

        for error in response.errors() {
            let key = error.key().unwrap_or_default().to_string();
            let cause = error
                .message()
                .or_else(|| error.code())
                .unwrap_or("unknown")
                .to_string();
            outcome.errors.push((key, cause));
        }

        debug!(
            bucket = %self.config.bucket,
            deleted = outcome.deleted.len(),
            failed = outcome.errors.len(),
            "batch delete from S3"
        );

        Ok(outcome)
    }

    fn url_for(&self, key: &str) -> String {
        self.public_url(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_store(config: S3Config) -> S3Store {
        let sdk_config = aws_sdk_s3::Config::builder()
            .behavior_version(aws_sdk_s3::config::BehaviorVersion::latest())
            .build();
        S3Store::from_client(Client::from_conf(sdk_config), config)
    }

    #[test]
    fn test_public_url_default_region() {
        let store = test_store(S3Config::new("my-bucket"));
        assert_eq!(
            store.public_url("a/b"),
            "https://my-bucket.s3.amazonaws.com/a/b"
        );
    }

    #[test]
    fn test_public_url_with_region_and_endpoint() {
        let regional = test_store(S3Config::new("my-bucket").region("eu-west-1"));
        assert_eq!(
            regional.public_url("k"),
            "https://my-bucket.s3.eu-west-1.amazonaws.com/k"
        );

        let custom = test_store(S3Config::new("my-bucket").endpoint("http://localhost:9000/"));
        assert_eq!(custom.public_url("k"), "http://localhost:9000/my-bucket/k");
    }

    #[test]
    fn test_config_builder() {
        let config = S3Config::new("b")
            .public_read()
            .storage_class("STANDARD_IA")
            .max_object_size(1024);
        assert_eq!(config.default_acl.as_deref(), Some("public-read"));
        assert_eq!(config.storage_class.as_deref(), Some("STANDARD_IA"));
        assert_eq!(config.max_object_size, Some(1024));
    }
}
