//! In-memory bucket store.
//!
//! Implements the same [`ObjectStore`] contract as the S3 backend against
//! a process-local map. Used by tests and single-process development;
//! retrieval URLs use the `memory://<bucket>/<key>` scheme.

use async_trait::async_trait;
use bytes::Bytes;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

use crate::{DeleteOutcome, ObjectStore, Result, StoreError, StoredObject, calculate_checksum};

struct StoredEntry {
    data: Bytes,
    content_type: String,
}

/// In-memory bucket store. Cheap to clone; clones share the same bucket.
#[derive(Clone)]
pub struct MemoryStore {
    bucket: String,
    acl: Option<String>,
    max_object_size: Option<u64>,
    objects: Arc<RwLock<HashMap<String, StoredEntry>>>,
}

impl MemoryStore {
    /// Create a new empty bucket.
    pub fn new(bucket: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            acl: None,
            max_object_size: None,
            objects: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Set the ACL recorded on stored objects.
    pub fn with_acl(mut self, acl: impl Into<String>) -> Self {
        self.acl = Some(acl.into());
        self
    }

    /// Set the maximum accepted object size.
    pub fn with_max_object_size(mut self, bytes: u64) -> Self {
        self.max_object_size = Some(bytes);
        self
    }

    /// The bucket name.
    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    /// Number of objects currently stored.
    pub async fn len(&self) -> usize {
        self.objects.read().await.len()
    }

    /// Whether the bucket is empty.
    pub async fn is_empty(&self) -> bool {
        self.objects.read().await.is_empty()
    }

    /// URL prefix shared by every object in this bucket.
    pub fn url_prefix(&self) -> String {
        format!("memory://{}/", self.bucket)
    }

    /// Content type an object was stored with.
    pub async fn content_type_of(&self, key: &str) -> Option<String> {
        self.objects
            .read()
            .await
            .get(key)
            .map(|entry| entry.content_type.clone())
    }
}

#[async_trait]
impl ObjectStore for MemoryStore {
    async fn put(&self, key: &str, data: Bytes, content_type: &str) -> Result<StoredObject> {
        let size = data.len() as u64;
        if let Some(max_size) = self.max_object_size
            && size > max_size
        {
            return Err(StoreError::TooLarge {
                size,
                limit: max_size,
            });
        }

        let checksum = calculate_checksum(&data);

        let mut objects = self.objects.write().await;
        objects.insert(
            key.to_string(),
            StoredEntry {
                data,
                content_type: content_type.to_string(),
            },
        );

        debug!(key = %key, bucket = %self.bucket, size = size, "stored object in memory");

        let mut stored = StoredObject::new(key, self.url_for(key), &self.bucket, size)
            .with_content_type(content_type)
            .with_checksum(checksum);
        stored.acl = self.acl.clone();

        Ok(stored)
    }

    async fn get(&self, key: &str) -> Result<Bytes> {
        let objects = self.objects.read().await;
        objects
            .get(key)
            .map(|entry| entry.data.clone())
            .ok_or_else(|| StoreError::NotFound(key.to_string()))
    }

    async fn delete_many(&self, keys: &[String]) -> Result<DeleteOutcome> {
        let mut objects = self.objects.write().await;
        let mut outcome = DeleteOutcome::default();

        for key in keys {
            // Absent keys count as deleted; the batch is idempotent.
            objects.remove(key);
            outcome.deleted.push(key.clone());
        }

        debug!(bucket = %self.bucket, count = outcome.deleted.len(), "deleted objects from memory");
        Ok(outcome)
    }

    fn url_for(&self, key: &str) -> String {
        format!("memory://{}/{}", self.bucket, key)
    }
}
