//! Object store trait and common types.

use async_trait::async_trait;
use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::Result;

/// Result of storing one object.
///
/// Carries everything the upload layer needs to build an asset record:
/// where the object landed, how to retrieve it, and what the backend was
/// told about it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredObject {
    /// Unique key of the object within the bucket.
    pub key: String,
    /// Fully-qualified retrieval URL.
    pub location: String,
    /// Bucket the object was stored in.
    pub bucket: String,
    /// Object size in bytes.
    pub size: u64,
    /// MIME type the object was stored with.
    pub content_type: String,
    /// Canned ACL applied, if any.
    pub acl: Option<String>,
    /// Storage class applied, if any.
    pub storage_class: Option<String>,
    /// Name of the file as uploaded by the client.
    pub original_name: Option<String>,
    /// SHA-256 hash of the stored bytes.
    pub checksum: Option<String>,
}

impl StoredObject {
    /// Create a new stored-object record.
    pub fn new(
        key: impl Into<String>,
        location: impl Into<String>,
        bucket: impl Into<String>,
        size: u64,
    ) -> Self {
        Self {
            key: key.into(),
            location: location.into(),
            bucket: bucket.into(),
            size,
            content_type: "application/octet-stream".to_string(),
            acl: None,
            storage_class: None,
            original_name: None,
            checksum: None,
        }
    }

    /// Set the content type.
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = content_type.into();
        self
    }

    /// Set the ACL.
    pub fn with_acl(mut self, acl: impl Into<String>) -> Self {
        self.acl = Some(acl.into());
        self
    }

    /// Set the storage class.
    pub fn with_storage_class(mut self, storage_class: impl Into<String>) -> Self {
        self.storage_class = Some(storage_class.into());
        self
    }

    /// Set the original file name.
    pub fn with_original_name(mut self, name: impl Into<String>) -> Self {
        self.original_name = Some(name.into());
        self
    }

    /// Set the checksum.
    pub fn with_checksum(mut self, checksum: impl Into<String>) -> Self {
        self.checksum = Some(checksum.into());
        self
    }
}

/// Outcome of a batch delete.
///
/// Partial success is expected and reported, never raised as an error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeleteOutcome {
    /// Keys confirmed deleted (or already absent).
    pub deleted: Vec<String>,
    /// Keys that could not be deleted, with the backend's reason.
    pub errors: Vec<(String, String)>,
}

impl DeleteOutcome {
    /// True when every requested key was deleted.
    pub fn is_complete(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Bucket/key object store.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Store bytes under a key with the given content type.
    async fn put(&self, key: &str, data: Bytes, content_type: &str) -> Result<StoredObject>;

    /// Retrieve an object's bytes.
    async fn get(&self, key: &str) -> Result<Bytes>;

    /// Delete a batch of keys, best-effort.
    ///
    /// Absent keys count as deleted, so the call is idempotent: a second
    /// pass over the same keys reports full success. Per-key failures are
    /// collected in the outcome, not raised.
    async fn delete_many(&self, keys: &[String]) -> Result<DeleteOutcome>;

    /// Deterministic retrieval URL for a key.
    fn url_for(&self, key: &str) -> String;
}

/// Generate a collision-resistant storage key.
///
/// The millisecond prefix keeps keys roughly sorted by creation time; the
/// UUIDv7 suffix is globally unique and itself time-ordered, so concurrent
/// callers can never produce equal keys.
pub fn generate_object_key() -> String {
    let millis = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0);
    format!("{}_{}", millis, uuid::Uuid::now_v7())
}

/// Calculate SHA-256 checksum of data.
pub fn calculate_checksum(data: &[u8]) -> String {
    use sha2::{Digest, Sha256};
    let mut hasher = Sha256::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_generated_keys_are_unique() {
        let keys: HashSet<String> = (0..1000).map(|_| generate_object_key()).collect();
        assert_eq!(keys.len(), 1000);
    }

    #[test]
    fn test_generated_key_shape() {
        let key = generate_object_key();
        let (millis, id) = key.split_once('_').unwrap();
        assert!(millis.parse::<u128>().is_ok());
        assert!(uuid::Uuid::parse_str(id).is_ok());
    }

    #[test]
    fn test_stored_object_builder() {
        let stored = StoredObject::new("k", "https://example.com/k", "bucket", 42)
            .with_content_type("image/png")
            .with_acl("public-read")
            .with_original_name("photo.png");

        assert_eq!(stored.key, "k");
        assert_eq!(stored.size, 42);
        assert_eq!(stored.content_type, "image/png");
        assert_eq!(stored.acl.as_deref(), Some("public-read"));
        assert_eq!(stored.original_name.as_deref(), Some("photo.png"));
        assert!(stored.storage_class.is_none());
    }

    #[test]
    fn test_checksum_is_stable() {
        let a = calculate_checksum(b"hello");
        let b = calculate_checksum(b"hello");
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);
        assert_ne!(a, calculate_checksum(b"world"));
    }

    #[test]
    fn test_stored_object_serializes() {
        let stored = StoredObject::new("k", "memory://b/k", "b", 1);
        let json = serde_json::to_string(&stored).unwrap();
        let back: StoredObject = serde_json::from_str(&json).unwrap();
        assert_eq!(stored, back);
    }
}
