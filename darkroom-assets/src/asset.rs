//! The asset record and its synchronized mutation handle.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Style name reserved for the untouched upload.
pub const ORIGINAL_STYLE: &str = "original";

/// Structured metadata carried alongside an asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetExtra {
    /// Bucket the asset lives in.
    pub bucket: String,
    /// Canned ACL applied at upload, if any.
    pub acl: Option<String>,
    /// Storage class applied at upload, if any.
    pub storage_class: Option<String>,
    /// Style name to storage key; `original` is always present.
    pub keys: BTreeMap<String, String>,
}

/// One logically uploaded file plus its generated variants.
///
/// The record is owned by the upload-handling layer; pipeline components
/// receive it by handle for the duration of a call and never retain it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Asset {
    /// Canonical storage key of the original.
    pub name: String,
    /// Fully-qualified retrieval URL of the original.
    pub location: String,
    /// Size of the original in bytes.
    pub size: u64,
    /// MIME type of the original.
    pub mime_type: String,
    /// Final dot-segment of the uploaded filename, dot included. Empty
    /// when the filename had no dot.
    pub extension: String,
    /// Structured metadata, including the per-style key map.
    pub extra: AssetExtra,
    /// Style name to retrieval URL, populated as variants are generated.
    pub urls: BTreeMap<String, String>,
}

impl Asset {
    /// URL for one style; `None` falls back to the original.
    pub fn url_for(&self, style: Option<&str>) -> Option<&str> {
        self.urls
            .get(style.unwrap_or(ORIGINAL_STYLE))
            .map(String::as_str)
    }

    /// Every storage key ever recorded for this asset, deduplicated.
    ///
    /// Includes keys whose URL was never published; destroy must target
    /// everything that was ever written.
    pub fn all_keys(&self) -> Vec<String> {
        let mut keys = vec![self.name.clone()];
        for key in self.extra.keys.values() {
            if !keys.contains(key) {
                keys.push(key.clone());
            }
        }
        keys
    }

    /// Whether the original is an image.
    pub fn is_image(&self) -> bool {
        self.mime_type.starts_with("image/")
    }

    /// Number of generated variants (the original not counted).
    pub fn variant_count(&self) -> usize {
        self.urls.len().saturating_sub(1)
    }
}

/// Shared handle over an asset mutated by concurrent style completions.
///
/// Every write funnels through [`record_variant`](Self::record_variant),
/// one at a time, so completions arriving in any order can never lose each
/// other's updates. Reads take a snapshot.
#[derive(Clone)]
pub struct AssetRecord {
    inner: Arc<Mutex<Asset>>,
}

impl AssetRecord {
    /// Wrap a freshly resolved asset.
    pub fn new(asset: Asset) -> Self {
        Self {
            inner: Arc::new(Mutex::new(asset)),
        }
    }

    /// Record one generated variant.
    ///
    /// Additive only: entries for other styles are never touched, and a
    /// style failure is recorded by not calling this at all.
    pub async fn record_variant(&self, style: &str, key: String, url: String) {
        let mut asset = self.inner.lock().await;
        asset.extra.keys.insert(style.to_string(), key);
        asset.urls.insert(style.to_string(), url);
    }

    /// Clone of the current state.
    pub async fn snapshot(&self) -> Asset {
        self.inner.lock().await.clone()
    }
}
