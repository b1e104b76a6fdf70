//! Re-reading original bytes.
//!
//! Variant generation re-fetches the original from its public retrieval
//! URL instead of holding on to the upload stream; upload and resize may
//! be decoupled in time or process.

use async_trait::async_trait;
use bytes::Bytes;
use std::sync::Arc;

use darkroom_storage::ObjectStore;

use crate::FetchError;

/// Resolves a retrieval URL to the bytes behind it.
#[async_trait]
pub trait SourceFetcher: Send + Sync {
    /// Fetch the bytes behind a retrieval URL.
    async fn fetch(&self, url: &str) -> Result<Bytes, FetchError>;
}

/// HTTP-backed fetcher for publicly retrievable originals.
#[derive(Clone, Default)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    /// Create a fetcher with a fresh HTTP client.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create from an existing client (shared connection pools, custom
    /// timeouts).
    pub fn from_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl SourceFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<Bytes, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| FetchError {
                url: url.to_string(),
                message: e.to_string(),
            })?;

        response.bytes().await.map_err(|e| FetchError {
            url: url.to_string(),
            message: e.to_string(),
        })
    }
}

/// Resolves retrieval URLs straight through an [`ObjectStore`].
///
/// For tests and single-process deployments where every URL the store
/// hands out shares one known prefix.
pub struct StoreFetcher {
    store: Arc<dyn ObjectStore>,
    url_prefix: String,
}

impl StoreFetcher {
    /// Create a fetcher for URLs under `url_prefix`.
    pub fn new(store: Arc<dyn ObjectStore>, url_prefix: impl Into<String>) -> Self {
        Self {
            store,
            url_prefix: url_prefix.into(),
        }
    }
}

#[async_trait]
impl SourceFetcher for StoreFetcher {
    async fn fetch(&self, url: &str) -> Result<Bytes, FetchError> {
        let key = url
            .strip_prefix(&self.url_prefix)
            .ok_or_else(|| FetchError {
                url: url.to_string(),
                message: format!("url outside store prefix {}", self.url_prefix),
            })?
            .trim_start_matches('/');

        self.store.get(key).await.map_err(|e| FetchError {
            url: url.to_string(),
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use darkroom_storage::MemoryStore;

    #[tokio::test]
    async fn test_store_fetcher_round_trip() {
        let store = MemoryStore::new("b");
        let stored = store
            .put("k", Bytes::from_static(b"payload"), "text/plain")
            .await
            .unwrap();

        let fetcher = StoreFetcher::new(Arc::new(store), "memory://b/");
        let bytes = fetcher.fetch(&stored.location).await.unwrap();
        assert_eq!(bytes, Bytes::from_static(b"payload"));
    }

    #[tokio::test]
    async fn test_store_fetcher_rejects_foreign_urls() {
        let store = MemoryStore::new("b");
        let fetcher = StoreFetcher::new(Arc::new(store), "memory://b/");

        let err = fetcher.fetch("https://elsewhere.example/k").await.unwrap_err();
        assert!(err.message.contains("outside store prefix"));
    }

    #[tokio::test]
    async fn test_store_fetcher_reports_missing_objects() {
        let store = MemoryStore::new("b");
        let fetcher = StoreFetcher::new(Arc::new(store), "memory://b/");

        let err = fetcher.fetch("memory://b/absent").await.unwrap_err();
        assert_eq!(err.url, "memory://b/absent");
    }
}
