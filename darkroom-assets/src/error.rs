//! Error types for the asset pipeline.

use thiserror::Error;

/// Result type for pipeline operations.
pub type AssetResult<T> = std::result::Result<T, AssetError>;

/// Pipeline-level errors.
#[derive(Debug, Error)]
pub enum AssetError {
    /// The storage backend returned an upload result missing required
    /// fields. The upload is treated as failed.
    #[error("invalid upload result: {0}")]
    InvalidUploadResult(String),

    /// The requested style was never generated for this asset.
    #[error("style not found: {0}")]
    StyleNotFound(String),

    /// Storage adapter failure while creating or destroying an asset.
    #[error(transparent)]
    Store(#[from] darkroom_storage::StoreError),

    /// A style failed under the fail-fast policy.
    #[error("style '{style}' failed: {source}")]
    Style {
        /// Name of the failed style.
        style: String,
        /// What went wrong.
        #[source]
        source: StyleError,
    },

    /// Configuration rejected at startup.
    #[error(transparent)]
    Config(#[from] ConfigurationError),
}

/// Per-style failures.
///
/// Local to one style: a failure here never propagates to sibling styles
/// or to the original's success status.
#[derive(Debug, Error)]
pub enum StyleError {
    /// The original's bytes could not be re-read.
    #[error("failed to fetch original: {0}")]
    SourceFetch(#[from] FetchError),

    /// Decode or resize failure.
    #[error("resize failed: {0}")]
    Resize(String),

    /// The backend rejected the variant write.
    #[error("variant upload failed: {0}")]
    Upload(#[from] darkroom_storage::StoreError),
}

/// Failure to re-read an original from its retrieval URL.
#[derive(Debug, Clone, Error)]
#[error("fetch {url}: {message}")]
pub struct FetchError {
    /// URL that was requested.
    pub url: String,
    /// What the fetcher reported.
    pub message: String,
}

/// Configuration problems, fatal at startup.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    /// No bucket configured.
    #[error("bucket name is empty")]
    MissingBucket,

    /// A style in the catalog has a zero dimension.
    #[error("style '{0}' has zero width or height")]
    InvalidStyle(String),

    /// Config file could not be read.
    #[error("cannot read config file: {0}")]
    Io(#[from] std::io::Error),

    /// Config file could not be parsed.
    #[error("malformed config: {0}")]
    Parse(String),
}
