//! Pipeline configuration.
//!
//! Loaded from TOML; a local `.env` file, if present, is read into the
//! environment first so the storage SDK can resolve credentials from it.
//! Validation runs before the pipeline starts: a missing bucket or broken
//! catalog fails at boot, not on the first upload.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::{ConfigurationError, StyleCatalog, VariantPolicy};

/// Configuration surface of the asset pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Bucket uploads are stored in.
    pub bucket: String,
    /// Region of the bucket.
    #[serde(default)]
    pub region: Option<String>,
    /// Custom endpoint for S3-compatible services.
    #[serde(default)]
    pub endpoint: Option<String>,
    /// Canned ACL applied to every uploaded object.
    #[serde(default = "default_acl")]
    pub acl: String,
    /// Storage class for uploaded objects.
    #[serde(default)]
    pub storage_class: Option<String>,
    /// Named resize profiles generated for image uploads.
    #[serde(default)]
    pub styles: StyleCatalog,
    /// Failure aggregation policy for variant generation.
    #[serde(default)]
    pub policy: VariantPolicy,
}

fn default_acl() -> String {
    "public-read".to_string()
}

impl PipelineConfig {
    /// Create a configuration for a bucket with defaults.
    pub fn new(bucket: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            region: None,
            endpoint: None,
            acl: default_acl(),
            storage_class: None,
            styles: StyleCatalog::new(),
            policy: VariantPolicy::default(),
        }
    }

    /// Set the style catalog.
    pub fn with_styles(mut self, styles: StyleCatalog) -> Self {
        self.styles = styles;
        self
    }

    /// Set the variant policy.
    pub fn with_policy(mut self, policy: VariantPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Read configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigurationError> {
        dotenvy::dotenv().ok();

        let raw = std::fs::read_to_string(path)?;
        let config: Self =
            toml::from_str(&raw).map_err(|e| ConfigurationError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Fail-fast checks run at startup.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.bucket.trim().is_empty() {
            return Err(ConfigurationError::MissingBucket);
        }
        for (name, style) in self.styles.iter() {
            if style.width == 0 || style.height == 0 {
                return Err(ConfigurationError::InvalidStyle(name.clone()));
            }
        }
        Ok(())
    }

    /// Build the matching S3 backend configuration.
    #[cfg(feature = "s3")]
    pub fn s3_config(&self) -> darkroom_storage::S3Config {
        let mut config = darkroom_storage::S3Config::new(&self.bucket).acl(&self.acl);
        if let Some(region) = &self.region {
            config = config.region(region);
        }
        if let Some(endpoint) = &self.endpoint {
            config = config.endpoint(endpoint);
        }
        if let Some(storage_class) = &self.storage_class {
            config = config.storage_class(storage_class);
        }
        config
    }
}
