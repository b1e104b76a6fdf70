//! The asset pipeline.
//!
//! Dependency-injected wiring of store, fetcher, catalog, and policy. The
//! store handle is constructed once at startup and passed in; no component
//! reaches into ambient global state.

use std::sync::Arc;
use tracing::info;

use darkroom_storage::{ObjectStore, UploadedFile, generate_object_key};

use crate::{
    Asset, AssetError, AssetRecord, AssetResult, ConfigurationError, DestroyOutcome,
    ORIGINAL_STYLE, PipelineConfig, SourceFetcher, StyleCatalog, VariantGenerator, VariantPolicy,
    VariantReport, destroy, resolve,
};

/// Everything asset handling needs, wired together once.
pub struct AssetPipeline {
    store: Arc<dyn ObjectStore>,
    generator: VariantGenerator,
    styles: StyleCatalog,
    policy: VariantPolicy,
}

impl AssetPipeline {
    /// Wire a pipeline from its collaborators and configuration.
    ///
    /// Configuration is validated here, so a broken catalog or missing
    /// bucket fails at startup rather than on the first upload.
    pub fn new(
        store: Arc<dyn ObjectStore>,
        fetcher: Arc<dyn SourceFetcher>,
        config: PipelineConfig,
    ) -> Result<Self, ConfigurationError> {
        config.validate()?;

        Ok(Self {
            generator: VariantGenerator::new(Arc::clone(&store), fetcher),
            store,
            styles: config.styles,
            policy: config.policy,
        })
    }

    /// The configured style catalog.
    pub fn styles(&self) -> &StyleCatalog {
        &self.styles
    }

    /// Store the uploaded bytes under a fresh key and resolve the asset
    /// record.
    ///
    /// The original is durably stored and its record resolved before any
    /// variant generation can begin; failures here are fatal to the whole
    /// asset-creation call.
    pub async fn store_original(&self, file: &UploadedFile) -> AssetResult<AssetRecord> {
        let key = generate_object_key();
        let content_type = file.content_type_str();

        let mut stored = self.store.put(&key, file.data.clone(), &content_type).await?;
        stored.original_name = file.name().map(String::from);

        let asset = resolve::resolve(&stored)?;
        info!(key = %asset.name, size = asset.size, mime = %asset.mime_type, "stored original");

        Ok(AssetRecord::new(asset))
    }

    /// Generate every configured variant for the asset behind `record`.
    pub async fn generate_variants(
        &self,
        record: &AssetRecord,
    ) -> Result<VariantReport, AssetError> {
        self.generator.generate(record, &self.styles, self.policy).await
    }

    /// Store, resolve, and — for images with a non-empty catalog — derive
    /// all configured variants.
    pub async fn ingest(&self, file: &UploadedFile) -> AssetResult<(AssetRecord, VariantReport)> {
        let record = self.store_original(file).await?;

        let report = if file.is_image() && !self.styles.is_empty() {
            self.generate_variants(&record).await?
        } else {
            VariantReport::default()
        };

        Ok((record, report))
    }

    /// Resolve the redirect target for one style of an asset.
    ///
    /// `None` falls back to the original. A style that was never generated
    /// is a clean [`AssetError::StyleNotFound`], not a dead link.
    pub fn send_file(&self, asset: &Asset, style: Option<&str>) -> AssetResult<String> {
        let style_name = style.unwrap_or(ORIGINAL_STYLE);
        asset
            .url_for(Some(style_name))
            .map(String::from)
            .ok_or_else(|| AssetError::StyleNotFound(style_name.to_string()))
    }

    /// Delete the original and every recorded variant.
    pub async fn destroy(&self, asset: &Asset) -> AssetResult<DestroyOutcome> {
        destroy::destroy(&self.store, asset).await
    }
}
