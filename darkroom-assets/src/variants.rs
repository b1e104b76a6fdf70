//! Variant generation: fanning the style catalog out over an original.

use bytes::Bytes;
use futures::future::join_all;
use std::sync::Arc;
use tracing::{debug, error};

use darkroom_images::{ResizeFilter, render_fill};
use darkroom_storage::ObjectStore;

use crate::{
    AssetError, AssetRecord, SourceFetcher, Style, StyleCatalog, StyleError, VariantPolicy,
};

/// Result for one style in a generation batch.
#[derive(Debug)]
pub struct StyleOutcome {
    /// The style's name.
    pub style: String,
    /// Success, or why this style was skipped.
    pub result: Result<(), StyleError>,
}

/// Outcome of one variant-generation batch.
#[derive(Debug, Default)]
pub struct VariantReport {
    /// One entry per attempted style.
    pub outcomes: Vec<StyleOutcome>,
}

impl VariantReport {
    /// Number of styles that succeeded.
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.result.is_ok()).count()
    }

    /// Number of styles that failed.
    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.succeeded()
    }

    /// True when every attempted style succeeded.
    pub fn is_complete(&self) -> bool {
        self.failed() == 0
    }
}

/// Derives resized variants from an asset's original and uploads them.
pub struct VariantGenerator {
    store: Arc<dyn ObjectStore>,
    fetcher: Arc<dyn SourceFetcher>,
    filter: ResizeFilter,
}

impl VariantGenerator {
    /// Create a generator over the given store and fetcher.
    pub fn new(store: Arc<dyn ObjectStore>, fetcher: Arc<dyn SourceFetcher>) -> Self {
        Self {
            store,
            fetcher,
            filter: ResizeFilter::default(),
        }
    }

    /// Set the resize filter.
    pub fn with_filter(mut self, filter: ResizeFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Generate every style in the catalog for the asset behind `record`.
    ///
    /// The original's bytes are re-read once from its retrieval URL, then
    /// the styles fan out concurrently; each resize runs on the blocking
    /// pool. Successes are recorded on the asset as they complete, in
    /// whatever order they finish. The batch settles only after every
    /// style has succeeded or permanently failed.
    ///
    /// Under [`VariantPolicy::BestEffort`] failures are logged and listed
    /// in the report. Under [`VariantPolicy::FailFast`] the first failure
    /// is returned as an error once the batch has settled; styles that
    /// succeeded stay recorded either way.
    pub async fn generate(
        &self,
        record: &AssetRecord,
        catalog: &StyleCatalog,
        policy: VariantPolicy,
    ) -> Result<VariantReport, AssetError> {
        if catalog.is_empty() {
            return Ok(VariantReport::default());
        }

        let original = record.snapshot().await;

        let source = match self.fetcher.fetch(&original.location).await {
            Ok(bytes) => bytes,
            Err(err) => {
                error!(
                    url = %original.location,
                    error = %err,
                    "cannot re-read original for variant generation"
                );
                return settle_fetch_failure(catalog, policy, err);
            }
        };

        let tasks = catalog.iter().map(|(name, style)| {
            let name = name.clone();
            let style = *style;
            let source = source.clone();
            let record = record.clone();
            let store = Arc::clone(&self.store);
            let filter = self.filter;
            let original_key = original.name.clone();
            let content_type = original.mime_type.clone();

            async move {
                let result = generate_one(
                    store,
                    record,
                    &name,
                    style,
                    source,
                    filter,
                    &original_key,
                    &content_type,
                )
                .await;
                StyleOutcome {
                    style: name,
                    result,
                }
            }
        });

        let outcomes = join_all(tasks).await;

        for outcome in &outcomes {
            if let Err(err) = &outcome.result {
                error!(style = %outcome.style, error = %err, "style generation failed");
            }
        }

        if policy == VariantPolicy::FailFast {
            let mut settled = Vec::with_capacity(outcomes.len());
            for outcome in outcomes {
                match outcome.result {
                    Err(source) => {
                        return Err(AssetError::Style {
                            style: outcome.style,
                            source,
                        });
                    }
                    Ok(()) => settled.push(outcome),
                }
            }
            return Ok(VariantReport { outcomes: settled });
        }

        Ok(VariantReport { outcomes })
    }
}

/// One style: resize on the blocking pool, upload, record.
async fn generate_one(
    store: Arc<dyn ObjectStore>,
    record: AssetRecord,
    style_name: &str,
    style: Style,
    source: Bytes,
    filter: ResizeFilter,
    original_key: &str,
    content_type: &str,
) -> Result<(), StyleError> {
    let rendered =
        match tokio::task::spawn_blocking(move || {
            render_fill(&source, style.width, style.height, filter)
        })
        .await
        {
            Ok(result) => result.map_err(|e| StyleError::Resize(e.to_string()))?,
            Err(join_err) => {
                return Err(StyleError::Resize(format!("render task aborted: {join_err}")));
            }
        };

    let key = format!("{style_name}/{original_key}");
    let stored = store.put(&key, rendered.data, content_type).await?;

    record
        .record_variant(style_name, stored.key.clone(), stored.location.clone())
        .await;

    debug!(
        style = style_name,
        key = %stored.key,
        width = rendered.width,
        height = rendered.height,
        "generated variant"
    );

    Ok(())
}

/// The one fetch serves every style, so a fetch failure becomes a
/// per-style `SourceFetch` outcome for each of them.
fn settle_fetch_failure(
    catalog: &StyleCatalog,
    policy: VariantPolicy,
    err: crate::FetchError,
) -> Result<VariantReport, AssetError> {
    let mut report = VariantReport::default();

    for (name, _) in catalog.iter() {
        if policy == VariantPolicy::FailFast {
            return Err(AssetError::Style {
                style: name.clone(),
                source: StyleError::SourceFetch(err),
            });
        }
        report.outcomes.push(StyleOutcome {
            style: name.clone(),
            result: Err(StyleError::SourceFetch(err.clone())),
        });
    }

    Ok(report)
}
