//! Asset pipeline core for Darkroom.
//!
//! Takes an uploaded file, stores the original in a bucket/key object
//! store, derives a configured catalog of resized variants, exposes
//! per-style retrieval URLs, and later deletes every recorded object
//! together.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use darkroom_assets::*;
//! use darkroom_storage::{MemoryStore, UploadedFile};
//!
//! let store = Arc::new(MemoryStore::new("uploads"));
//! let fetcher = Arc::new(StoreFetcher::new(store.clone(), store.url_prefix()));
//!
//! let config = PipelineConfig::new("uploads")
//!     .with_styles(StyleCatalog::new().with_style("thumb", 100, 100));
//! let pipeline = AssetPipeline::new(store, fetcher, config)?;
//!
//! let (record, report) = pipeline.ingest(&UploadedFile::from_bytes(data, "photo.jpg")).await?;
//! let asset = record.snapshot().await;
//! let redirect = pipeline.send_file(&asset, Some("thumb"))?;
//! ```
//!
//! Failure policy: variant generation is best-effort by default — a style
//! that fails is logged and skipped, the asset keeps every style that
//! succeeded, and requesting a missing style yields
//! [`AssetError::StyleNotFound`]. Opt into [`VariantPolicy::FailFast`] to
//! surface the first style failure to the caller instead.

mod asset;
mod config;
pub mod destroy;
mod error;
mod fetch;
mod pipeline;
pub mod resolve;
mod styles;
mod variants;

pub use asset::*;
pub use config::*;
pub use destroy::DestroyOutcome;
pub use error::*;
pub use fetch::*;
pub use pipeline::*;
pub use resolve::resolve;
pub use styles::*;
pub use variants::*;
