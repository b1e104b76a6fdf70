// Darkroom - an object-storage asset pipeline.
//
// Stores uploaded originals in a bucket/key object store, derives a fixed
// catalog of resized image variants, and deletes every recorded object
// together when an asset is destroyed.

// Re-export the pipeline core
pub use darkroom_assets::*;

// Member crates under their own names
pub use darkroom_images;
pub use darkroom_storage;

// Prelude for common imports
pub mod prelude {
    pub use darkroom_assets::{
        Asset, AssetError, AssetPipeline, AssetRecord, HttpFetcher, PipelineConfig,
        SourceFetcher, StoreFetcher, Style, StyleCatalog, VariantPolicy, VariantReport,
    };
    pub use darkroom_images::{ResizeFilter, render_fill};
    pub use darkroom_storage::{
        MemoryStore, ObjectStore, StoredObject, UploadedFile, generate_object_key,
    };

    #[cfg(feature = "s3")]
    pub use darkroom_storage::{S3Config, S3Store};
}
