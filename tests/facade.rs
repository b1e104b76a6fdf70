//! Smoke test for the facade crate: the prelude wires a working pipeline.

use std::sync::Arc;

use darkroom::prelude::*;

#[tokio::test]
async fn prelude_builds_a_working_pipeline() {
    let store = MemoryStore::new("smoke");
    let handle: Arc<dyn ObjectStore> = Arc::new(store.clone());
    let fetcher = Arc::new(StoreFetcher::new(Arc::clone(&handle), store.url_prefix()));

    let config = PipelineConfig::new("smoke")
        .with_styles(StyleCatalog::new().with_style("thumb", 10, 10));
    let pipeline = AssetPipeline::new(handle, fetcher, config).unwrap();

    let file = UploadedFile::from_bytes(b"not an image".to_vec(), "note.txt");
    let (record, report) = pipeline.ingest(&file).await.unwrap();

    assert_eq!(report.outcomes.len(), 0);
    let asset = record.snapshot().await;
    assert_eq!(pipeline.send_file(&asset, None).unwrap(), asset.location);

    let outcome = pipeline.destroy(&asset).await.unwrap();
    assert!(outcome.is_complete());
}
