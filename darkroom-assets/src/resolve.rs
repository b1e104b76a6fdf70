//! Normalizing raw upload results into asset records.

use std::collections::BTreeMap;

use darkroom_storage::StoredObject;

use crate::{Asset, AssetError, AssetExtra, AssetResult, ORIGINAL_STYLE};

/// Convert an upload result into a normalized [`Asset`].
///
/// Pure and idempotent: no side effects, no hidden counters; the same
/// input always yields the same asset.
pub fn resolve(upload: &StoredObject) -> AssetResult<Asset> {
    if upload.key.is_empty() {
        return Err(AssetError::InvalidUploadResult(
            "upload result has no key".into(),
        ));
    }
    if upload.location.is_empty() {
        return Err(AssetError::InvalidUploadResult(
            "upload result has no location".into(),
        ));
    }

    let mut keys = BTreeMap::new();
    keys.insert(ORIGINAL_STYLE.to_string(), upload.key.clone());

    let mut urls = BTreeMap::new();
    urls.insert(ORIGINAL_STYLE.to_string(), upload.location.clone());

    Ok(Asset {
        name: upload.key.clone(),
        location: upload.location.clone(),
        size: upload.size,
        mime_type: upload.content_type.clone(),
        extension: extension_of(upload.original_name.as_deref()),
        extra: AssetExtra {
            bucket: upload.bucket.clone(),
            acl: upload.acl.clone(),
            storage_class: upload.storage_class.clone(),
            keys,
        },
        urls,
    })
}

/// Extension is the final dot-segment of the original filename, dot
/// included. A name with no dot yields an empty extension; that is data,
/// not an error.
fn extension_of(name: Option<&str>) -> String {
    match name.and_then(|n| n.rsplit_once('.')) {
        Some((_, ext)) => format!(".{ext}"),
        None => String::new(),
    }
}
