//! Deletion coordinator.

use std::sync::Arc;
use tracing::{error, info};

use darkroom_storage::{DeleteOutcome, ObjectStore};

use crate::{Asset, AssetResult};

/// Outcome of destroying one asset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DestroyOutcome {
    /// Keys confirmed gone.
    pub deleted: Vec<String>,
    /// Keys that could not be deleted, with the backend's reason. The
    /// caller decides whether to retry or log.
    pub failed: Vec<(String, String)>,
}

impl DestroyOutcome {
    /// True when every key was deleted.
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Delete the original and every recorded variant of an asset.
///
/// The key set is the original's key plus every value in the asset's key
/// map, whether or not that variant's URL was ever published. Absent keys
/// count as deleted (see [`ObjectStore::delete_many`]), so destroying an
/// already-deleted asset reports full success. Safe on an asset with zero
/// variants.
pub async fn destroy(store: &Arc<dyn ObjectStore>, asset: &Asset) -> AssetResult<DestroyOutcome> {
    let keys = asset.all_keys();

    let DeleteOutcome { deleted, errors } = store.delete_many(&keys).await?;

    if errors.is_empty() {
        info!(asset = %asset.name, count = deleted.len(), "destroyed asset");
    } else {
        for (key, cause) in &errors {
            error!(asset = %asset.name, key = %key, cause = %cause, "failed to delete object");
        }
    }

    Ok(DestroyOutcome {
        deleted,
        failed: errors,
    })
}
