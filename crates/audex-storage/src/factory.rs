#[cfg(feature = "storage-gcs")]
use crate::GcsStorage;
#[cfg(feature = "storage-local")]
use crate::LocalStorage;
use crate::{ObjectStorage, StorageBackend, StorageError, StorageResult};
use audex_core::Config;
use std::sync::Arc;

/// Create a storage backend based on configuration
pub async fn create_storage(config: &Config) -> StorageResult<Arc<dyn ObjectStorage>> {
    match config.storage_backend {
        #[cfg(feature = "storage-gcs")]
        StorageBackend::Gcs => Ok(Arc::new(GcsStorage::new())),

        #[cfg(not(feature = "storage-gcs"))]
        StorageBackend::Gcs => Err(StorageError::ConfigError(
            "GCS storage backend not available (storage-gcs feature not enabled)".to_string(),
        )),

        #[cfg(feature = "storage-local")]
        StorageBackend::Local => {
            let base_path = config.local_storage_path.clone().ok_or_else(|| {
                StorageError::ConfigError("LOCAL_STORAGE_PATH not configured".to_string())
            })?;

            let storage = LocalStorage::new(base_path).await?;
            Ok(Arc::new(storage))
        }

        #[cfg(not(feature = "storage-local"))]
        StorageBackend::Local => Err(StorageError::ConfigError(
            "Local storage backend not available (storage-local feature not enabled)".to_string(),
        )),
    }
}
