use crate::traits::{ObjectStorage, StorageError, StorageResult};
use crate::StorageBackend;
use async_trait::async_trait;
use std::path::{Component, Path, PathBuf};
use tokio::fs;

/// Local filesystem storage implementation
///
/// Each bucket is a directory directly under `base_path`; keys are relative
/// paths inside it.
#[derive(Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
}

impl LocalStorage {
    /// Create a new LocalStorage instance
    ///
    /// # Arguments
    /// * `base_path` - Root directory holding one subdirectory per bucket (e.g., "/var/lib/audex/buckets")
    pub async fn new(base_path: impl Into<PathBuf>) -> StorageResult<Self> {
        let base_path = base_path.into();

        fs::create_dir_all(&base_path).await.map_err(|e| {
            StorageError::ConfigError(format!(
                "Failed to create storage directory {}: {}",
                base_path.display(),
                e
            ))
        })?;

        Ok(LocalStorage { base_path })
    }

    /// Convert bucket and key to a filesystem path, rejecting anything that
    /// could escape the bucket directory.
    pub fn object_path(&self, bucket: &str, key: &str) -> StorageResult<PathBuf> {
        if bucket.is_empty()
            || bucket == "."
            || bucket == ".."
            || bucket.contains('/')
            || bucket.contains('\\')
        {
            return Err(StorageError::InvalidKey(format!(
                "Invalid bucket name: {:?}",
                bucket
            )));
        }

        if key.is_empty() || key.starts_with('/') {
            return Err(StorageError::InvalidKey(
                "Storage key must be a non-empty relative path".to_string(),
            ));
        }

        let escapes = Path::new(key).components().any(|c| {
            matches!(
                c,
                Component::ParentDir | Component::RootDir | Component::Prefix(_)
            )
        });
        if escapes {
            return Err(StorageError::InvalidKey(
                "Storage key resolves outside storage directory".to_string(),
            ));
        }

        Ok(self.base_path.join(bucket).join(key))
    }

    /// Ensure parent directory exists
    async fn ensure_parent_dir(&self, path: &Path) -> StorageResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }
        Ok(())
    }
}

#[async_trait]
impl ObjectStorage for LocalStorage {
    async fn download(&self, bucket: &str, key: &str, destination: &Path) -> StorageResult<u64> {
        let path = self.object_path(bucket, key)?;
        let start = std::time::Instant::now();

        if !fs::try_exists(&path).await.unwrap_or(false) {
            return Err(StorageError::NotFound(format!("{}/{}", bucket, key)));
        }

        let size = fs::copy(&path, destination).await.map_err(|e| {
            StorageError::DownloadFailed(format!(
                "Failed to copy {} to {}: {}",
                path.display(),
                destination.display(),
                e
            ))
        })?;

        tracing::info!(
            path = %path.display(),
            bucket = %bucket,
            key = %key,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local storage download successful"
        );

        Ok(size)
    }

    async fn upload(
        &self,
        source: &Path,
        bucket: &str,
        key: &str,
        _content_type: &str,
    ) -> StorageResult<String> {
        let path = self.object_path(bucket, key)?;
        let start = std::time::Instant::now();

        self.ensure_parent_dir(&path).await?;

        let size = fs::copy(source, &path).await.map_err(|e| {
            StorageError::UploadFailed(format!(
                "Failed to copy {} to {}: {}",
                source.display(),
                path.display(),
                e
            ))
        })?;

        tracing::info!(
            path = %path.display(),
            bucket = %bucket,
            key = %key,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local storage upload successful"
        );

        Ok(format!("file://{}", path.display()))
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Local
    }
}
