use crate::traits::{ObjectStorage, StorageError, StorageResult};
use crate::StorageBackend;
use async_trait::async_trait;
use audex_core::GCS_SCHEME;
use bytes::Bytes;
use futures::StreamExt;
use object_store::gcp::{GoogleCloudStorage, GoogleCloudStorageBuilder};
use object_store::path::Path as ObjectPath;
use object_store::Error as ObjectStoreError;
use object_store::{
    Attribute, Attributes, GetOptions, ObjectStore, PutOptions, PutPayload,
    Result as ObjectResult,
};
use std::path::Path;
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// Google Cloud Storage implementation
///
/// Credentials are resolved by `object_store` from the environment
/// (`GOOGLE_SERVICE_ACCOUNT`, `GOOGLE_APPLICATION_CREDENTIALS`, or the
/// instance metadata server on Cloud Run / GCE). The bucket comes from each
/// request, so a store handle is built per call.
#[derive(Clone, Default)]
pub struct GcsStorage;

impl GcsStorage {
    pub fn new() -> Self {
        Self
    }

    fn store(&self, bucket: &str) -> StorageResult<GoogleCloudStorage> {
        GoogleCloudStorageBuilder::from_env()
            .with_bucket_name(bucket)
            .build()
            .map_err(|e| StorageError::ConfigError(e.to_string()))
    }

    fn object_uri(bucket: &str, key: &str) -> String {
        format!("{}{}/{}", GCS_SCHEME, bucket, key)
    }
}

#[async_trait]
impl ObjectStorage for GcsStorage {
    async fn download(&self, bucket: &str, key: &str, destination: &Path) -> StorageResult<u64> {
        let start = std::time::Instant::now();
        let store = self.store(bucket)?;
        let location = ObjectPath::from(key);

        let result: ObjectResult<_> = store.get_opts(&location, GetOptions::default()).await;

        let result = result.map_err(|e| match e {
            ObjectStoreError::NotFound { .. } => {
                StorageError::NotFound(Self::object_uri(bucket, key))
            }
            other => {
                tracing::error!(
                    error = %other,
                    bucket = %bucket,
                    key = %key,
                    duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                    "GCS download failed"
                );
                StorageError::DownloadFailed(other.to_string())
            }
        })?;

        let mut file = fs::File::create(destination).await.map_err(|e| {
            StorageError::DownloadFailed(format!(
                "Failed to create file {}: {}",
                destination.display(),
                e
            ))
        })?;

        let mut stream = result.into_stream();
        let mut size = 0u64;
        while let Some(chunk) = stream.next().await {
            let chunk =
                chunk.map_err(|e| StorageError::DownloadFailed(format!("Failed to read chunk: {}", e)))?;
            file.write_all(&chunk).await.map_err(|e| {
                StorageError::DownloadFailed(format!(
                    "Failed to write file {}: {}",
                    destination.display(),
                    e
                ))
            })?;
            size += chunk.len() as u64;
        }

        file.sync_all().await.map_err(|e| {
            StorageError::DownloadFailed(format!(
                "Failed to sync file {}: {}",
                destination.display(),
                e
            ))
        })?;

        tracing::info!(
            bucket = %bucket,
            key = %key,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "GCS download successful"
        );

        Ok(size)
    }

    async fn upload(
        &self,
        source: &Path,
        bucket: &str,
        key: &str,
        content_type: &str,
    ) -> StorageResult<String> {
        let start = std::time::Instant::now();
        let store = self.store(bucket)?;

        // Audio outputs are small enough to send in a single put.
        let data = fs::read(source).await.map_err(|e| {
            StorageError::UploadFailed(format!("Failed to read file {}: {}", source.display(), e))
        })?;
        let size = data.len() as u64;
        let location = ObjectPath::from(key);

        let mut attributes = Attributes::new();
        attributes.insert(Attribute::ContentType, content_type.to_string().into());
        let options = PutOptions {
            attributes,
            ..Default::default()
        };

        let result: ObjectResult<_> = store
            .put_opts(&location, PutPayload::from(Bytes::from(data)), options)
            .await;

        result.map_err(|e| {
            tracing::error!(
                error = %e,
                bucket = %bucket,
                key = %key,
                size_bytes = size,
                duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                "GCS upload failed"
            );
            StorageError::UploadFailed(e.to_string())
        })?;

        tracing::info!(
            bucket = %bucket,
            key = %key,
            size_bytes = size,
            content_type = %content_type,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "GCS upload successful"
        );

        Ok(Self::object_uri(bucket, key))
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Gcs
    }
}
