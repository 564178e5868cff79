//! Storage abstraction trait
//!
//! This module defines the ObjectStorage trait that all storage backends must implement.

use crate::StorageBackend;
use async_trait::async_trait;
use std::path::Path;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Download failed: {0}")]
    DownloadFailed(String),

    #[error("Object not found: {0}")]
    NotFound(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("Storage backend error: {0}")]
    BackendError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Storage abstraction trait
///
/// The pipeline only ever moves whole objects between a bucket and a local
/// file, so that is all a backend has to provide.
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// Download `bucket/key` into `destination`, returning the number of bytes written.
    ///
    /// `destination` is created or truncated.
    async fn download(&self, bucket: &str, key: &str, destination: &Path) -> StorageResult<u64>;

    /// Upload the file at `source` to `bucket/key` with the given content type.
    ///
    /// Returns a backend-specific reference to the stored object.
    async fn upload(
        &self,
        source: &Path,
        bucket: &str,
        key: &str,
        content_type: &str,
    ) -> StorageResult<String>;

    /// Get the storage backend type
    fn backend_type(&self) -> StorageBackend;
}
