//! Storage locator parsing.
//!
//! Input videos are always addressed with a full `gs://bucket/key` URI. Output
//! paths are more lenient: `bucket/key`, `gs://bucket/key`, or a bare key that
//! falls back to the configured default bucket.

use crate::error::AppError;
use std::fmt::{Display, Formatter, Result as FmtResult};

/// URI scheme prefix for Google Cloud Storage objects.
pub const GCS_SCHEME: &str = "gs://";

/// A (bucket, key) pair. Both parts are non-empty once parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageLocator {
    pub bucket: String,
    pub key: String,
}

impl StorageLocator {
    /// Parse the input video URI. The `gs://` prefix is mandatory.
    pub fn parse_input(uri: &str) -> Result<Self, AppError> {
        let rest = uri.strip_prefix(GCS_SCHEME).ok_or_else(|| {
            AppError::Validation("Invalid GCS URI format for input video.".to_string())
        })?;

        let (bucket, key) = rest.split_once('/').ok_or_else(|| {
            AppError::Validation(format!(
                "Invalid GCS path format: '{}' has no object path after the bucket",
                uri
            ))
        })?;

        Self::from_parts(bucket, key, uri)
    }

    /// Parse the output path, resolving a bare key against `default_bucket`.
    pub fn parse_output(path: &str, default_bucket: Option<&str>) -> Result<Self, AppError> {
        let rest = path.strip_prefix(GCS_SCHEME).unwrap_or(path);

        match rest.split_once('/') {
            Some((bucket, key)) => Self::from_parts(bucket, key, path),
            None => {
                if rest.is_empty() {
                    return Err(AppError::Validation(
                        "Invalid GCS path format: output path is empty".to_string(),
                    ));
                }
                let bucket = default_bucket.filter(|b| !b.is_empty()).ok_or_else(|| {
                    AppError::Configuration(
                        "Output bucket name not found in path or environment variable GCS_BUCKET_NAME."
                            .to_string(),
                    )
                })?;
                Ok(Self {
                    bucket: bucket.to_string(),
                    key: rest.to_string(),
                })
            }
        }
    }

    fn from_parts(bucket: &str, key: &str, original: &str) -> Result<Self, AppError> {
        if bucket.is_empty() {
            return Err(AppError::Validation(format!(
                "Invalid GCS path format: '{}' has an empty bucket name",
                original
            )));
        }
        if key.is_empty() {
            return Err(AppError::Validation(format!(
                "Invalid GCS path format: '{}' has an empty object path",
                original
            )));
        }
        Ok(Self {
            bucket: bucket.to_string(),
            key: key.to_string(),
        })
    }
}

impl Display for StorageLocator {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}{}/{}", GCS_SCHEME, self.bucket, self.key)
    }
}
