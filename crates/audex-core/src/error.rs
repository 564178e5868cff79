//! Error types module
//!
//! All failures of an extraction request are classified into `AppError`.
//! The API crate turns them into HTTP responses through the `ErrorMetadata`
//! trait, so the mapping from failure kind to status code lives here.

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::io;

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like validation failures
    Debug,
    /// Warning level - for misconfiguration the caller can work around
    Warn,
    /// Error level - for unexpected failures
    Error,
}

/// Which side of the pipeline a storage failure happened on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageOperation {
    Download,
    Upload,
}

impl Display for StorageOperation {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            StorageOperation::Download => write!(f, "download"),
            StorageOperation::Upload => write!(f, "upload"),
        }
    }
}

/// Metadata for error responses - defines how an error should be presented
pub trait ErrorMetadata {
    /// HTTP status code to return
    fn http_status_code(&self) -> u16;

    /// Machine-readable error code (e.g., "TRANSCODE_ERROR")
    fn error_code(&self) -> &'static str;

    /// Client-facing message
    fn client_message(&self) -> String;

    /// Diagnostic text exposed in the `details` field, if any
    fn details(&self) -> Option<String>;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Storage {operation} error: {detail}")]
    Storage {
        operation: StorageOperation,
        detail: String,
    },

    #[error("Transcode error: {stderr}")]
    Transcode { stderr: String },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Short name of the failure class, used as a structured log field.
    pub fn error_type(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "ValidationError",
            AppError::Configuration(_) => "ConfigurationError",
            AppError::Storage { .. } => "StorageError",
            AppError::Transcode { .. } => "TranscodeError",
            AppError::Internal(_) => "InternalError",
        }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

impl From<io::Error> for AppError {
    fn from(err: io::Error) -> Self {
        AppError::Internal(format!("IO error: {}", err))
    }
}

impl ErrorMetadata for AppError {
    fn http_status_code(&self) -> u16 {
        match self {
            AppError::Validation(_) | AppError::Configuration(_) => 400,
            AppError::Storage { .. } | AppError::Transcode { .. } | AppError::Internal(_) => 500,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::Configuration(_) => "CONFIGURATION_ERROR",
            AppError::Storage { .. } => "STORAGE_ERROR",
            AppError::Transcode { .. } => "TRANSCODE_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    fn client_message(&self) -> String {
        match self {
            AppError::Validation(msg) => msg.clone(),
            AppError::Configuration(msg) => format!("Invalid GCS path format: {}", msg),
            AppError::Storage {
                operation: StorageOperation::Download,
                ..
            } => "Failed to download input video.".to_string(),
            AppError::Storage {
                operation: StorageOperation::Upload,
                ..
            } => "Failed to upload extracted audio.".to_string(),
            AppError::Transcode { .. } => "FFMPEG processing failed.".to_string(),
            AppError::Internal(_) => "An internal error occurred.".to_string(),
        }
    }

    fn details(&self) -> Option<String> {
        match self {
            AppError::Validation(_) | AppError::Configuration(_) => None,
            AppError::Storage { detail, .. } => Some(detail.clone()),
            AppError::Transcode { stderr } => Some(stderr.clone()),
            AppError::Internal(msg) => Some(msg.clone()),
        }
    }

    fn log_level(&self) -> LogLevel {
        match self {
            AppError::Validation(_) => LogLevel::Debug,
            AppError::Configuration(_) => LogLevel::Warn,
            _ => LogLevel::Error,
        }
    }
}
