//! Audex Core Library
//!
//! This crate provides the configuration, error types and storage locator
//! parsing shared by the storage, processing and API crates.

pub mod config;
pub mod error;
pub mod locator;
pub mod storage_types;

// Re-export commonly used types
pub use config::{Config, LogFormat};
pub use error::{AppError, ErrorMetadata, LogLevel, StorageOperation};
pub use locator::{StorageLocator, GCS_SCHEME};
pub use storage_types::StorageBackend;
