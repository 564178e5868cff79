//! Audex Storage Library
//!
//! Object storage abstraction used by the extraction pipeline. Objects are
//! addressed by `(bucket, key)`; transfers always go through a local file so
//! the transcoder can work on disk.
//!
//! Backends:
//! - **GCS** (`storage-gcs`): Google Cloud Storage through `object_store`.
//! - **Local** (`storage-local`): buckets are subdirectories of a base path.

pub mod factory;
#[cfg(feature = "storage-gcs")]
pub mod gcs;
#[cfg(feature = "storage-local")]
pub mod local;
pub mod traits;

// Re-export commonly used types
pub use audex_core::StorageBackend;
pub use factory::create_storage;
#[cfg(feature = "storage-gcs")]
pub use gcs::GcsStorage;
#[cfg(feature = "storage-local")]
pub use local::LocalStorage;
pub use traits::{ObjectStorage, StorageError, StorageResult};
