//! Application state shared by all handlers.

use audex_processing::ExtractionPipeline;
use audex_storage::StorageBackend;
use std::sync::Arc;

/// Immutable after startup; cloned into handlers behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<ExtractionPipeline>,
    pub storage_backend: StorageBackend,
}

impl AppState {
    pub fn new(pipeline: ExtractionPipeline, storage_backend: StorageBackend) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
            storage_backend,
        }
    }
}
