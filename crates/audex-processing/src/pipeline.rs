//! Audio extraction orchestration: download → transcode → upload.

use audex_core::{AppError, Config, StorageLocator, StorageOperation};
use audex_storage::ObjectStorage;
use std::path::PathBuf;
use std::sync::Arc;

use crate::transcoder::{TranscodeError, Transcoder, OUTPUT_CONTENT_TYPE};
use crate::working_area::WorkingArea;

/// Config for the extraction pipeline.
#[derive(Clone, Debug, Default)]
pub struct PipelineConfig {
    /// Bucket used when the output path is a bare key.
    pub default_output_bucket: Option<String>,
    /// Parent directory for working areas; system temp dir when `None`.
    pub work_dir: Option<PathBuf>,
}

impl From<&Config> for PipelineConfig {
    fn from(config: &Config) -> Self {
        Self {
            default_output_bucket: config.gcs_bucket_name.clone(),
            work_dir: config.work_dir.clone(),
        }
    }
}

/// Source and destination of one extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionRequest {
    pub input: StorageLocator,
    pub output: StorageLocator,
}

#[derive(Debug, Clone)]
pub struct ExtractionOutcome {
    pub output: StorageLocator,
    /// Backend reference returned by the upload.
    pub remote_reference: String,
}

/// Runs one extraction per call; holds no per-request state.
pub struct ExtractionPipeline {
    storage: Arc<dyn ObjectStorage>,
    transcoder: Arc<dyn Transcoder>,
    config: PipelineConfig,
}

impl ExtractionPipeline {
    pub fn new(
        storage: Arc<dyn ObjectStorage>,
        transcoder: Arc<dyn Transcoder>,
        config: PipelineConfig,
    ) -> Self {
        Self {
            storage,
            transcoder,
            config,
        }
    }

    /// Parse the two locator strings of a request. Input is checked first.
    pub fn parse_request(
        &self,
        input_uri: &str,
        output_path: &str,
    ) -> Result<ExtractionRequest, AppError> {
        let input = StorageLocator::parse_input(input_uri)?;
        let output =
            StorageLocator::parse_output(output_path, self.config.default_output_bucket.as_deref())?;
        Ok(ExtractionRequest { input, output })
    }

    /// Run the full pipeline. The working area is gone by the time this returns.
    #[tracing::instrument(skip(self, request), fields(input = %request.input, output = %request.output))]
    pub async fn run(&self, request: &ExtractionRequest) -> Result<ExtractionOutcome, AppError> {
        let area = WorkingArea::create(self.config.work_dir.as_deref())
            .map_err(|e| AppError::Internal(format!("Failed to create working directory: {}", e)))?;

        let result = self.run_stages(request, &area).await;
        area.release();

        match &result {
            Ok(outcome) => tracing::info!(
                output = %outcome.output,
                remote_reference = %outcome.remote_reference,
                "Audio extraction pipeline completed"
            ),
            Err(e) => tracing::warn!(
                error = %e,
                error_type = e.error_type(),
                "Audio extraction pipeline failed"
            ),
        }

        result
    }

    async fn run_stages(
        &self,
        request: &ExtractionRequest,
        area: &WorkingArea,
    ) -> Result<ExtractionOutcome, AppError> {
        let input_path = area.input_path();
        let output_path = area.output_path();

        tracing::info!(
            source = %request.input,
            local_path = %input_path.display(),
            "Downloading video"
        );
        let size = self
            .storage
            .download(&request.input.bucket, &request.input.key, &input_path)
            .await
            .map_err(|e| AppError::Storage {
                operation: StorageOperation::Download,
                detail: e.to_string(),
            })?;
        tracing::info!(size_bytes = size, "Video download complete");

        tracing::info!(
            local_input = %input_path.display(),
            local_output = %output_path.display(),
            "Extracting audio"
        );
        self.transcoder
            .transcode(&input_path, &output_path)
            .await
            .map_err(|e| match e {
                TranscodeError::Failed { stderr, .. } => AppError::Transcode { stderr },
                spawn @ TranscodeError::Spawn { .. } => AppError::Internal(spawn.to_string()),
            })?;

        tracing::info!(destination = %request.output, "Uploading extracted audio");
        let remote_reference = self
            .storage
            .upload(
                &output_path,
                &request.output.bucket,
                &request.output.key,
                OUTPUT_CONTENT_TYPE,
            )
            .await
            .map_err(|e| AppError::Storage {
                operation: StorageOperation::Upload,
                detail: e.to_string(),
            })?;
        tracing::info!("Audio upload complete");

        Ok(ExtractionOutcome {
            output: request.output.clone(),
            remote_reference,
        })
    }
}
