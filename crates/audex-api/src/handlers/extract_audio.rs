use crate::error::HttpAppError;
use crate::state::AppState;
use audex_core::AppError;
use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::Instrument;
use uuid::Uuid;

const INPUT_FIELD: &str = "input_video_gcs_uri";
const OUTPUT_FIELD: &str = "output_audio_gcs_path";

/// Both fields are required; they are optional here so a missing field
/// produces our own 400 instead of axum's rejection.
#[derive(Debug, Default, Deserialize)]
pub struct ExtractAudioRequest {
    pub input_video_gcs_uri: Option<String>,
    pub output_audio_gcs_path: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ExtractAudioResponse {
    pub message: String,
    pub output_audio_gcs_uri: String,
}

impl ExtractAudioRequest {
    /// Return both fields, or a validation error naming the missing ones.
    fn into_fields(self) -> Result<(String, String), AppError> {
        match (self.input_video_gcs_uri, self.output_audio_gcs_path) {
            (Some(input), Some(output)) => Ok((input, output)),
            (input, output) => {
                let mut missing = Vec::new();
                if input.is_none() {
                    missing.push(format!("'{}'", INPUT_FIELD));
                }
                if output.is_none() {
                    missing.push(format!("'{}'", OUTPUT_FIELD));
                }
                Err(AppError::Validation(format!(
                    "Missing {} in request body",
                    missing.join(" and ")
                )))
            }
        }
    }
}

/// Map an extractor rejection to a fixed client message. The extractor's own
/// text is only logged.
fn rejection_to_error(rejection: JsonRejection) -> AppError {
    tracing::debug!(rejection = %rejection.body_text(), "Rejected request body");
    match rejection {
        JsonRejection::JsonDataError(_) => AppError::Validation(format!(
            "Invalid request body: '{}' and '{}' must be strings",
            INPUT_FIELD, OUTPUT_FIELD
        )),
        _ => AppError::Validation(format!(
            "Missing '{}' or '{}' in request body",
            INPUT_FIELD, OUTPUT_FIELD
        )),
    }
}

/// `POST /extract-audio`
pub async fn extract_audio(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ExtractAudioRequest>, JsonRejection>,
) -> Result<Json<ExtractAudioResponse>, HttpAppError> {
    let Json(body) = payload.map_err(rejection_to_error)?;

    let (input_uri, output_path) = body.into_fields()?;
    let request = state.pipeline.parse_request(&input_uri, &output_path)?;

    let job_id = Uuid::new_v4();
    let span = tracing::info_span!("extract_audio", job_id = %job_id);
    let outcome = state.pipeline.run(&request).instrument(span).await?;

    Ok(Json(ExtractAudioResponse {
        message: "Audio extracted and uploaded successfully.".to_string(),
        output_audio_gcs_uri: outcome.output.to_string(),
    }))
}
