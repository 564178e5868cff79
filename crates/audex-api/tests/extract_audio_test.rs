//! Audio extraction API integration tests.
//!
//! Run with: `cargo test -p audex-api --test extract_audio_test`

mod helpers;

use helpers::{setup_test_app, setup_test_app_with, BrokenInputTranscoder, FakeTranscoder};
use serde_json::{json, Value};
use std::sync::Arc;

#[tokio::test]
async fn test_extract_audio_success() {
    let app = setup_test_app().await;
    app.put_object("in-bucket", "videos/input.mp4", b"fake mp4 bytes")
        .await;

    let response = app
        .client()
        .post("/extract-audio")
        .json(&json!({
            "input_video_gcs_uri": "gs://in-bucket/videos/input.mp4",
            "output_audio_gcs_path": "out-bucket/jobs/123/audio.mp3",
        }))
        .await;

    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["message"], "Audio extracted and uploaded successfully.");
    assert_eq!(
        body["output_audio_gcs_uri"],
        "gs://out-bucket/jobs/123/audio.mp3"
    );

    let uploaded = tokio::fs::read(app.object_path("out-bucket", "jobs/123/audio.mp3"))
        .await
        .unwrap();
    assert_eq!(uploaded, helpers::FAKE_AUDIO);
    assert!(app.work_root_entries().is_empty());
}

#[tokio::test]
async fn test_bare_key_uses_default_bucket() {
    let app = setup_test_app_with(Arc::new(FakeTranscoder), Some("default-bucket")).await;
    app.put_object("in-bucket", "v.mp4", b"video").await;

    let response = app
        .client()
        .post("/extract-audio")
        .json(&json!({
            "input_video_gcs_uri": "gs://in-bucket/v.mp4",
            "output_audio_gcs_path": "audio.mp3",
        }))
        .await;

    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["output_audio_gcs_uri"], "gs://default-bucket/audio.mp3");
    assert!(app.object_path("default-bucket", "audio.mp3").exists());
}

#[tokio::test]
async fn test_missing_field_is_bad_request() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .post("/extract-audio")
        .json(&json!({ "input_video_gcs_uri": "gs://b/v.mp4" }))
        .await;

    assert_eq!(response.status_code(), 400);
    let body: Value = response.json();
    assert!(body["error"]
        .as_str()
        .unwrap()
        .contains("output_audio_gcs_path"));
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_malformed_body_is_bad_request() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .post("/extract-audio")
        .text("{not json")
        .await;

    assert_eq!(response.status_code(), 400);
    let body: Value = response.json();
    assert_eq!(
        body["error"],
        "Missing 'input_video_gcs_uri' or 'output_audio_gcs_path' in request body"
    );
    assert!(body.get("details").is_none());
}

#[tokio::test]
async fn test_wrong_field_type_is_bad_request() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .post("/extract-audio")
        .json(&json!({
            "input_video_gcs_uri": 5,
            "output_audio_gcs_path": "b/a.mp3",
        }))
        .await;

    assert_eq!(response.status_code(), 400);
    let body: Value = response.json();
    assert_eq!(
        body["error"],
        "Invalid request body: 'input_video_gcs_uri' and 'output_audio_gcs_path' must be strings"
    );
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert!(body.get("details").is_none());
    assert!(app.work_root_entries().is_empty());
}

#[tokio::test]
async fn test_input_without_scheme_is_bad_request() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .post("/extract-audio")
        .json(&json!({
            "input_video_gcs_uri": "not-a-gcs-uri",
            "output_audio_gcs_path": "b/a.mp3",
        }))
        .await;

    assert_eq!(response.status_code(), 400);
    let body: Value = response.json();
    assert_eq!(body["error"], "Invalid GCS URI format for input video.");
    assert!(app.work_root_entries().is_empty());
}

#[tokio::test]
async fn test_bare_key_without_default_bucket_is_bad_request() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .post("/extract-audio")
        .json(&json!({
            "input_video_gcs_uri": "gs://b/v.mp4",
            "output_audio_gcs_path": "audio.mp3",
        }))
        .await;

    assert_eq!(response.status_code(), 400);
    let body: Value = response.json();
    assert!(body["error"]
        .as_str()
        .unwrap()
        .contains("GCS_BUCKET_NAME"));
    assert_eq!(body["code"], "CONFIGURATION_ERROR");
}

#[tokio::test]
async fn test_transcoder_failure_returns_stderr() {
    let app = setup_test_app_with(Arc::new(BrokenInputTranscoder), None).await;
    app.put_object("in-bucket", "not-a-video.mp4", b"plain text")
        .await;

    let response = app
        .client()
        .post("/extract-audio")
        .json(&json!({
            "input_video_gcs_uri": "gs://in-bucket/not-a-video.mp4",
            "output_audio_gcs_path": "out-bucket/a.mp3",
        }))
        .await;

    assert_eq!(response.status_code(), 500);
    let body: Value = response.json();
    assert_eq!(body["error"], "FFMPEG processing failed.");
    assert!(body["details"]
        .as_str()
        .unwrap()
        .contains("Invalid data found"));
    assert!(!app.object_path("out-bucket", "a.mp3").exists());
    assert!(app.work_root_entries().is_empty());
}

#[tokio::test]
async fn test_missing_source_object_is_server_error() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .post("/extract-audio")
        .json(&json!({
            "input_video_gcs_uri": "gs://in-bucket/does-not-exist.mp4",
            "output_audio_gcs_path": "out-bucket/a.mp3",
        }))
        .await;

    assert_eq!(response.status_code(), 500);
    let body: Value = response.json();
    assert_eq!(body["error"], "Failed to download input video.");
    assert_eq!(body["code"], "STORAGE_ERROR");
    assert!(app.work_root_entries().is_empty());
}

#[tokio::test]
async fn test_health_check() {
    let app = setup_test_app().await;

    let response = app.client().get("/health").await;

    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["storage_backend"], "local");
}
