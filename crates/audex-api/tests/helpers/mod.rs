//! Test helpers: build AppState and router for integration tests.
//!
//! Run from workspace root: `cargo test -p audex-api`. No ffmpeg or cloud
//! credentials are needed; storage is a local directory and the transcoder
//! is a fake.

use async_trait::async_trait;
use audex_api::setup::routes;
use audex_api::state::AppState;
use audex_core::{Config, StorageBackend};
use audex_processing::{
    ExtractionPipeline, PipelineConfig, TranscodeError, TranscodeOutput, Transcoder,
};
use audex_storage::LocalStorage;
use axum_test::TestServer;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;

/// Writes a fixed "audio" payload to the output path.
pub struct FakeTranscoder;

pub const FAKE_AUDIO: &[u8] = b"ID3 fake mp3 frames";

#[async_trait]
impl Transcoder for FakeTranscoder {
    async fn transcode(
        &self,
        input: &Path,
        output: &Path,
    ) -> Result<TranscodeOutput, TranscodeError> {
        assert!(input.exists(), "input was not downloaded before transcoding");
        tokio::fs::write(output, FAKE_AUDIO).await.unwrap();
        Ok(TranscodeOutput {
            stdout: String::new(),
            stderr: "size=       1kB time=00:00:01.00 bitrate= 128.0kbits/s".to_string(),
        })
    }
}

/// Fails the way ffmpeg does on a file that is not a video.
pub struct BrokenInputTranscoder;

pub const BROKEN_INPUT_STDERR: &str = "input_video: Invalid data found when processing input";

#[async_trait]
impl Transcoder for BrokenInputTranscoder {
    async fn transcode(
        &self,
        _input: &Path,
        _output: &Path,
    ) -> Result<TranscodeOutput, TranscodeError> {
        Err(TranscodeError::Failed {
            exit_code: Some(1),
            stdout: String::new(),
            stderr: BROKEN_INPUT_STDERR.to_string(),
        })
    }
}

/// Test application: server plus the directories backing it.
pub struct TestApp {
    pub server: TestServer,
    pub storage: LocalStorage,
    pub _buckets: TempDir,
    pub work_root: TempDir,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }

    /// Place an object in the local "bucket" store.
    pub async fn put_object(&self, bucket: &str, key: &str, data: &[u8]) {
        let path = self.storage.object_path(bucket, key).unwrap();
        tokio::fs::create_dir_all(path.parent().unwrap())
            .await
            .unwrap();
        tokio::fs::write(path, data).await.unwrap();
    }

    pub fn object_path(&self, bucket: &str, key: &str) -> PathBuf {
        self.storage.object_path(bucket, key).unwrap()
    }

    pub fn work_root_entries(&self) -> Vec<PathBuf> {
        std::fs::read_dir(self.work_root.path())
            .unwrap()
            .map(|e| e.unwrap().path())
            .collect()
    }
}

/// Setup test app with a working transcoder and no default output bucket.
pub async fn setup_test_app() -> TestApp {
    setup_test_app_with(Arc::new(FakeTranscoder), None).await
}

pub async fn setup_test_app_with(
    transcoder: Arc<dyn Transcoder>,
    default_bucket: Option<&str>,
) -> TestApp {
    let buckets = tempfile::tempdir().expect("Failed to create bucket dir");
    let work_root = tempfile::tempdir().expect("Failed to create work root");

    let config = Config {
        storage_backend: StorageBackend::Local,
        local_storage_path: Some(buckets.path().display().to_string()),
        gcs_bucket_name: default_bucket.map(String::from),
        work_dir: Some(work_root.path().to_path_buf()),
        ..Config::default()
    };

    let storage = LocalStorage::new(buckets.path())
        .await
        .expect("Failed to create local storage");

    let pipeline = ExtractionPipeline::new(
        Arc::new(storage.clone()),
        transcoder,
        PipelineConfig::from(&config),
    );
    let state = Arc::new(AppState::new(pipeline, config.storage_backend));

    let app = routes::setup_routes(&config, state).expect("Failed to build routes");
    let server = TestServer::new(app.into_make_service()).expect("Failed to create test server");

    TestApp {
        server,
        storage,
        _buckets: buckets,
        work_root,
    }
}
