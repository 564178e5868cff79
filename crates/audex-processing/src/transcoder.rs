//! Audio extraction through an external ffmpeg process.

use async_trait::async_trait;
use std::io;
use std::path::Path;
use std::process::Stdio;
use thiserror::Error;
use tokio::process::Command;

/// LAME MP3 encoder.
pub const AUDIO_CODEC: &str = "libmp3lame";
/// VBR quality (0-9, lower is better). 2 is ~190 kbps.
pub const AUDIO_QUALITY: &str = "2";
/// Content type of the produced audio object.
pub const OUTPUT_CONTENT_TYPE: &str = "audio/mpeg";

#[derive(Debug, Error)]
pub enum TranscodeError {
    /// The transcoder ran and exited non-zero.
    #[error("transcoder exited with status {exit_code:?}")]
    Failed {
        exit_code: Option<i32>,
        stdout: String,
        stderr: String,
    },

    /// The transcoder could not be started at all.
    #[error("failed to execute {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },
}

/// Captured output of a successful run. ffmpeg logs progress to stderr, so a
/// non-empty stderr here is normal.
#[derive(Debug, Clone, Default)]
pub struct TranscodeOutput {
    pub stdout: String,
    pub stderr: String,
}

/// Turns a local video file into a local audio file.
#[async_trait]
pub trait Transcoder: Send + Sync {
    async fn transcode(&self, input: &Path, output: &Path)
        -> Result<TranscodeOutput, TranscodeError>;
}

pub struct FfmpegTranscoder {
    ffmpeg_path: String,
}

impl FfmpegTranscoder {
    pub fn new(ffmpeg_path: impl Into<String>) -> Self {
        Self {
            ffmpeg_path: ffmpeg_path.into(),
        }
    }

    /// `-i <input> -vn -acodec libmp3lame -q:a 2 -y <output>`
    pub fn build_args(input: &Path, output: &Path) -> Vec<String> {
        vec![
            "-i".to_string(),
            input.to_string_lossy().to_string(),
            "-vn".to_string(),
            "-acodec".to_string(),
            AUDIO_CODEC.to_string(),
            "-q:a".to_string(),
            AUDIO_QUALITY.to_string(),
            "-y".to_string(),
            output.to_string_lossy().to_string(),
        ]
    }
}

#[async_trait]
impl Transcoder for FfmpegTranscoder {
    #[tracing::instrument(skip(self, input, output), fields(service = "ffmpeg"))]
    async fn transcode(
        &self,
        input: &Path,
        output: &Path,
    ) -> Result<TranscodeOutput, TranscodeError> {
        let args = Self::build_args(input, output);
        let start = std::time::Instant::now();

        let result = Command::new(&self.ffmpeg_path)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|source| TranscodeError::Spawn {
                program: self.ffmpeg_path.clone(),
                source,
            })?;

        let stdout = String::from_utf8_lossy(&result.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&result.stderr).into_owned();

        if !result.status.success() {
            tracing::error!(
                exit_code = ?result.status.code(),
                duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                stdout = %stdout,
                stderr = %stderr,
                "FFmpeg failed"
            );
            return Err(TranscodeError::Failed {
                exit_code: result.status.code(),
                stdout,
                stderr,
            });
        }

        tracing::debug!(stdout = %stdout, stderr = %stderr, "FFmpeg output");
        tracing::info!(
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Audio extraction complete"
        );

        Ok(TranscodeOutput { stdout, stderr })
    }
}
