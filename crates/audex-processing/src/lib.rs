//! Audex Processing Library
//!
//! The audio extraction pipeline: a scoped working area on local disk, the
//! ffmpeg transcoder, and the download → transcode → upload orchestration.

pub mod pipeline;
pub mod transcoder;
pub mod working_area;

// Re-export commonly used types
pub use pipeline::{ExtractionOutcome, ExtractionPipeline, ExtractionRequest, PipelineConfig};
pub use transcoder::{FfmpegTranscoder, TranscodeError, TranscodeOutput, Transcoder};
pub use working_area::WorkingArea;
