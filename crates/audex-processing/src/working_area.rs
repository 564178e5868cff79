//! Per-request scratch directory.

use std::io;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// File name of the downloaded source. No extension: ffmpeg probes the content.
pub const INPUT_FILE_NAME: &str = "input_video";
/// File name of the transcoder output.
pub const OUTPUT_FILE_NAME: &str = "extracted_audio.mp3";

const DIR_PREFIX: &str = "audex-";

/// Temporary directory holding the two staged files of one extraction.
///
/// The directory and everything in it is removed by [`WorkingArea::release`],
/// or on drop if the owning future is cancelled or unwinds.
#[derive(Debug)]
pub struct WorkingArea {
    dir: TempDir,
}

impl WorkingArea {
    /// Create a fresh directory under `root`, or under the system temp dir.
    pub fn create(root: Option<&Path>) -> io::Result<Self> {
        let mut builder = tempfile::Builder::new();
        builder.prefix(DIR_PREFIX);

        let dir = match root {
            Some(root) => {
                std::fs::create_dir_all(root)?;
                builder.tempdir_in(root)?
            }
            None => builder.tempdir()?,
        };

        tracing::debug!(path = %dir.path().display(), "Working area created");
        Ok(Self { dir })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn input_path(&self) -> PathBuf {
        self.dir.path().join(INPUT_FILE_NAME)
    }

    pub fn output_path(&self) -> PathBuf {
        self.dir.path().join(OUTPUT_FILE_NAME)
    }

    /// Remove the directory now, logging (not returning) any failure.
    pub fn release(self) {
        let path = self.dir.path().to_path_buf();
        match self.dir.close() {
            Ok(()) => tracing::debug!(path = %path.display(), "Working area released"),
            Err(e) => tracing::warn!(
                path = %path.display(),
                error = %e,
                "Failed to remove working area"
            ),
        }
    }
}
