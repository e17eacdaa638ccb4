//! Error types for the muxer module.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while muxing the two streams.
#[derive(Debug, Error)]
pub enum MuxError {
    /// ffmpeg binary not found.
    #[error("ffmpeg not found at path: {path}")]
    FfmpegNotFound { path: PathBuf },

    /// A file already exists at the output path and overwrite is off.
    #[error("output file already exists: {path}")]
    OutputExists { path: PathBuf },

    /// The destination directory could not be created.
    #[error("failed to create output directory {path}: {source}")]
    OutputDirectoryFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The mux process exited non-zero.
    #[error("ffmpeg exited with code {code:?}: {stderr}")]
    MuxFailed {
        code: Option<i32>,
        stderr: String,
    },

    /// The mux process did not finish within the configured timeout.
    #[error("mux timed out after {timeout_secs} seconds")]
    Timeout { timeout_secs: u64 },

    /// I/O error while running the muxer.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
