//! Error types for the fetcher module.

use std::path::PathBuf;
use thiserror::Error;

use crate::resolver::StreamKind;

/// Errors that can occur while downloading a stream to disk.
///
/// Every variant names the stream that failed so operator logs can tell
/// the two downloads apart.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The HTTP request for a stream failed (connect, TLS, mid-body).
    #[error("{kind} stream request failed: {source}")]
    Request {
        kind: StreamKind,
        #[source]
        source: reqwest::Error,
    },

    /// The remote returned a non-success status for a stream URL.
    #[error("{kind} stream returned HTTP status {status}")]
    Status { kind: StreamKind, status: u16 },

    /// Writing downloaded bytes to the temp file failed.
    #[error("failed writing {kind} stream to {path}: {source}")]
    Write {
        kind: StreamKind,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The working directory could not be created.
    #[error("failed to create working directory {path}: {source}")]
    WorkDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl FetchError {
    /// The stream this error concerns, if it is stream-specific.
    pub fn stream_kind(&self) -> Option<StreamKind> {
        match self {
            Self::Request { kind, .. } | Self::Status { kind, .. } | Self::Write { kind, .. } => {
                Some(*kind)
            }
            Self::WorkDir { .. } => None,
        }
    }
}
