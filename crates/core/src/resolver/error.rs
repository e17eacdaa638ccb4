//! Error types for the resolver module.

use std::path::PathBuf;
use thiserror::Error;

use super::types::StreamKind;

/// Errors that can occur while resolving a source URL into metadata.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// The input was not a valid URL.
    #[error("invalid source url {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },

    /// The resolver binary could not be found.
    #[error("yt-dlp not found at path: {path}")]
    ResolverNotFound { path: PathBuf },

    /// The resolver process exited non-zero (unreachable resource,
    /// removed video, unsupported URL, ...).
    #[error("yt-dlp exited with code {code:?}: {stderr}")]
    ResolverFailed { code: Option<i32>, stderr: String },

    /// Resolution did not finish within the configured timeout.
    #[error("metadata resolution timed out after {timeout_secs} seconds")]
    Timeout { timeout_secs: u64 },

    /// The resolver produced output we could not parse.
    #[error("failed to parse remote metadata: {reason}")]
    MetadataParse { reason: String },

    /// The remote descriptor had no usable format for one stream kind.
    #[error("no usable {kind} format in remote metadata")]
    NoUsableFormat { kind: StreamKind },

    /// I/O error while running the resolver.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
