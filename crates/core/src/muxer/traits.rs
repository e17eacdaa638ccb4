//! Trait definitions for the muxer module.

use async_trait::async_trait;
use std::path::Path;

use super::error::MuxError;

/// A muxer that combines separately-encoded video and audio streams into
/// one container file without re-encoding.
///
/// Contract: the output's parent directory is created if absent (an
/// existing directory is not an error), the stage resolves only on the
/// process's terminal event, and a failed merge leaves no partial file at
/// the output path.
#[async_trait]
pub trait Muxer: Send + Sync {
    /// Returns the name of this muxer implementation.
    fn name(&self) -> &str;

    /// Merges the video and audio files into `output`.
    async fn merge(&self, video: &Path, audio: &Path, output: &Path) -> Result<(), MuxError>;

    /// Validates that the muxer is properly configured and ready.
    async fn validate(&self) -> Result<(), MuxError>;
}
