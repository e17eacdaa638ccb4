//! Trait definitions for the fetcher module.

use async_trait::async_trait;
use std::path::Path;

use crate::resolver::ResolvedMedia;

use super::error::FetchError;
use super::types::FetchedStreams;

/// A fetcher that downloads the two elementary streams to temp files.
///
/// The destination paths are chosen by the caller (the pipeline owns
/// temp file naming). Contract: the two downloads run concurrently and
/// both are awaited to completion even if one fails; on failure no file
/// written by this call remains on disk.
#[async_trait]
pub trait StreamFetcher: Send + Sync {
    /// Returns the name of this fetcher implementation.
    fn name(&self) -> &str;

    /// Downloads both streams, writing them to the given paths.
    async fn fetch(
        &self,
        media: &ResolvedMedia,
        video_dest: &Path,
        audio_dest: &Path,
    ) -> Result<FetchedStreams, FetchError>;
}
