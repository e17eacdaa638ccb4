//! Mock fetcher for testing.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

use crate::fetcher::{FetchError, FetchedStreams, StreamFetcher, TempAsset};
use crate::resolver::{ResolvedMedia, StreamKind};

/// A recorded fetch call for test assertions.
#[derive(Debug, Clone)]
pub struct RecordedFetch {
    pub video_url: String,
    pub audio_url: String,
    pub video_dest: PathBuf,
    pub audio_dest: PathBuf,
}

/// Mock implementation of the StreamFetcher trait.
///
/// Writes small placeholder files at the destination paths so cleanup
/// behavior can be asserted against the real filesystem. Honors the
/// trait contract on failure: nothing it wrote remains on disk.
#[derive(Debug, Clone)]
pub struct MockFetcher {
    /// Recorded fetch calls.
    calls: Arc<RwLock<Vec<RecordedFetch>>>,
    /// If set, the next fetch fails with this error.
    next_error: Arc<RwLock<Option<FetchError>>>,
    /// Simulated download duration.
    fetch_delay: Arc<RwLock<Duration>>,
    /// Leave the placeholder files behind on failure, violating the
    /// contract on purpose so cleanup tests can exercise leftovers.
    keep_files_on_error: Arc<RwLock<bool>>,
}

impl Default for MockFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl MockFetcher {
    /// Create a new mock fetcher.
    pub fn new() -> Self {
        Self {
            calls: Arc::new(RwLock::new(Vec::new())),
            next_error: Arc::new(RwLock::new(None)),
            fetch_delay: Arc::new(RwLock::new(Duration::ZERO)),
            keep_files_on_error: Arc::new(RwLock::new(false)),
        }
    }

    /// Get all recorded fetch calls.
    pub async fn recorded_fetches(&self) -> Vec<RecordedFetch> {
        self.calls.read().await.clone()
    }

    /// Get the number of fetches performed.
    pub async fn fetch_count(&self) -> usize {
        self.calls.read().await.len()
    }

    /// Configure the next fetch to fail with the given error.
    pub async fn set_next_error(&self, error: FetchError) {
        *self.next_error.write().await = Some(error);
    }

    /// Set the simulated download duration.
    pub async fn set_fetch_delay(&self, delay: Duration) {
        *self.fetch_delay.write().await = delay;
    }

    /// Leave placeholder files on disk when the fetch fails.
    pub async fn set_keep_files_on_error(&self, keep: bool) {
        *self.keep_files_on_error.write().await = keep;
    }
}

#[async_trait]
impl StreamFetcher for MockFetcher {
    fn name(&self) -> &str {
        "mock"
    }

    async fn fetch(
        &self,
        media: &ResolvedMedia,
        video_dest: &Path,
        audio_dest: &Path,
    ) -> Result<FetchedStreams, FetchError> {
        self.calls.write().await.push(RecordedFetch {
            video_url: media.video.url.clone(),
            audio_url: media.audio.url.clone(),
            video_dest: video_dest.to_path_buf(),
            audio_dest: audio_dest.to_path_buf(),
        });

        write_placeholder(StreamKind::Video, video_dest, b"video bytes").await?;
        write_placeholder(StreamKind::Audio, audio_dest, b"audio bytes").await?;

        let delay = *self.fetch_delay.read().await;
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        if let Some(err) = self.next_error.write().await.take() {
            if !*self.keep_files_on_error.read().await {
                let _ = tokio::fs::remove_file(video_dest).await;
                let _ = tokio::fs::remove_file(audio_dest).await;
            }
            return Err(err);
        }

        Ok(FetchedStreams {
            video: TempAsset {
                kind: StreamKind::Video,
                path: video_dest.to_path_buf(),
            },
            audio: TempAsset {
                kind: StreamKind::Audio,
                path: audio_dest.to_path_buf(),
            },
        })
    }
}

async fn write_placeholder(
    kind: StreamKind,
    path: &Path,
    contents: &[u8],
) -> Result<(), FetchError> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|source| FetchError::WorkDir {
                path: parent.to_path_buf(),
                source,
            })?;
    }
    tokio::fs::write(path, contents)
        .await
        .map_err(|source| FetchError::Write {
            kind,
            path: path.to_path_buf(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::fixtures;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_fetch_writes_placeholder_files() {
        let dir = TempDir::new().unwrap();
        let fetcher = MockFetcher::new();
        let media = fixtures::resolved_media("Foo Bar", "Music");

        let video = dir.path().join("v.mp4");
        let audio = dir.path().join("a.m4a");
        let fetched = fetcher.fetch(&media, &video, &audio).await.unwrap();

        assert_eq!(fetched.video.path, video);
        assert_eq!(fetched.audio.path, audio);
        assert!(video.exists());
        assert!(audio.exists());
        assert_eq!(fetcher.fetch_count().await, 1);
    }

    #[tokio::test]
    async fn test_failed_fetch_leaves_no_files() {
        let dir = TempDir::new().unwrap();
        let fetcher = MockFetcher::new();
        fetcher
            .set_next_error(FetchError::Status {
                kind: StreamKind::Audio,
                status: 403,
            })
            .await;
        let media = fixtures::resolved_media("Foo Bar", "Music");

        let video = dir.path().join("v.mp4");
        let audio = dir.path().join("a.m4a");
        let result = fetcher.fetch(&media, &video, &audio).await;

        assert!(result.is_err());
        assert!(!video.exists());
        assert!(!audio.exists());
    }

    #[tokio::test]
    async fn test_records_destination_paths() {
        let dir = TempDir::new().unwrap();
        let fetcher = MockFetcher::new();
        let media = fixtures::resolved_media("Foo Bar", "Music");

        let video = dir.path().join("v.mp4");
        let audio = dir.path().join("a.m4a");
        fetcher.fetch(&media, &video, &audio).await.unwrap();

        let calls = fetcher.recorded_fetches().await;
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].video_dest, video);
        assert_eq!(calls[0].audio_dest, audio);
        assert_eq!(calls[0].video_url, "https://cdn.example/video");
    }
}
