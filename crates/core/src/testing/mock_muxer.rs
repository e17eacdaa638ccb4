//! Mock muxer for testing.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

use crate::muxer::{MuxError, Muxer};

/// A recorded merge call for test assertions.
#[derive(Debug, Clone)]
pub struct RecordedMerge {
    pub video: PathBuf,
    pub audio: PathBuf,
    pub output: PathBuf,
}

/// Mock implementation of the Muxer trait.
///
/// A successful merge writes a small file at the output path (creating
/// parent directories) so downstream assertions can stat it. A failed
/// merge writes nothing, matching the trait contract.
#[derive(Debug, Clone)]
pub struct MockMuxer {
    /// Recorded merge calls.
    calls: Arc<RwLock<Vec<RecordedMerge>>>,
    /// If set, the next merge fails with this error.
    next_error: Arc<RwLock<Option<MuxError>>>,
    /// Simulated merge duration.
    merge_delay: Arc<RwLock<Duration>>,
}

impl Default for MockMuxer {
    fn default() -> Self {
        Self::new()
    }
}

impl MockMuxer {
    /// Create a new mock muxer.
    pub fn new() -> Self {
        Self {
            calls: Arc::new(RwLock::new(Vec::new())),
            next_error: Arc::new(RwLock::new(None)),
            merge_delay: Arc::new(RwLock::new(Duration::ZERO)),
        }
    }

    /// Get all recorded merge calls.
    pub async fn recorded_merges(&self) -> Vec<RecordedMerge> {
        self.calls.read().await.clone()
    }

    /// Get the number of merges performed.
    pub async fn merge_count(&self) -> usize {
        self.calls.read().await.len()
    }

    /// Configure the next merge to fail with the given error.
    pub async fn set_next_error(&self, error: MuxError) {
        *self.next_error.write().await = Some(error);
    }

    /// Set the simulated merge duration.
    pub async fn set_merge_delay(&self, delay: Duration) {
        *self.merge_delay.write().await = delay;
    }
}

#[async_trait]
impl Muxer for MockMuxer {
    fn name(&self) -> &str {
        "mock"
    }

    async fn merge(&self, video: &Path, audio: &Path, output: &Path) -> Result<(), MuxError> {
        self.calls.write().await.push(RecordedMerge {
            video: video.to_path_buf(),
            audio: audio.to_path_buf(),
            output: output.to_path_buf(),
        });

        let delay = *self.merge_delay.read().await;
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        if let Some(err) = self.next_error.write().await.take() {
            return Err(err);
        }

        if let Some(parent) = output.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(output, b"merged bytes").await?;
        Ok(())
    }

    async fn validate(&self) -> Result<(), MuxError> {
        if let Some(err) = self.next_error.write().await.take() {
            return Err(err);
        }
        Ok(())
    }
}
