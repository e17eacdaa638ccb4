//! Mock resolver for testing.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::resolver::{MediaResolver, ResolveError, ResolvedMedia};

use super::fixtures;

/// Mock implementation of the MediaResolver trait.
///
/// Provides controllable behavior for testing:
/// - Track resolved URLs for assertions
/// - Configure the media returned by the next resolutions
/// - Simulate failures
#[derive(Debug, Clone)]
pub struct MockResolver {
    /// URLs passed to `resolve`, in call order.
    calls: Arc<RwLock<Vec<String>>>,
    /// Media returned by every successful resolution.
    media: Arc<RwLock<ResolvedMedia>>,
    /// If set, the next resolution fails with this error.
    next_error: Arc<RwLock<Option<ResolveError>>>,
}

impl Default for MockResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl MockResolver {
    /// Create a new mock resolver returning the default fixture media.
    pub fn new() -> Self {
        Self {
            calls: Arc::new(RwLock::new(Vec::new())),
            media: Arc::new(RwLock::new(fixtures::resolved_media("Foo Bar", "Music"))),
            next_error: Arc::new(RwLock::new(None)),
        }
    }

    /// Set the media returned by subsequent resolutions.
    pub async fn set_media(&self, media: ResolvedMedia) {
        *self.media.write().await = media;
    }

    /// Configure the next resolution to fail with the given error.
    pub async fn set_next_error(&self, error: ResolveError) {
        *self.next_error.write().await = Some(error);
    }

    /// Get all URLs passed to `resolve` so far.
    pub async fn recorded_urls(&self) -> Vec<String> {
        self.calls.read().await.clone()
    }

    /// Get the number of resolutions performed.
    pub async fn resolve_count(&self) -> usize {
        self.calls.read().await.len()
    }
}

#[async_trait]
impl MediaResolver for MockResolver {
    fn name(&self) -> &str {
        "mock"
    }

    async fn resolve(&self, url: &str) -> Result<ResolvedMedia, ResolveError> {
        self.calls.write().await.push(url.to_string());

        if let Some(err) = self.next_error.write().await.take() {
            return Err(err);
        }

        Ok(self.media.read().await.clone())
    }
}
