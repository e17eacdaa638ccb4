//! HTTP stream fetcher implementation.

use async_trait::async_trait;
use futures::StreamExt;
use reqwest::Client;
use std::path::Path;
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};

use crate::resolver::{ResolvedMedia, StreamKind};

use super::error::FetchError;
use super::traits::StreamFetcher;
use super::types::{FetchedStreams, TempAsset};

const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

/// Fetcher that streams the selected format URLs to disk over HTTP.
pub struct HttpStreamFetcher {
    client: Client,
}

impl HttpStreamFetcher {
    /// Creates a fetcher with its own HTTP client.
    ///
    /// Only the connect phase is bounded; media bodies can legitimately
    /// take a long time, so no overall request timeout is set.
    pub fn new() -> Self {
        let client = Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .build()
            .expect("Failed to create HTTP client");
        Self { client }
    }

    /// Creates a fetcher reusing an existing client.
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    /// Streams one URL to one file.
    async fn fetch_to_file(
        &self,
        kind: StreamKind,
        url: &str,
        dest: &Path,
    ) -> Result<(), FetchError> {
        if let Some(parent) = dest.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|source| FetchError::WorkDir {
                    path: parent.to_path_buf(),
                    source,
                })?;
        }

        debug!(%kind, dest = %dest.display(), "downloading stream");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| FetchError::Request { kind, source })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                kind,
                status: status.as_u16(),
            });
        }

        let mut file =
            tokio::fs::File::create(dest)
                .await
                .map_err(|source| FetchError::Write {
                    kind,
                    path: dest.to_path_buf(),
                    source,
                })?;

        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let data = chunk.map_err(|source| FetchError::Request { kind, source })?;
            file.write_all(&data)
                .await
                .map_err(|source| FetchError::Write {
                    kind,
                    path: dest.to_path_buf(),
                    source,
                })?;
        }

        file.flush().await.map_err(|source| FetchError::Write {
            kind,
            path: dest.to_path_buf(),
            source,
        })?;

        Ok(())
    }

    /// Best-effort removal of files left behind by a failed fetch.
    async fn discard(paths: &[&Path]) {
        for path in paths {
            if let Err(e) = tokio::fs::remove_file(path).await {
                if e.kind() != std::io::ErrorKind::NotFound {
                    warn!(path = %path.display(), "failed to remove partial download: {}", e);
                }
            }
        }
    }
}

impl Default for HttpStreamFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl StreamFetcher for HttpStreamFetcher {
    fn name(&self) -> &str {
        "http"
    }

    async fn fetch(
        &self,
        media: &ResolvedMedia,
        video_dest: &Path,
        audio_dest: &Path,
    ) -> Result<FetchedStreams, FetchError> {
        // Both downloads run to completion regardless of the other's
        // outcome; total latency approximates the slower of the two.
        let (video_res, audio_res) = tokio::join!(
            self.fetch_to_file(StreamKind::Video, &media.video.url, video_dest),
            self.fetch_to_file(StreamKind::Audio, &media.audio.url, audio_dest),
        );

        match (video_res, audio_res) {
            (Ok(()), Ok(())) => Ok(FetchedStreams {
                video: TempAsset {
                    kind: StreamKind::Video,
                    path: video_dest.to_path_buf(),
                },
                audio: TempAsset {
                    kind: StreamKind::Audio,
                    path: audio_dest.to_path_buf(),
                },
            }),
            // Report the video error first when both failed.
            (Err(e), _) | (Ok(()), Err(e)) => {
                Self::discard(&[video_dest, audio_dest]).await;
                Err(e)
            }
        }
    }
}
