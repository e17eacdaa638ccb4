//! Types for the resolver module.

use serde::{Deserialize, Serialize};

use crate::sanitize::sanitize_title;

/// Which of the two elementary streams a value refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StreamKind {
    Video,
    Audio,
}

impl StreamKind {
    /// Suffix used in temp file names (`<title>_video.<ext>`).
    pub fn file_suffix(&self) -> &'static str {
        match self {
            Self::Video => "video",
            Self::Audio => "audio",
        }
    }
}

impl std::fmt::Display for StreamKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Video => write!(f, "video"),
            Self::Audio => write!(f, "audio"),
        }
    }
}

/// Normalized metadata describing one media item to be processed.
///
/// Immutable; built exactly once per request by the resolver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoDescriptor {
    /// Canonical URL identifying the media.
    pub source_url: String,
    /// Platform-assigned video id.
    pub video_id: String,
    /// Platform-assigned owning channel id.
    pub channel_id: String,
    /// Display name of the owning channel.
    pub channel_name: String,
    /// Raw display title (arbitrary Unicode).
    pub title: String,
    /// Filesystem-safe form of `title`; every on-disk name derives from it.
    pub sanitized_title: String,
    /// Subdirectory under the destination root. Empty means the output
    /// lands directly in the destination root.
    pub category: String,
}

impl VideoDescriptor {
    /// Builds a descriptor, deriving `sanitized_title` from `title`.
    pub fn new(
        source_url: impl Into<String>,
        video_id: impl Into<String>,
        channel_id: impl Into<String>,
        channel_name: impl Into<String>,
        title: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        let title = title.into();
        let sanitized_title = sanitize_title(&title);
        Self {
            source_url: source_url.into(),
            video_id: video_id.into(),
            channel_id: channel_id.into(),
            channel_name: channel_name.into(),
            title,
            sanitized_title,
            category: category.into(),
        }
    }
}

/// One selected stream: a direct media URL plus the container extension
/// its bytes arrive in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamVariant {
    /// Direct URL the stream bytes can be fetched from.
    pub url: String,
    /// Container extension of the stream data (e.g. "mp4", "m4a").
    pub container_ext: String,
}

/// Output of a successful resolution: the descriptor plus the two
/// highest-quality elementary streams.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedMedia {
    pub descriptor: VideoDescriptor,
    /// Highest available video-only stream.
    pub video: StreamVariant,
    /// Highest available audio-only stream.
    pub audio: StreamVariant,
}
