//! Mock implementations of the pipeline's collaborator traits.
//!
//! These back the integration tests (and downstream server tests) so the
//! full pipeline can be driven without a network, yt-dlp, or ffmpeg.

mod mock_fetcher;
mod mock_muxer;
mod mock_resolver;

pub use mock_fetcher::{MockFetcher, RecordedFetch};
pub use mock_muxer::{MockMuxer, RecordedMerge};
pub use mock_resolver::MockResolver;

/// Ready-made test data builders.
pub mod fixtures {
    use crate::resolver::{ResolvedMedia, StreamVariant, VideoDescriptor};

    /// A descriptor for a video with the given title and category.
    pub fn descriptor(title: &str, category: &str) -> VideoDescriptor {
        VideoDescriptor::new(
            "https://www.youtube.com/watch?v=test123",
            "test123",
            "channel-1",
            "Test Channel",
            title,
            category,
        )
    }

    /// Resolved media with mp4 video and m4a audio variants.
    pub fn resolved_media(title: &str, category: &str) -> ResolvedMedia {
        ResolvedMedia {
            descriptor: descriptor(title, category),
            video: StreamVariant {
                url: "https://cdn.example/video".to_string(),
                container_ext: "mp4".to_string(),
            },
            audio: StreamVariant {
                url: "https://cdn.example/audio".to_string(),
                container_ext: "m4a".to_string(),
            },
        }
    }
}
