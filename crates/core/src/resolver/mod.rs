//! Metadata resolution for remote media.
//!
//! This module provides the `MediaResolver` trait and the yt-dlp backed
//! implementation. Resolution turns a source URL into a normalized
//! [`VideoDescriptor`] plus the two stream variants (highest-quality
//! video-only and audio-only) that the fetcher will download. It performs
//! one metadata round trip and never downloads media bytes itself.

mod config;
mod error;
mod traits;
mod types;
mod ytdlp;

pub use config::ResolverConfig;
pub use error::ResolveError;
pub use traits::MediaResolver;
pub use types::{ResolvedMedia, StreamKind, StreamVariant, VideoDescriptor};
pub use ytdlp::YtDlpResolver;
