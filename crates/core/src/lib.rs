//! Core library for tubemux: resolving a remote video URL, downloading
//! its best video-only and audio-only streams, and muxing them into a
//! single local file.
//!
//! The [`pipeline`] module ties the stages together; [`resolver`],
//! [`fetcher`], and [`muxer`] each expose a trait plus the production
//! implementation, and [`testing`] provides mock implementations of
//! those traits for tests.

pub mod config;
pub mod fetcher;
pub mod muxer;
pub mod pipeline;
pub mod resolver;
pub mod sanitize;
pub mod testing;

pub use config::{
    load_config, load_config_from_str, validate_config, Config, ConfigError, SanitizedConfig,
};
pub use fetcher::{FetchError, HttpStreamFetcher, StreamFetcher};
pub use muxer::{FfmpegMuxer, MuxError, Muxer, MuxerConfig};
pub use pipeline::{MergedOutput, Pipeline, PipelineConfig, PipelineError, PipelineStage};
pub use resolver::{
    MediaResolver, ResolveError, ResolvedMedia, ResolverConfig, StreamKind, VideoDescriptor,
    YtDlpResolver,
};
pub use sanitize::sanitize_title;
