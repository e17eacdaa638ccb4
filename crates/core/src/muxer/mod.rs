//! Muxing: combining the two downloaded streams into one container file.
//!
//! This module provides the `Muxer` trait and the ffmpeg backed
//! implementation. Muxing is stream-copy only (`-c:v copy -c:a copy`);
//! the pipeline never re-encodes, so the stage is I/O-bound and fast.
//! Success is judged solely by the muxer process's exit status.

mod config;
mod error;
mod ffmpeg;
mod traits;

pub use config::MuxerConfig;
pub use error::MuxError;
pub use ffmpeg::FfmpegMuxer;
pub use traits::Muxer;
