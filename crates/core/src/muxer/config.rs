//! Configuration for the muxer module.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for the ffmpeg backed muxer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MuxerConfig {
    /// Path to the ffmpeg binary.
    #[serde(default = "default_ffmpeg_path")]
    pub ffmpeg_path: PathBuf,

    /// Container extension for merged output files.
    #[serde(default = "default_container_ext")]
    pub container_ext: String,

    /// ffmpeg log level (quiet, error, warning, info, ...).
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Timeout for one mux invocation in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Whether an existing file at the output path is overwritten.
    /// When false, muxing fails fast with `MuxError::OutputExists`.
    #[serde(default = "default_overwrite")]
    pub overwrite: bool,
}

fn default_ffmpeg_path() -> PathBuf {
    PathBuf::from("ffmpeg")
}

fn default_container_ext() -> String {
    "mp4".to_string()
}

fn default_log_level() -> String {
    "error".to_string()
}

fn default_timeout() -> u64 {
    600
}

fn default_overwrite() -> bool {
    true
}

impl Default for MuxerConfig {
    fn default() -> Self {
        Self {
            ffmpeg_path: default_ffmpeg_path(),
            container_ext: default_container_ext(),
            log_level: default_log_level(),
            timeout_secs: default_timeout(),
            overwrite: default_overwrite(),
        }
    }
}
