//! Configuration for the pipeline module.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Per-pipeline settings, passed in at construction.
///
/// Nothing here is process-global: two pipelines with different roots can
/// coexist in one process (and do, in tests).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Root directory merged outputs are placed under.
    #[serde(default = "default_destination_root")]
    pub destination_root: PathBuf,

    /// Working directory temp stream files are written to.
    #[serde(default = "default_work_dir")]
    pub work_dir: PathBuf,

    /// Container extension of merged outputs (e.g. "mp4").
    #[serde(default = "default_container_ext")]
    pub container_ext: String,
}

fn default_destination_root() -> PathBuf {
    PathBuf::from("videos")
}

fn default_work_dir() -> PathBuf {
    std::env::temp_dir().join("tubemux")
}

fn default_container_ext() -> String {
    "mp4".to_string()
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            destination_root: default_destination_root(),
            work_dir: default_work_dir(),
            container_ext: default_container_ext(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = PipelineConfig::default();
        assert_eq!(config.destination_root, PathBuf::from("videos"));
        assert_eq!(config.container_ext, "mp4");
        assert!(config.work_dir.ends_with("tubemux"));
    }
}
