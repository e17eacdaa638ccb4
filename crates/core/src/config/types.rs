use serde::{Deserialize, Serialize};
use std::net::IpAddr;
use std::path::PathBuf;

use crate::muxer::MuxerConfig;
use crate::resolver::ResolverConfig;

/// Root configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub resolver: ResolverConfig,
    #[serde(default)]
    pub muxer: MuxerConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: IpAddr,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Origin allowed to call the API (e.g. a browser extension origin).
    /// No CORS headers are emitted when unset.
    #[serde(default)]
    pub allowed_origin: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            allowed_origin: None,
        }
    }
}

fn default_host() -> IpAddr {
    "0.0.0.0".parse().unwrap()
}

fn default_port() -> u16 {
    4000
}

/// Filesystem layout configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    /// Root directory merged outputs are placed under.
    #[serde(default = "default_destination_root")]
    pub destination_root: PathBuf,
    /// Working directory for temp stream files.
    #[serde(default = "default_work_dir")]
    pub work_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            destination_root: default_destination_root(),
            work_dir: default_work_dir(),
        }
    }
}

fn default_destination_root() -> PathBuf {
    PathBuf::from("videos")
}

fn default_work_dir() -> PathBuf {
    std::env::temp_dir().join("tubemux")
}

/// Config view for API responses
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedConfig {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub resolver: SanitizedResolverConfig,
    pub muxer: SanitizedMuxerConfig,
}

#[derive(Debug, Clone, Serialize)]
pub struct SanitizedResolverConfig {
    pub ytdlp_path: PathBuf,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct SanitizedMuxerConfig {
    pub ffmpeg_path: PathBuf,
    pub container_ext: String,
    pub timeout_secs: u64,
    pub overwrite: bool,
}

impl From<&Config> for SanitizedConfig {
    fn from(config: &Config) -> Self {
        Self {
            server: config.server.clone(),
            storage: config.storage.clone(),
            resolver: SanitizedResolverConfig {
                ytdlp_path: config.resolver.ytdlp_path.clone(),
                timeout_secs: config.resolver.timeout_secs,
            },
            muxer: SanitizedMuxerConfig {
                ffmpeg_path: config.muxer.ffmpeg_path.clone(),
                container_ext: config.muxer.container_ext.clone(),
                timeout_secs: config.muxer.timeout_secs,
                overwrite: config.muxer.overwrite,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_empty_config_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.server.port, 4000);
        assert_eq!(config.server.host.to_string(), "0.0.0.0");
        assert!(config.server.allowed_origin.is_none());
        assert_eq!(config.storage.destination_root, PathBuf::from("videos"));
        assert_eq!(config.muxer.container_ext, "mp4");
        assert_eq!(config.resolver.ytdlp_path, PathBuf::from("yt-dlp"));
    }

    #[test]
    fn test_deserialize_custom_values() {
        let toml = r#"
[server]
host = "127.0.0.1"
port = 9000
allowed_origin = "chrome-extension://abcdef"

[storage]
destination_root = "/srv/videos"
work_dir = "/tmp/tubemux-work"

[muxer]
container_ext = "mkv"
overwrite = false
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host.to_string(), "127.0.0.1");
        assert_eq!(
            config.server.allowed_origin.as_deref(),
            Some("chrome-extension://abcdef")
        );
        assert_eq!(config.storage.destination_root, PathBuf::from("/srv/videos"));
        assert_eq!(config.muxer.container_ext, "mkv");
        assert!(!config.muxer.overwrite);
    }

    #[test]
    fn test_sanitized_config() {
        let config = Config::default();
        let sanitized = SanitizedConfig::from(&config);
        assert_eq!(sanitized.server.port, 4000);
        assert_eq!(sanitized.muxer.container_ext, "mp4");
        assert_eq!(sanitized.resolver.ytdlp_path, PathBuf::from("yt-dlp"));
    }
}
