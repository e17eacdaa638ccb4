//! yt-dlp backed resolver implementation.

use async_trait::async_trait;
use serde::Deserialize;
use std::process::Stdio;
use tokio::process::Command;
use tokio::time::{timeout, Duration};
use tracing::debug;
use url::Url;

use super::config::ResolverConfig;
use super::error::ResolveError;
use super::traits::MediaResolver;
use super::types::{ResolvedMedia, StreamKind, StreamVariant, VideoDescriptor};

/// Resolver that shells out to yt-dlp for metadata.
///
/// One `yt-dlp --dump-json` invocation per request; the JSON output
/// carries the descriptor fields and the full format table from which
/// the two highest-quality elementary streams are selected.
pub struct YtDlpResolver {
    config: ResolverConfig,
}

/// Subset of the yt-dlp JSON dump we care about.
#[derive(Debug, Deserialize)]
struct RawMetadata {
    id: String,
    title: String,
    webpage_url: Option<String>,
    channel_id: Option<String>,
    channel: Option<String>,
    uploader: Option<String>,
    categories: Option<Vec<String>>,
    #[serde(default)]
    formats: Vec<RawFormat>,
}

#[derive(Debug, Deserialize)]
struct RawFormat {
    url: Option<String>,
    vcodec: Option<String>,
    acodec: Option<String>,
    ext: Option<String>,
    height: Option<u32>,
    /// Total bitrate in kbps.
    tbr: Option<f64>,
    /// Audio bitrate in kbps.
    abr: Option<f64>,
}

impl RawFormat {
    fn has_video(&self) -> bool {
        matches!(self.vcodec.as_deref(), Some(c) if c != "none")
    }

    fn has_audio(&self) -> bool {
        matches!(self.acodec.as_deref(), Some(c) if c != "none")
    }
}

impl YtDlpResolver {
    /// Creates a new resolver with the given configuration.
    pub fn new(config: ResolverConfig) -> Self {
        Self { config }
    }

    /// Creates a resolver with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(ResolverConfig::default())
    }

    /// Parses a yt-dlp JSON dump into resolved media.
    fn parse_metadata(requested_url: &str, output: &str) -> Result<ResolvedMedia, ResolveError> {
        let raw: RawMetadata =
            serde_json::from_str(output).map_err(|e| ResolveError::MetadataParse {
                reason: format!("failed to parse yt-dlp output: {}", e),
            })?;

        let video = Self::select_video(&raw.formats)?;
        let audio = Self::select_audio(&raw.formats)?;

        let descriptor = VideoDescriptor::new(
            raw.webpage_url
                .unwrap_or_else(|| requested_url.to_string()),
            raw.id,
            raw.channel_id.unwrap_or_default(),
            raw.channel.or(raw.uploader).unwrap_or_default(),
            raw.title,
            raw.categories
                .and_then(|c| c.into_iter().next())
                .unwrap_or_default(),
        );

        Ok(ResolvedMedia {
            descriptor,
            video,
            audio,
        })
    }

    /// Picks the highest-quality video-only format (ranked by height,
    /// then total bitrate).
    fn select_video(formats: &[RawFormat]) -> Result<StreamVariant, ResolveError> {
        formats
            .iter()
            .filter(|f| f.url.is_some() && f.has_video() && !f.has_audio())
            .max_by(|a, b| {
                (a.height.unwrap_or(0), a.tbr.unwrap_or(0.0))
                    .partial_cmp(&(b.height.unwrap_or(0), b.tbr.unwrap_or(0.0)))
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .map(|f| StreamVariant {
                url: f.url.clone().unwrap_or_default(),
                container_ext: f.ext.clone().unwrap_or_else(|| "mp4".to_string()),
            })
            .ok_or(ResolveError::NoUsableFormat {
                kind: StreamKind::Video,
            })
    }

    /// Picks the highest-quality audio-only format (ranked by audio
    /// bitrate, falling back to total bitrate).
    fn select_audio(formats: &[RawFormat]) -> Result<StreamVariant, ResolveError> {
        formats
            .iter()
            .filter(|f| f.url.is_some() && f.has_audio() && !f.has_video())
            .max_by(|a, b| {
                a.abr
                    .or(a.tbr)
                    .unwrap_or(0.0)
                    .partial_cmp(&b.abr.or(b.tbr).unwrap_or(0.0))
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .map(|f| StreamVariant {
                url: f.url.clone().unwrap_or_default(),
                container_ext: f.ext.clone().unwrap_or_else(|| "m4a".to_string()),
            })
            .ok_or(ResolveError::NoUsableFormat {
                kind: StreamKind::Audio,
            })
    }
}

#[async_trait]
impl MediaResolver for YtDlpResolver {
    fn name(&self) -> &str {
        "yt-dlp"
    }

    async fn resolve(&self, url: &str) -> Result<ResolvedMedia, ResolveError> {
        let parsed = Url::parse(url).map_err(|e| ResolveError::InvalidUrl {
            url: url.to_string(),
            reason: e.to_string(),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ResolveError::InvalidUrl {
                url: url.to_string(),
                reason: format!("unsupported scheme {:?}", parsed.scheme()),
            });
        }

        debug!(url = url, "resolving metadata via yt-dlp");

        let child = Command::new(&self.config.ytdlp_path)
            .args(["--no-playlist", "--no-warnings", "--dump-json"])
            .args(&self.config.extra_args)
            .arg(url)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    ResolveError::ResolverNotFound {
                        path: self.config.ytdlp_path.clone(),
                    }
                } else {
                    ResolveError::Io(e)
                }
            })?;

        let timeout_secs = self.config.timeout_secs;
        // kill_on_drop reaps the child when the output future is dropped
        // on timeout.
        let output = timeout(
            Duration::from_secs(timeout_secs),
            child.wait_with_output(),
        )
        .await
        .map_err(|_| ResolveError::Timeout { timeout_secs })??;

        if !output.status.success() {
            return Err(ResolveError::ResolverFailed {
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        Self::parse_metadata(url, &stdout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "id": "dQw4w9WgXcQ",
        "title": "Never Gonna Give You Up!",
        "webpage_url": "https://www.youtube.com/watch?v=dQw4w9WgXcQ",
        "channel_id": "UCuAXFkgsw1L7xaCfnd5JJOw",
        "channel": "Rick Astley",
        "categories": ["Music"],
        "formats": [
            {"url": "https://cdn/v360", "vcodec": "avc1", "acodec": "none", "ext": "mp4", "height": 360, "tbr": 600.0},
            {"url": "https://cdn/v1080", "vcodec": "avc1", "acodec": "none", "ext": "mp4", "height": 1080, "tbr": 4400.0},
            {"url": "https://cdn/a128", "vcodec": "none", "acodec": "mp4a", "ext": "m4a", "abr": 128.0},
            {"url": "https://cdn/a50", "vcodec": "none", "acodec": "opus", "ext": "webm", "abr": 50.0},
            {"url": "https://cdn/muxed", "vcodec": "avc1", "acodec": "mp4a", "ext": "mp4", "height": 720, "tbr": 2000.0}
        ]
    }"#;

    #[test]
    fn test_parse_metadata_descriptor_fields() {
        let media =
            YtDlpResolver::parse_metadata("https://youtu.be/dQw4w9WgXcQ", SAMPLE).unwrap();
        let d = &media.descriptor;
        assert_eq!(d.video_id, "dQw4w9WgXcQ");
        assert_eq!(d.channel_id, "UCuAXFkgsw1L7xaCfnd5JJOw");
        assert_eq!(d.channel_name, "Rick Astley");
        assert_eq!(d.category, "Music");
        assert_eq!(d.title, "Never Gonna Give You Up!");
        assert_eq!(d.sanitized_title, "Never_Gonna_Give_You_Up");
        assert_eq!(d.source_url, "https://www.youtube.com/watch?v=dQw4w9WgXcQ");
    }

    #[test]
    fn test_selects_highest_video_only_format() {
        let media = YtDlpResolver::parse_metadata("https://x", SAMPLE).unwrap();
        // The 720p muxed format must be skipped even though it outranks 360p.
        assert_eq!(media.video.url, "https://cdn/v1080");
        assert_eq!(media.video.container_ext, "mp4");
    }

    #[test]
    fn test_selects_highest_audio_only_format() {
        let media = YtDlpResolver::parse_metadata("https://x", SAMPLE).unwrap();
        assert_eq!(media.audio.url, "https://cdn/a128");
        assert_eq!(media.audio.container_ext, "m4a");
    }

    #[test]
    fn test_no_audio_only_format_is_an_error() {
        let json = r#"{
            "id": "x", "title": "t",
            "formats": [
                {"url": "https://cdn/v", "vcodec": "avc1", "acodec": "none", "ext": "mp4", "height": 720}
            ]
        }"#;
        let err = YtDlpResolver::parse_metadata("https://x", json).unwrap_err();
        assert!(matches!(
            err,
            ResolveError::NoUsableFormat {
                kind: StreamKind::Audio
            }
        ));
    }

    #[test]
    fn test_garbage_output_is_a_parse_error() {
        let err = YtDlpResolver::parse_metadata("https://x", "not json").unwrap_err();
        assert!(matches!(err, ResolveError::MetadataParse { .. }));
    }

    #[test]
    fn test_backend_name() {
        assert_eq!(YtDlpResolver::with_defaults().name(), "yt-dlp");
    }

    #[tokio::test]
    async fn test_invalid_url_rejected_without_spawning() {
        let resolver = YtDlpResolver::with_defaults();
        let err = resolver.resolve("not a url").await.unwrap_err();
        assert!(matches!(err, ResolveError::InvalidUrl { .. }));

        let err = resolver.resolve("file:///etc/passwd").await.unwrap_err();
        assert!(matches!(err, ResolveError::InvalidUrl { .. }));
    }

    #[tokio::test]
    async fn test_missing_binary_maps_to_not_found() {
        let resolver = YtDlpResolver::new(ResolverConfig {
            ytdlp_path: "/nonexistent/yt-dlp".into(),
            ..Default::default()
        });
        let err = resolver
            .resolve("https://www.youtube.com/watch?v=abc")
            .await
            .unwrap_err();
        assert!(matches!(err, ResolveError::ResolverNotFound { .. }));
    }
}
