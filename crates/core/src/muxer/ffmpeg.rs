//! ffmpeg backed muxer implementation.

use async_trait::async_trait;
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;
use tokio::time::{timeout, Duration};
use tracing::{debug, warn};

use super::config::MuxerConfig;
use super::error::MuxError;
use super::traits::Muxer;

/// Muxer that spawns one ffmpeg child per merge, stream-copying both
/// tracks into the output container.
pub struct FfmpegMuxer {
    config: MuxerConfig,
}

impl FfmpegMuxer {
    /// Creates a new muxer with the given configuration.
    pub fn new(config: MuxerConfig) -> Self {
        Self { config }
    }

    /// Creates a muxer with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(MuxerConfig::default())
    }

    /// Builds the ffmpeg argument list for one merge.
    fn build_args(&self, video: &Path, audio: &Path, output: &Path) -> Vec<String> {
        let mut args = vec![
            if self.config.overwrite { "-y" } else { "-n" }.to_string(),
            "-nostdin".to_string(),
            "-i".to_string(),
            video.to_string_lossy().to_string(),
            "-i".to_string(),
            audio.to_string_lossy().to_string(),
            // Stream copy: repackage without decoding, preserving quality.
            "-c:v".to_string(),
            "copy".to_string(),
            "-c:a".to_string(),
            "copy".to_string(),
            "-loglevel".to_string(),
            self.config.log_level.clone(),
        ];
        args.push(output.to_string_lossy().to_string());
        args
    }

    /// Best-effort removal of a partial output file after a failed merge.
    async fn remove_partial(output: &Path) {
        if let Err(e) = tokio::fs::remove_file(output).await {
            if e.kind() != std::io::ErrorKind::NotFound {
                warn!(path = %output.display(), "failed to remove partial mux output: {}", e);
            }
        }
    }
}

#[async_trait]
impl Muxer for FfmpegMuxer {
    fn name(&self) -> &str {
        "ffmpeg"
    }

    async fn merge(&self, video: &Path, audio: &Path, output: &Path) -> Result<(), MuxError> {
        if !self.config.overwrite && tokio::fs::try_exists(output).await.unwrap_or(false) {
            return Err(MuxError::OutputExists {
                path: output.to_path_buf(),
            });
        }

        // Recursive create-if-absent: never an error when it already exists.
        if let Some(parent) = output.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(|source| {
                MuxError::OutputDirectoryFailed {
                    path: parent.to_path_buf(),
                    source,
                }
            })?;
        }

        let args = self.build_args(video, audio, output);
        debug!(output = %output.display(), "spawning ffmpeg mux");

        let child = Command::new(&self.config.ffmpeg_path)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    MuxError::FfmpegNotFound {
                        path: self.config.ffmpeg_path.clone(),
                    }
                } else {
                    MuxError::Io(e)
                }
            })?;

        let timeout_secs = self.config.timeout_secs;
        // Resolve only on the process's terminal event; kill_on_drop reaps
        // the child if the wait is dropped on timeout or cancellation.
        let result = timeout(Duration::from_secs(timeout_secs), child.wait_with_output()).await;

        let output_data = match result {
            Ok(Ok(out)) => out,
            Ok(Err(e)) => {
                Self::remove_partial(output).await;
                return Err(MuxError::Io(e));
            }
            Err(_) => {
                Self::remove_partial(output).await;
                return Err(MuxError::Timeout { timeout_secs });
            }
        };

        if !output_data.status.success() {
            Self::remove_partial(output).await;
            return Err(MuxError::MuxFailed {
                code: output_data.status.code(),
                stderr: String::from_utf8_lossy(&output_data.stderr)
                    .trim()
                    .to_string(),
            });
        }

        Ok(())
    }

    async fn validate(&self) -> Result<(), MuxError> {
        let result = Command::new(&self.config.ffmpeg_path)
            .arg("-version")
            .stdin(Stdio::null())
            .output()
            .await;

        match result {
            Ok(out) if out.status.success() => Ok(()),
            Ok(out) => Err(MuxError::MuxFailed {
                code: out.status.code(),
                stderr: String::from_utf8_lossy(&out.stderr).trim().to_string(),
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(MuxError::FfmpegNotFound {
                path: self.config.ffmpeg_path.clone(),
            }),
            Err(e) => Err(MuxError::Io(e)),
        }
    }
}
