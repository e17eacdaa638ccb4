//! Pipeline runner implementation.

use std::future::Future;
use std::path::{Path, PathBuf};
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::fetcher::StreamFetcher;
use crate::muxer::Muxer;
use crate::resolver::{MediaResolver, ResolvedMedia, StreamKind, VideoDescriptor};

use super::config::PipelineConfig;
use super::error::PipelineError;
use super::types::{MergedOutput, PipelineStage};

/// Sequences one request through resolve, fetch, mux, and cleanup.
///
/// Holds no shared mutable state: every run owns its descriptor, temp
/// assets, and output path, so any number of pipelines (or concurrent
/// `submit` calls on one pipeline) can coexist.
pub struct Pipeline<R, F, M> {
    config: PipelineConfig,
    resolver: R,
    fetcher: F,
    muxer: M,
}

impl<R: MediaResolver, F: StreamFetcher, M: Muxer> Pipeline<R, F, M> {
    /// Creates a new pipeline from its configuration and collaborators.
    pub fn new(config: PipelineConfig, resolver: R, fetcher: F, muxer: M) -> Self {
        Self {
            config,
            resolver,
            fetcher,
            muxer,
        }
    }

    /// Processes one source URL to completion.
    ///
    /// Returns the merged output path on success; the first stage error
    /// terminates the run. Temp assets are cleaned up in every case once
    /// fetching has started.
    pub async fn submit(&self, url: &str) -> Result<MergedOutput, PipelineError> {
        let (_cancel_tx, cancel_rx) = watch::channel(false);
        self.submit_with_cancel(url, cancel_rx).await
    }

    /// Like [`submit`](Self::submit), but aborts when `cancel` flips to
    /// true. An in-flight external process is killed and cleanup still
    /// runs before `PipelineError::Cancelled` is reported.
    pub async fn submit_with_cancel(
        &self,
        url: &str,
        mut cancel: watch::Receiver<bool>,
    ) -> Result<MergedOutput, PipelineError> {
        info!(
            url = url,
            resolver = self.resolver.name(),
            stage = %PipelineStage::Resolving,
            "pipeline run started"
        );

        let media = guard(&mut cancel, self.resolver.resolve(url)).await??;
        let descriptor = &media.descriptor;

        let video_tmp = self.temp_path(descriptor, StreamKind::Video, &media.video.container_ext);
        let audio_tmp = self.temp_path(descriptor, StreamKind::Audio, &media.audio.container_ext);
        let output_path = self.output_path(descriptor);

        let outcome = self
            .fetch_and_mux(&media, &video_tmp, &audio_tmp, &output_path, &mut cancel)
            .await;

        // Cleanup is unconditional once fetching has started; a failure
        // here never changes the run's outcome.
        debug!(
            video_id = %descriptor.video_id,
            stage = %PipelineStage::CleaningUp,
            "removing temp assets"
        );
        cleanup_temp_file(&video_tmp).await;
        cleanup_temp_file(&audio_tmp).await;

        match &outcome {
            Ok(output) => info!(
                video_id = %descriptor.video_id,
                path = %output.path.display(),
                size_bytes = output.size_bytes,
                stage = %PipelineStage::Done,
                "pipeline run completed"
            ),
            Err(e) => warn!(
                video_id = %descriptor.video_id,
                failed_stage = %e.stage(),
                "pipeline run failed: {}",
                e
            ),
        }

        outcome
    }

    async fn fetch_and_mux(
        &self,
        media: &ResolvedMedia,
        video_tmp: &Path,
        audio_tmp: &Path,
        output_path: &Path,
        cancel: &mut watch::Receiver<bool>,
    ) -> Result<MergedOutput, PipelineError> {
        let descriptor = &media.descriptor;

        debug!(
            video_id = %descriptor.video_id,
            fetcher = self.fetcher.name(),
            stage = %PipelineStage::Fetching,
            "fetching streams"
        );
        let fetched = guard(cancel, self.fetcher.fetch(media, video_tmp, audio_tmp)).await??;

        debug!(
            video_id = %descriptor.video_id,
            muxer = self.muxer.name(),
            stage = %PipelineStage::Muxing,
            "muxing streams"
        );
        match guard(
            cancel,
            self.muxer
                .merge(&fetched.video.path, &fetched.audio.path, output_path),
        )
        .await
        {
            Ok(result) => result?,
            Err(cancelled) => {
                // The merge future was dropped mid-flight. The muxer's
                // child process dies with it, but a partial output file
                // may remain at the destination.
                cleanup_temp_file(output_path).await;
                return Err(cancelled);
            }
        }

        let size_bytes = tokio::fs::metadata(output_path)
            .await
            .map(|m| m.len())
            .unwrap_or(0);

        Ok(MergedOutput {
            path: output_path.to_path_buf(),
            size_bytes,
        })
    }

    /// Temp file path `<work_dir>/<sanitized_title>_<kind>.<ext>`.
    fn temp_path(&self, descriptor: &VideoDescriptor, kind: StreamKind, ext: &str) -> PathBuf {
        self.config.work_dir.join(format!(
            "{}_{}.{}",
            descriptor.sanitized_title,
            kind.file_suffix(),
            ext
        ))
    }

    /// Output path `<destination_root>/<category>/<sanitized_title>.<ext>`.
    /// An empty category places the output directly in the root.
    fn output_path(&self, descriptor: &VideoDescriptor) -> PathBuf {
        let mut dir = self.config.destination_root.clone();
        if !descriptor.category.is_empty() {
            dir = dir.join(&descriptor.category);
        }
        dir.join(format!(
            "{}.{}",
            descriptor.sanitized_title, self.config.container_ext
        ))
    }
}

/// Runs a stage future, aborting it if cancellation is signalled first.
async fn guard<T>(
    cancel: &mut watch::Receiver<bool>,
    stage: impl Future<Output = T>,
) -> Result<T, PipelineError> {
    tokio::select! {
        out = stage => Ok(out),
        _ = wait_for_cancel(cancel) => Err(PipelineError::Cancelled),
    }
}

/// Resolves when cancellation is signalled; pends forever if the sender
/// is gone without ever signalling.
async fn wait_for_cancel(cancel: &mut watch::Receiver<bool>) {
    loop {
        if *cancel.borrow_and_update() {
            return;
        }
        if cancel.changed().await.is_err() {
            std::future::pending::<()>().await;
        }
    }
}

/// Best-effort temp file removal; failures are logged, never escalated.
async fn cleanup_temp_file(path: &Path) {
    match tokio::fs::remove_file(path).await {
        Ok(()) => {}
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "temp file already gone");
        }
        Err(e) => {
            warn!(path = %path.display(), "failed to remove temp file: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{fixtures, MockFetcher, MockMuxer, MockResolver};

    fn pipeline_with_root(root: &Path) -> Pipeline<MockResolver, MockFetcher, MockMuxer> {
        let config = PipelineConfig {
            destination_root: root.to_path_buf(),
            work_dir: root.join("work"),
            container_ext: "mp4".to_string(),
        };
        Pipeline::new(
            config,
            MockResolver::new(),
            MockFetcher::new(),
            MockMuxer::new(),
        )
    }

    #[test]
    fn test_output_path_with_category() {
        let pipeline = pipeline_with_root(Path::new("/out"));
        let descriptor = fixtures::descriptor("Foo Bar", "Music");
        assert_eq!(
            pipeline.output_path(&descriptor),
            PathBuf::from("/out/Music/Foo_Bar.mp4")
        );
    }

    #[test]
    fn test_output_path_empty_category_lands_in_root() {
        let pipeline = pipeline_with_root(Path::new("/out"));
        let descriptor = fixtures::descriptor("Foo Bar", "");
        assert_eq!(
            pipeline.output_path(&descriptor),
            PathBuf::from("/out/Foo_Bar.mp4")
        );
    }

    #[test]
    fn test_temp_paths_use_stream_suffix_and_ext() {
        let pipeline = pipeline_with_root(Path::new("/out"));
        let descriptor = fixtures::descriptor("Foo Bar", "Music");
        assert_eq!(
            pipeline.temp_path(&descriptor, StreamKind::Video, "mp4"),
            PathBuf::from("/out/work/Foo_Bar_video.mp4")
        );
        assert_eq!(
            pipeline.temp_path(&descriptor, StreamKind::Audio, "m4a"),
            PathBuf::from("/out/work/Foo_Bar_audio.m4a")
        );
    }
}
