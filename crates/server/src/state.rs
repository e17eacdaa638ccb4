use tubemux_core::{
    fetcher::StreamFetcher, muxer::Muxer, resolver::MediaResolver, Config, Pipeline,
    SanitizedConfig,
};

/// Shared application state
pub struct AppState<R, F, M> {
    config: Config,
    pipeline: Pipeline<R, F, M>,
}

impl<R: MediaResolver, F: StreamFetcher, M: Muxer> AppState<R, F, M> {
    pub fn new(config: Config, pipeline: Pipeline<R, F, M>) -> Self {
        Self { config, pipeline }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn sanitized_config(&self) -> SanitizedConfig {
        SanitizedConfig::from(&self.config)
    }

    pub fn pipeline(&self) -> &Pipeline<R, F, M> {
        &self.pipeline
    }
}
