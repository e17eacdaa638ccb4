//! Error type for pipeline runs.

use thiserror::Error;

use crate::fetcher::FetchError;
use crate::muxer::MuxError;
use crate::resolver::ResolveError;

use super::types::PipelineStage;

/// Terminal failure of one pipeline run.
///
/// Carries the first stage error to occur; cleanup problems never appear
/// here (they are logged and swallowed).
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Metadata resolution failed.
    #[error("resolution failed: {0}")]
    Resolve(#[from] ResolveError),

    /// One of the stream downloads failed.
    #[error("fetch failed: {0}")]
    Fetch(#[from] FetchError),

    /// The external mux process failed.
    #[error("mux failed: {0}")]
    Mux(#[from] MuxError),

    /// The run was cancelled by the caller.
    #[error("pipeline run cancelled")]
    Cancelled,
}

impl PipelineError {
    /// The stage this run failed in, for operator logs.
    pub fn stage(&self) -> PipelineStage {
        match self {
            Self::Resolve(_) => PipelineStage::Resolving,
            Self::Fetch(_) => PipelineStage::Fetching,
            Self::Mux(_) => PipelineStage::Muxing,
            Self::Cancelled => PipelineStage::Failed,
        }
    }
}
