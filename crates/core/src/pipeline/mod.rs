//! The acquisition-and-mux pipeline.
//!
//! One pipeline run takes a source URL through
//! `Resolving → Fetching → Muxing → CleaningUp` and terminates in `Done`
//! (carrying the merged output path) or `Failed` (carrying the first
//! stage error). Cleanup of temp assets is unconditional once fetching
//! has started, including on failure and cancellation. No retries happen
//! at this layer.

mod config;
mod error;
mod runner;
mod types;

pub use config::PipelineConfig;
pub use error::PipelineError;
pub use runner::Pipeline;
pub use types::{MergedOutput, PipelineStage};
