//! Types for the pipeline module.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// The stages a pipeline run moves through, in order.
///
/// `Done` and `Failed` are the only terminal stages. Used for logging and
/// failure attribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineStage {
    Resolving,
    Fetching,
    Muxing,
    CleaningUp,
    Done,
    Failed,
}

impl std::fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Resolving => "resolving",
            Self::Fetching => "fetching",
            Self::Muxing => "muxing",
            Self::CleaningUp => "cleaning_up",
            Self::Done => "done",
            Self::Failed => "failed",
        };
        write!(f, "{}", name)
    }
}

/// The final merged file a successful run produces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergedOutput {
    /// Path `<destination_root>/<category>/<sanitized_title>.<ext>`.
    pub path: PathBuf,
    /// Size of the merged file in bytes.
    pub size_bytes: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_display() {
        assert_eq!(PipelineStage::Resolving.to_string(), "resolving");
        assert_eq!(PipelineStage::CleaningUp.to_string(), "cleaning_up");
    }
}
