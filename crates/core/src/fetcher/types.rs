//! Types for the fetcher module.

use std::path::PathBuf;

use crate::resolver::StreamKind;

/// A transient on-disk file holding one downloaded stream.
///
/// Owned exclusively by the pipeline run that created it; deleted by the
/// cleanup stage and never shared across requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TempAsset {
    pub kind: StreamKind,
    pub path: PathBuf,
}

/// The two temp assets a successful fetch produces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedStreams {
    pub video: TempAsset,
    pub audio: TempAsset,
}
