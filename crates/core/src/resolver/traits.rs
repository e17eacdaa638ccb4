//! Trait definitions for the resolver module.

use async_trait::async_trait;

use super::error::ResolveError;
use super::types::ResolvedMedia;

/// A resolver that turns a source URL into stream metadata.
///
/// Implementations perform the minimum the remote platform requires to
/// obtain metadata (one round trip for yt-dlp) and must not download any
/// media bytes.
#[async_trait]
pub trait MediaResolver: Send + Sync {
    /// Returns the name of this resolver implementation.
    fn name(&self) -> &str;

    /// Resolves a source URL into a descriptor plus the two selected
    /// stream variants.
    async fn resolve(&self, url: &str) -> Result<ResolvedMedia, ResolveError>;
}
