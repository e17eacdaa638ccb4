//! Stream fetching: downloading the two elementary streams to temp files.
//!
//! The fetcher is the single concurrency point of a pipeline run: the
//! video-only and audio-only downloads run in parallel and the stage
//! completes only when both have settled. Both outcomes are always
//! observed (a join, not a race) so that partial failures can be cleaned
//! up correctly.

mod error;
mod http_fetcher;
mod traits;
mod types;

pub use error::FetchError;
pub use http_fetcher::HttpStreamFetcher;
pub use traits::StreamFetcher;
pub use types::{FetchedStreams, TempAsset};
