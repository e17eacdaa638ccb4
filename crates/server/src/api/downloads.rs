//! Download API handler.

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info};
use tubemux_core::{fetcher::StreamFetcher, muxer::Muxer, resolver::MediaResolver};

use crate::state::AppState;

/// Request body for starting a download
#[derive(Debug, Deserialize)]
pub struct DownloadRequest {
    /// Source page URL to acquire
    pub url: String,
}

/// Response for a completed download
#[derive(Debug, Serialize)]
pub struct DownloadResponse {
    /// Path of the merged output file
    pub path: String,
    /// Size of the merged output in bytes
    pub size_bytes: u64,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct DownloadErrorResponse {
    pub error: String,
}

/// Process one URL through the full pipeline and report the outcome.
///
/// The request blocks until the run terminates. Any pipeline failure
/// maps to 500; the error string is for operators, not a structured
/// contract.
pub async fn create_download<R, F, M>(
    State(state): State<Arc<AppState<R, F, M>>>,
    Json(body): Json<DownloadRequest>,
) -> Result<Json<DownloadResponse>, (StatusCode, Json<DownloadErrorResponse>)>
where
    R: MediaResolver,
    F: StreamFetcher,
    M: Muxer,
{
    info!(url = %body.url, "download requested");

    match state.pipeline().submit(&body.url).await {
        Ok(output) => Ok(Json(DownloadResponse {
            path: output.path.display().to_string(),
            size_bytes: output.size_bytes,
        })),
        Err(e) => {
            error!(url = %body.url, failed_stage = %e.stage(), "download failed: {}", e);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(DownloadErrorResponse {
                    error: e.to_string(),
                }),
            ))
        }
    }
}
