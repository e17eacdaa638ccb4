use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::Arc;
use tubemux_core::{
    fetcher::StreamFetcher, muxer::Muxer, resolver::MediaResolver, SanitizedConfig,
};

use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

pub async fn get_config<R, F, M>(
    State(state): State<Arc<AppState<R, F, M>>>,
) -> Json<SanitizedConfig>
where
    R: MediaResolver,
    F: StreamFetcher,
    M: Muxer,
{
    Json(state.sanitized_config())
}
