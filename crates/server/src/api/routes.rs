use axum::{
    http::{header::CONTENT_TYPE, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::warn;
use tubemux_core::{fetcher::StreamFetcher, muxer::Muxer, resolver::MediaResolver};

use super::{downloads, handlers};
use crate::state::AppState;

pub fn create_router<R, F, M>(state: Arc<AppState<R, F, M>>) -> Router
where
    R: MediaResolver + 'static,
    F: StreamFetcher + 'static,
    M: Muxer + 'static,
{
    let cors = cors_layer(state.config().server.allowed_origin.as_deref());

    // API routes
    let api_routes = Router::new()
        .route("/health", get(handlers::health))
        .route("/config", get(handlers::get_config))
        .route("/download", post(downloads::create_download))
        .with_state(state);

    let mut router = Router::new()
        .nest("/api/v1", api_routes)
        .layer(TraceLayer::new_for_http());

    if let Some(cors) = cors {
        router = router.layer(cors);
    }

    router
}

/// CORS layer pinned to the configured origin; none when unconfigured
/// or unparseable.
fn cors_layer(allowed_origin: Option<&str>) -> Option<CorsLayer> {
    let origin = allowed_origin?;
    match origin.parse::<HeaderValue>() {
        Ok(value) => Some(
            CorsLayer::new()
                .allow_origin(value)
                .allow_methods([Method::GET, Method::POST])
                .allow_headers([CONTENT_TYPE]),
        ),
        Err(_) => {
            warn!(origin = origin, "invalid allowed_origin, CORS disabled");
            None
        }
    }
}
