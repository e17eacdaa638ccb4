use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tubemux_core::{
    load_config, validate_config, FfmpegMuxer, HttpStreamFetcher, Muxer, Pipeline, PipelineConfig,
    YtDlpResolver,
};

use tubemux_server::api::create_router;
use tubemux_server::state::AppState;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Fatal error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine config path
    let config_path = std::env::var("TUBEMUX_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("config.toml"));

    // Load configuration
    info!("Loading configuration from {:?}", config_path);
    let config = load_config(&config_path)
        .with_context(|| format!("Failed to load config from {:?}", config_path))?;

    // Validate configuration
    validate_config(&config).context("Configuration validation failed")?;

    info!("Configuration loaded successfully");
    info!("Destination root: {:?}", config.storage.destination_root);
    info!("Working directory: {:?}", config.storage.work_dir);

    // Build the pipeline collaborators
    let resolver = YtDlpResolver::new(config.resolver.clone());
    let fetcher = HttpStreamFetcher::new();
    let muxer = FfmpegMuxer::new(config.muxer.clone());

    // Check the ffmpeg binary up front rather than on the first request.
    // A missing binary is not fatal: health and config stay useful.
    if let Err(e) = muxer.validate().await {
        warn!("ffmpeg validation failed, downloads will not work: {}", e);
    } else {
        info!("ffmpeg validated at {:?}", config.muxer.ffmpeg_path);
    }

    let pipeline_config = PipelineConfig {
        destination_root: config.storage.destination_root.clone(),
        work_dir: config.storage.work_dir.clone(),
        container_ext: config.muxer.container_ext.clone(),
    };
    let pipeline = Pipeline::new(pipeline_config, resolver, fetcher, muxer);

    // Create app state
    let state = Arc::new(AppState::new(config.clone(), pipeline));

    // Create router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::new(config.server.host, config.server.port);
    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    // Run server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutting down...");

    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
