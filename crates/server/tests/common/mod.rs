//! Common test utilities for in-process API testing with mocks.
//!
//! Builds the real router with mock pipeline collaborators injected, so
//! the HTTP surface can be exercised without yt-dlp, ffmpeg, or a
//! network.

use std::path::PathBuf;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use tubemux_core::{
    testing::{MockFetcher, MockMuxer, MockResolver},
    Config, Pipeline, PipelineConfig,
};

/// Re-export fixtures for test convenience
pub use tubemux_core::testing::fixtures;

use tubemux_server::api::create_router;
use tubemux_server::state::AppState;

/// Test fixture wiring the router to mock collaborators.
pub struct TestFixture {
    /// The Axum router for testing
    pub router: Router,
    /// Mock resolver, configure resolved media or failures
    pub resolver: MockResolver,
    /// Mock fetcher, records fetch calls
    pub fetcher: MockFetcher,
    /// Mock muxer, records merge calls
    pub muxer: MockMuxer,
    /// Root directory merged outputs land under
    pub output_root: PathBuf,
    /// Working directory for temp stream files
    pub work_dir: PathBuf,
    /// Temporary directory backing the two above
    pub temp_dir: TempDir,
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl TestFixture {
    /// Create a new test fixture with default config and mocks.
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Create a test fixture with a custom config. Storage paths are
    /// always redirected into the fixture's temp directory.
    pub fn with_config(mut config: Config) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let output_root = temp_dir.path().join("out");
        let work_dir = temp_dir.path().join("work");

        config.storage.destination_root = output_root.clone();
        config.storage.work_dir = work_dir.clone();

        let resolver = MockResolver::new();
        let fetcher = MockFetcher::new();
        let muxer = MockMuxer::new();

        let pipeline = Pipeline::new(
            PipelineConfig {
                destination_root: output_root.clone(),
                work_dir: work_dir.clone(),
                container_ext: config.muxer.container_ext.clone(),
            },
            resolver.clone(),
            fetcher.clone(),
            muxer.clone(),
        );

        let state = Arc::new(AppState::new(config, pipeline));
        let router = create_router(state);

        Self {
            router,
            resolver,
            fetcher,
            muxer,
            output_root,
            work_dir,
            temp_dir,
        }
    }

    /// Send a GET request to the test server.
    pub async fn get(&self, path: &str) -> TestResponse {
        let request = Request::builder()
            .method("GET")
            .uri(path)
            .body(Body::empty())
            .expect("Failed to build request");
        self.send(request).await
    }

    /// Send a POST request with JSON body.
    pub async fn post(&self, path: &str, body: Value) -> TestResponse {
        self.post_raw(path, &body.to_string()).await
    }

    /// Send a POST request with raw string body (for malformed JSON).
    pub async fn post_raw(&self, path: &str, body: &str) -> TestResponse {
        let request = Request::builder()
            .method("POST")
            .uri(path)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .expect("Failed to build request");
        self.send(request).await
    }

    async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Request failed");

        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to read body")
            .to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };

        TestResponse { status, body }
    }

    /// Files currently present in the working directory.
    pub fn work_files(&self) -> Vec<PathBuf> {
        match std::fs::read_dir(&self.work_dir) {
            Ok(entries) => entries.filter_map(|e| e.ok().map(|e| e.path())).collect(),
            Err(_) => Vec::new(),
        }
    }
}
