//! End-to-end download tests through the HTTP surface with mocks.

mod common;

use axum::http::StatusCode;
use common::{fixtures, TestFixture};
use serde_json::json;
use tubemux_core::{
    muxer::MuxError,
    resolver::{ResolveError, StreamKind},
};

#[tokio::test]
async fn test_download_happy_path() {
    let fixture = TestFixture::new();

    let response = fixture
        .post(
            "/api/v1/download",
            json!({ "url": "https://www.youtube.com/watch?v=test123" }),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);

    let expected = fixture.output_root.join("Music").join("Foo_Bar.mp4");
    assert_eq!(response.body["path"], expected.display().to_string());
    assert!(response.body["size_bytes"].as_u64().unwrap() > 0);
    assert!(expected.exists());

    // Temp assets are cleaned up after the run.
    assert!(fixture.work_files().is_empty());

    assert_eq!(
        fixture.resolver.recorded_urls().await,
        vec!["https://www.youtube.com/watch?v=test123"]
    );
    assert_eq!(fixture.muxer.merge_count().await, 1);
}

#[tokio::test]
async fn test_download_uses_resolved_title_and_category() {
    let fixture = TestFixture::new();
    fixture
        .resolver
        .set_media(fixtures::resolved_media("My: Clip!", "Gaming"))
        .await;

    let response = fixture
        .post(
            "/api/v1/download",
            json!({ "url": "https://www.youtube.com/watch?v=other" }),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let expected = fixture.output_root.join("Gaming").join("My_Clip.mp4");
    assert_eq!(response.body["path"], expected.display().to_string());
    assert!(expected.exists());
}

#[tokio::test]
async fn test_download_resolve_failure_maps_to_500() {
    let fixture = TestFixture::new();
    fixture
        .resolver
        .set_next_error(ResolveError::NoUsableFormat {
            kind: StreamKind::Video,
        })
        .await;

    let response = fixture
        .post(
            "/api/v1/download",
            json!({ "url": "https://www.youtube.com/watch?v=test123" }),
        )
        .await;

    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(response.body["error"].as_str().unwrap().contains("video"));
    assert_eq!(fixture.fetcher.fetch_count().await, 0);
    assert_eq!(fixture.muxer.merge_count().await, 0);
}

#[tokio::test]
async fn test_download_mux_failure_maps_to_500_and_cleans_up() {
    let fixture = TestFixture::new();
    fixture
        .muxer
        .set_next_error(MuxError::MuxFailed {
            code: Some(1),
            stderr: "moov atom not found".to_string(),
        })
        .await;

    let response = fixture
        .post(
            "/api/v1/download",
            json!({ "url": "https://www.youtube.com/watch?v=test123" }),
        )
        .await;

    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(response.body["error"]
        .as_str()
        .unwrap()
        .contains("moov atom not found"));

    assert!(fixture.work_files().is_empty());
    assert!(!fixture.output_root.join("Music").join("Foo_Bar.mp4").exists());
}

#[tokio::test]
async fn test_repeat_download_succeeds() {
    let fixture = TestFixture::new();
    let body = json!({ "url": "https://www.youtube.com/watch?v=test123" });

    let first = fixture.post("/api/v1/download", body.clone()).await;
    let second = fixture.post("/api/v1/download", body).await;

    assert_eq!(first.status, StatusCode::OK);
    assert_eq!(second.status, StatusCode::OK);
    assert_eq!(first.body["path"], second.body["path"]);
    assert_eq!(fixture.muxer.merge_count().await, 2);
}
