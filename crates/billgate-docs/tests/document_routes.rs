//! # Integration Tests for billgate-docs
//!
//! Drives the internal router end to end against a temporary document root.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use tower::ServiceExt;

use billgate_docs::{router, AuthConfig, FileStore};

fn bills_dir() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("1111"), b"bob: 12.50 EUR").unwrap();
    std::fs::write(dir.path().join("2222"), [0u8, 159, 146, 150, 255]).unwrap();
    dir
}

async fn get(app: axum::Router, uri: &str, authorization: Option<&str>) -> (StatusCode, Vec<u8>) {
    let mut builder = Request::builder().uri(uri);
    if let Some(value) = authorization {
        builder = builder.header("Authorization", value);
    }
    let response = app.oneshot(builder.body(Body::empty()).unwrap()).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, bytes.to_vec())
}

#[tokio::test]
async fn serves_document_bytes_verbatim() {
    let dir = bills_dir();
    let app = router(FileStore::new(dir.path()), AuthConfig::default());

    let (status, body) = get(app, "/internal/billing/2222", Some("token")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, vec![0u8, 159, 146, 150, 255]);
}

#[tokio::test]
async fn missing_document_is_404() {
    let dir = bills_dir();
    let app = router(FileStore::new(dir.path()), AuthConfig::default());

    let (status, _) = get(app, "/internal/billing/3333", Some("token")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn missing_authorization_is_401() {
    let dir = bills_dir();
    let app = router(FileStore::new(dir.path()), AuthConfig::default());

    let (status, body) = get(app, "/internal/billing/1111", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body.is_empty());
}

#[tokio::test]
async fn configured_token_is_enforced() {
    let dir = bills_dir();
    let app = router(FileStore::new(dir.path()), AuthConfig::with_token("s3cret"));

    let (status, _) = get(app.clone(), "/internal/billing/1111", Some("Bearer wrong")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = get(app, "/internal/billing/1111", Some("Bearer s3cret")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"bob: 12.50 EUR");
}

#[tokio::test]
async fn dot_dot_segment_does_not_escape_root() {
    let dir = bills_dir();
    let app = router(FileStore::new(dir.path()), AuthConfig::default());

    let (status, _) = get(app, "/internal/billing/..", Some("token")).await;
    assert_ne!(status, StatusCode::OK);
}

#[tokio::test]
async fn health_needs_no_authorization() {
    let dir = bills_dir();
    let app = router(FileStore::new(dir.path()), AuthConfig::default());

    let (status, _) = get(app, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
}
