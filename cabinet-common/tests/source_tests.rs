//! Integration tests for CSV acquisition
//!
//! Spins up a local axum server on an ephemeral port to exercise the HTTP
//! path, and uses temp files for the local sample path.

use axum::{http::StatusCode, routing::get, Router};
use cabinet_common::catalog;
use cabinet_common::source::{fetch_csv, CsvSource};
use cabinet_common::Error;
use std::net::SocketAddr;
use tempfile::TempDir;

const SHEET: &str = "course_id,lesson_id,day_number,title\n\
                     course_alpha,l2,2,Second\n\
                     course_alpha,l1,1,First\n";

/// Test helper: serve a sheet and a couple of failing routes
async fn spawn_sheet_server() -> SocketAddr {
    let app = Router::new()
        .route("/sheet.csv", get(|| async { SHEET }))
        .route(
            "/private.csv",
            get(|| async { (StatusCode::FORBIDDEN, "not published") }),
        )
        .route(
            "/broken.csv",
            get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "") }),
        );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

#[tokio::test]
async fn test_fetch_url_success() {
    let addr = spawn_sheet_server().await;
    let source = CsvSource::Url(format!("http://{}/sheet.csv", addr));

    let text = fetch_csv(&source).await.unwrap();
    assert_eq!(text, SHEET);

    let lessons = catalog::ingest(&text, "course_alpha");
    assert_eq!(lessons.len(), 2);
    assert_eq!(lessons[0].lesson_id, "l1");
}

#[tokio::test]
async fn test_fetch_url_non_success_status() {
    let addr = spawn_sheet_server().await;

    for path in ["private.csv", "broken.csv", "absent.csv"] {
        let source = CsvSource::Url(format!("http://{}/{}", addr, path));
        let result = fetch_csv(&source).await;
        assert!(
            matches!(result, Err(Error::FetchFailed(_))),
            "expected FetchFailed for {}, got {:?}",
            path,
            result
        );
    }
}

#[tokio::test]
async fn test_fetch_url_unreachable() {
    // Bind then drop to get a port with nothing listening
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let source = CsvSource::Url(format!("http://{}/sheet.csv", addr));
    assert!(matches!(fetch_csv(&source).await, Err(Error::FetchFailed(_))));
}

#[tokio::test]
async fn test_fetch_local_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("sample-sheet.csv");
    std::fs::write(&path, SHEET).unwrap();

    let text = fetch_csv(&CsvSource::File(path)).await.unwrap();
    assert_eq!(text, SHEET);
}

#[tokio::test]
async fn test_fetch_empty_location() {
    let result = fetch_csv(&CsvSource::Url("".to_string())).await;
    assert!(matches!(result, Err(Error::SourceUnavailable)));
}
