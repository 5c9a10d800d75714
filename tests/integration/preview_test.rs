//! Integration tests for the version preview endpoint.

mod helpers;

use axum::http::StatusCode;
use image::{GenericImageView, ImageFormat};

use helpers::{TestApp, solid_image};

const RED: [u8; 4] = [255, 0, 0, 255];
const BLUE: [u8; 4] = [0, 0, 255, 255];

#[tokio::test]
async fn test_live_preview_with_headers() {
    let app = TestApp::new().await;
    app.put_file("alice", "photos/cat.png", &solid_image(64, 32, RED, ImageFormat::Png));

    let response = app
        .get("/api/versions/preview?file=photos/cat.png&x=16&y=16", Some("alice"))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.header("content-type"), Some("image/png"));
    assert_eq!(
        response.header("content-disposition"),
        Some("inline; filename=\"16-16-crop.png\"")
    );
    assert_eq!(
        response.header("cache-control"),
        Some("private, max-age=86400, immutable")
    );
    assert!(response.header("etag").is_some());
    assert!(response.header("last-modified").is_some_and(|v| v.ends_with("GMT")));

    let img = response.image();
    assert_eq!(img.dimensions(), (16, 16));
    assert!(app.data_root().join("appdata/previews").is_dir());
}

#[tokio::test]
async fn test_versioned_preview_uses_version_content() {
    let app = TestApp::new().await;
    app.put_file("alice", "cat.png", &solid_image(20, 20, RED, ImageFormat::Png));
    app.put_version("alice", "cat.png", 42, &solid_image(20, 20, BLUE, ImageFormat::Png));

    let live = app
        .get("/api/versions/preview?file=cat.png&x=10&y=10", Some("alice"))
        .await;
    let version = app
        .get("/api/versions/preview?file=cat.png&x=10&y=10&version=42", Some("alice"))
        .await;

    assert_eq!(live.status, StatusCode::OK);
    assert_eq!(version.status, StatusCode::OK);
    let [r, _, b, _] = live.image().get_pixel(5, 5).0;
    assert!(r > 200 && b < 50, "live preview is not red");
    let [r, _, b, _] = version.image().get_pixel(5, 5).0;
    assert!(r < 50 && b > 200, "version preview is not blue");
    assert_ne!(live.header("etag"), version.header("etag"));
}

#[tokio::test]
async fn test_jpeg_version_previews_as_jpeg() {
    let app = TestApp::new().await;
    app.put_file("alice", "photo.jpg", &solid_image(40, 40, RED, ImageFormat::Jpeg));
    let old = solid_image(40, 40, BLUE, ImageFormat::Jpeg);
    app.put_version("alice", "photo.jpg", 1_700_000_000, &old);

    let response = app
        .get(
            "/api/versions/preview?file=photo.jpg&x=10&y=10&version=1700000000",
            Some("alice"),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.header("content-type"), Some("image/jpeg"));
    assert_eq!(image::guess_format(&response.body).unwrap(), ImageFormat::Jpeg);
}

#[tokio::test]
async fn test_rewrite_keeping_mtime_gets_fresh_preview() {
    let app = TestApp::new().await;
    app.put_file("alice", "cat.png", &solid_image(20, 20, RED, ImageFormat::Png));
    let path = app.data_root().join("alice/files/cat.png");
    let mtime = std::fs::metadata(&path).unwrap().modified().unwrap();
    let uri = "/api/versions/preview?file=cat.png&x=10&y=10";

    let before = app.get(uri, Some("alice")).await;

    // Same mtime, different content, as `cp -p` would leave it.
    app.put_file("alice", "cat.png", &solid_image(30, 30, BLUE, ImageFormat::Png));
    std::fs::File::options()
        .write(true)
        .open(&path)
        .unwrap()
        .set_modified(mtime)
        .unwrap();

    let after = app.get(uri, Some("alice")).await;

    assert_eq!(before.status, StatusCode::OK);
    assert_eq!(after.status, StatusCode::OK);
    let [r, _, b, _] = after.image().get_pixel(5, 5).0;
    assert!(r < 50 && b > 200, "preview still shows the old content");
}

#[tokio::test]
async fn test_default_size_when_omitted() {
    let app = TestApp::new().await;
    app.put_file("alice", "cat.png", &solid_image(100, 100, RED, ImageFormat::Png));

    let response = app
        .get("/api/versions/preview?file=cat.png", Some("alice"))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.image().dimensions(), (32, 32));
}

#[tokio::test]
async fn test_repeated_requests_are_stable() {
    let app = TestApp::new().await;
    app.put_file("alice", "cat.png", &solid_image(50, 50, RED, ImageFormat::Png));
    let uri = "/api/versions/preview?file=cat.png&x=12&y=12";

    let first = app.get(uri, Some("alice")).await;
    let second = app.get(uri, Some("alice")).await;

    assert_eq!(first.status, StatusCode::OK);
    assert_eq!(second.status, StatusCode::OK);
    assert_eq!(first.header("etag"), second.header("etag"));
    assert_eq!(first.header("last-modified"), second.header("last-modified"));
    assert_eq!(first.body, second.body);
}

#[tokio::test]
async fn test_matching_etag_is_not_modified() {
    let app = TestApp::new().await;
    app.put_file("alice", "cat.png", &solid_image(50, 50, RED, ImageFormat::Png));
    let uri = "/api/versions/preview?file=cat.png&x=12&y=12";

    let first = app.get(uri, Some("alice")).await;
    let etag = first.header("etag").unwrap().to_string();

    let second = app
        .get_with(uri, Some("alice"), &[("if-none-match", etag.as_str())])
        .await;

    assert_eq!(second.status, StatusCode::NOT_MODIFIED);
    assert!(second.body.is_empty());

    let weak = format!("W/{etag}");
    let third = app
        .get_with(uri, Some("alice"), &[("if-none-match", weak.as_str())])
        .await;
    assert_eq!(third.status, StatusCode::NOT_MODIFIED);

    let any = app.get_with(uri, Some("alice"), &[("if-none-match", "*")]).await;
    assert_eq!(any.status, StatusCode::NOT_MODIFIED);
}

#[tokio::test]
async fn test_unknown_version_is_not_found() {
    let app = TestApp::new().await;
    app.put_file("alice", "cat.png", &solid_image(20, 20, RED, ImageFormat::Png));
    app.put_version("alice", "cat.png", 42, &solid_image(20, 20, BLUE, ImageFormat::Png));

    for version in ["43", "abc"] {
        let uri = format!("/api/versions/preview?file=cat.png&x=10&y=10&version={version}");
        let response = app.get(&uri, Some("alice")).await;

        assert_eq!(response.status, StatusCode::NOT_FOUND, "version {version}");
        assert!(response.body.is_empty());
    }
}

#[tokio::test]
async fn test_missing_file_is_not_found() {
    let app = TestApp::new().await;
    app.put_file("alice", "cat.png", &solid_image(20, 20, RED, ImageFormat::Png));

    let response = app
        .get("/api/versions/preview?file=dog.png&x=10&y=10", Some("alice"))
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);

    let response = app
        .get("/api/versions/preview?file=cat.png&x=10&y=10", Some("bob"))
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_invalid_parameters_are_bad_request() {
    let app = TestApp::new().await;
    app.put_file("alice", "cat.png", &solid_image(20, 20, RED, ImageFormat::Png));

    for uri in [
        "/api/versions/preview?file=&x=10&y=10",
        "/api/versions/preview?x=10&y=10&version=42",
        "/api/versions/preview?file=cat.png&x=0&y=10",
        "/api/versions/preview?file=cat.png&x=-4&y=10",
        "/api/versions/preview?file=cat.png&x=10&y=0",
        "/api/versions/preview?file=cat.png&x=10&y=-1",
        "/api/versions/preview?file=cat.png&x=abc&y=10",
        "/api/versions/preview?file=cat.png&x=10&y=1.5",
        "/api/versions/preview?file=cat.png&x=10&y=10&mimeFallback=maybe",
    ] {
        let response = app.get(uri, Some("alice")).await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST, "{uri}");
        assert!(response.body.is_empty(), "{uri}");
    }
}

#[tokio::test]
async fn test_path_escape_is_forbidden() {
    let app = TestApp::new().await;
    app.put_file("alice", "cat.png", &solid_image(20, 20, RED, ImageFormat::Png));
    app.put_file("bob", "secret.png", &solid_image(20, 20, BLUE, ImageFormat::Png));

    let response = app
        .get(
            "/api/versions/preview?file=../../bob/files/secret.png&x=10&y=10",
            Some("alice"),
        )
        .await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_missing_identity_is_unauthorized() {
    let app = TestApp::new().await;

    let response = app
        .get("/api/versions/preview?file=cat.png&x=10&y=10", None)
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.json()["error"], "UNAUTHORIZED");
}

#[tokio::test]
async fn test_unpreviewable_file_and_mime_fallback() {
    let app = TestApp::new().await;
    app.put_file("alice", "notes.txt", b"hello");

    let response = app
        .get("/api/versions/preview?file=notes.txt&x=10&y=10", Some("alice"))
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);

    let response = app
        .get(
            "/api/versions/preview?file=notes.txt&x=10&y=10&mimeFallback=true",
            Some("alice"),
        )
        .await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.header("location"), Some("/core/img/filetypes/text.svg"));

    let response = app
        .get(
            "/api/versions/preview?file=notes.txt&x=10&y=10&mimeFallback=1",
            Some("alice"),
        )
        .await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
}

#[tokio::test]
async fn test_health() {
    let app = TestApp::new().await;

    let response = app.get("/api/health", None).await;

    assert_eq!(response.status, StatusCode::OK);
    let body = response.json();
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["status"], "ok");
}
