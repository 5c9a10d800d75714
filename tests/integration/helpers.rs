//! Shared test helpers for integration tests.

use std::io::Cursor;
use std::path::Path;

use axum::Router;
use axum::body::{Body, Bytes};
use axum::http::{HeaderMap, Request, StatusCode};
use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
use tower::ServiceExt;

use versionhub_core::config::AppConfig;

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Application config
    pub config: AppConfig,
    /// Temporary data root, removed on drop
    pub data: tempfile::TempDir,
}

impl TestApp {
    /// Create a new test application over an empty data root
    pub async fn new() -> Self {
        let data = tempfile::tempdir().expect("Failed to create data root");

        let mut config = AppConfig::default();
        config.storage.data_root = data.path().to_string_lossy().into_owned();

        let state = versionhub_api::build_state(config.clone())
            .await
            .expect("Failed to build state");
        let router = versionhub_api::build_app(state);

        Self {
            router,
            config,
            data,
        }
    }

    /// Store a live file at `<user>/files/<path>`
    pub fn put_file(&self, user: &str, path: &str, content: &[u8]) {
        self.write(&format!("{user}/files/{path}"), content);
    }

    /// Store version `version` of `<path>` for `user`
    pub fn put_version(&self, user: &str, path: &str, version: i64, content: &[u8]) {
        self.write(&format!("{user}/files_versions/{path}.v{version}"), content);
    }

    fn write(&self, relative: &str, content: &[u8]) {
        let full = self.data.path().join(relative);
        if let Some(parent) = full.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent dir");
        }
        std::fs::write(&full, content).expect("Failed to write fixture");
    }

    /// Path of the data root
    pub fn data_root(&self) -> &Path {
        self.data.path()
    }

    /// Make a GET request, optionally as `user`
    pub async fn get(&self, uri: &str, user: Option<&str>) -> TestResponse {
        self.get_with(uri, user, &[]).await
    }

    /// Make a GET request with extra headers
    pub async fn get_with(
        &self,
        uri: &str,
        user: Option<&str>,
        headers: &[(&str, &str)],
    ) -> TestResponse {
        let mut req = Request::builder().method("GET").uri(uri);

        if let Some(user) = user {
            req = req.header(self.config.server.user_header.as_str(), user);
        }
        for (name, value) in headers {
            req = req.header(*name, *value);
        }

        let req = req.body(Body::empty()).expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let headers = response.headers().clone();
        let body = axum::body::to_bytes(response.into_body(), 16 * 1024 * 1024)
            .await
            .expect("Failed to read body");

        TestResponse {
            status,
            headers,
            body,
        }
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// Response status
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
    /// Raw response body
    pub body: Bytes,
}

impl TestResponse {
    /// Value of header `name`, if present and valid UTF-8
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Body decoded as JSON
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body).expect("Body is not JSON")
    }

    /// Body decoded as an image
    pub fn image(&self) -> DynamicImage {
        image::load_from_memory(&self.body).expect("Body is not an image")
    }
}

/// Encode a solid-colour image of the given size
pub fn solid_image(width: u32, height: u32, color: [u8; 4], format: ImageFormat) -> Vec<u8> {
    let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(width, height, Rgba(color)));
    let img = match format {
        ImageFormat::Jpeg => DynamicImage::ImageRgb8(img.to_rgb8()),
        _ => img,
    };
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, format).expect("Failed to encode fixture");
    buf.into_inner()
}
