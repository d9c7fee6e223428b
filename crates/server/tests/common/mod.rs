//! Common test utilities for in-process API testing.
//!
//! The fixture wires the real router to a temp upload directory and a stub
//! encoder executable standing in for ffmpeg, so stream lifecycle tests
//! run without ffmpeg installed and without binding a socket.

#![allow(dead_code)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::PathBuf;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use relaycast_core::{Config, EncoderConfig, StreamSupervisor, UploadConfig};
use relaycast_server::api::create_router;
use relaycast_server::state::AppState;

/// Upload ceiling used by the fixture, kept small so oversize tests stay
/// cheap.
pub const TEST_MAX_UPLOAD_BYTES: u64 = 1024 * 1024;

const BOUNDARY: &str = "test-boundary-7MA4YWxkTrZu0gW";

/// Test fixture: the real router over a temp upload dir and stub encoder.
pub struct TestFixture {
    pub router: Router,
    pub temp_dir: TempDir,
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl TestFixture {
    /// Fixture whose stub encoder runs until signaled.
    pub fn new() -> Self {
        Self::with_encoder_body("exec sleep 30")
    }

    /// Fixture whose stub encoder runs the given shell body.
    pub fn with_encoder_body(body: &str) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let ffmpeg_path = write_stub_encoder(&temp_dir, body);
        Self::with_ffmpeg_path(temp_dir, ffmpeg_path)
    }

    /// Fixture pointing at an encoder binary that does not exist.
    pub fn with_missing_encoder() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let ffmpeg_path = temp_dir.path().join("no-such-binary");
        Self::with_ffmpeg_path(temp_dir, ffmpeg_path)
    }

    fn with_ffmpeg_path(temp_dir: TempDir, ffmpeg_path: PathBuf) -> Self {
        let upload_dir = temp_dir.path().join("uploads");
        fs::create_dir_all(&upload_dir).expect("Failed to create upload dir");

        let config = Config {
            upload: UploadConfig {
                dir: upload_dir,
                max_bytes: TEST_MAX_UPLOAD_BYTES,
            },
            encoder: EncoderConfig {
                ffmpeg_path,
                ..EncoderConfig::default()
            },
            ..Config::default()
        };

        let supervisor = Arc::new(StreamSupervisor::new(
            config.encoder.clone(),
            config.ingest.base_url.clone(),
        ));
        let state = Arc::new(AppState::new(config, supervisor));
        let router = create_router(state);

        Self { router, temp_dir }
    }

    pub fn upload_dir(&self) -> PathBuf {
        self.temp_dir.path().join("uploads")
    }

    /// Files currently present in the upload directory.
    pub fn uploaded_files(&self) -> Vec<PathBuf> {
        fs::read_dir(self.upload_dir())
            .expect("Failed to read upload dir")
            .map(|entry| entry.expect("Failed to read dir entry").path())
            .collect()
    }

    /// Send a GET request to the test server.
    pub async fn get(&self, path: &str) -> TestResponse {
        let request = Request::builder()
            .method("GET")
            .uri(path)
            .body(Body::empty())
            .unwrap();
        self.send(request).await
    }

    /// Send a POST request with an empty body.
    pub async fn post(&self, path: &str) -> TestResponse {
        let request = Request::builder()
            .method("POST")
            .uri(path)
            .body(Body::empty())
            .unwrap();
        self.send(request).await
    }

    /// Send a POST request with a multipart form body.
    pub async fn post_multipart(&self, path: &str, form: MultipartForm) -> TestResponse {
        let request = Request::builder()
            .method("POST")
            .uri(path)
            .header(
                "content-type",
                format!("multipart/form-data; boundary={}", BOUNDARY),
            )
            .body(Body::from(form.build()))
            .unwrap();
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
            .expect("Failed to read response body")
            .to_bytes();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }
}

fn write_stub_encoder(temp_dir: &TempDir, body: &str) -> PathBuf {
    let path = temp_dir.path().join("fake-ffmpeg");
    fs::write(&path, format!("#!/bin/sh\n{}\n", body)).expect("Failed to write stub encoder");
    let mut perms = fs::metadata(&path)
        .expect("Failed to stat stub encoder")
        .permissions();
    perms.set_mode(0o755);
    fs::set_permissions(&path, perms).expect("Failed to chmod stub encoder");
    path
}

/// Builder for multipart/form-data request bodies.
#[derive(Default)]
pub struct MultipartForm {
    body: Vec<u8>,
}

impl MultipartForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, name: &str, value: &str) -> Self {
        self.body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{}\"\r\n\r\n{}\r\n",
                BOUNDARY, name, value
            )
            .as_bytes(),
        );
        self
    }

    pub fn file(mut self, name: &str, filename: &str, content_type: &str, data: &[u8]) -> Self {
        self.body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: {}\r\n\r\n",
                BOUNDARY, name, filename, content_type
            )
            .as_bytes(),
        );
        self.body.extend_from_slice(data);
        self.body.extend_from_slice(b"\r\n");
        self
    }

    fn build(mut self) -> Vec<u8> {
        self.body
            .extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
        self.body
    }
}
