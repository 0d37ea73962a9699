//! Common test utilities for E2E testing of the HTTP surface.
//!
//! This module provides a test fixture that builds the full router in-process
//! with a recording observer injected, plus a small multipart body builder.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use pixshift_core::testing::RecordingObserver;
use pixshift_core::{Config, ImageConverter, ObserverSet};

/// Re-export fixtures for test convenience
pub use pixshift_core::testing::fixtures;

/// Boundary used by [`MultipartBody`].
const BOUNDARY: &str = "----pixshift-test-boundary";

/// Test fixture for E2E testing.
///
/// # Example
///
/// ```rust,ignore
/// #[tokio::test]
/// async fn test_convert() {
///     let fixture = TestFixture::new();
///     let body = MultipartBody::new()
///         .file("files", "a.png", "image/png", fixtures::png_bytes(1, 1))
///         .text("targetFormat", "jpg");
///
///     let response = fixture.post_multipart("/api/convert", body).await;
///     assert_eq!(response.status, StatusCode::OK);
/// }
/// ```
pub struct TestFixture {
    /// The Axum router for testing
    pub router: Router,
    /// Observer receiving every item outcome
    pub observer: Arc<RecordingObserver>,
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
    pub raw: Vec<u8>,
}

impl TestFixture {
    /// Create a new test fixture with the default configuration.
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Create a test fixture with custom configuration.
    pub fn with_config(config: Config) -> Self {
        let observer = Arc::new(RecordingObserver::new());
        let observers = ObserverSet::standard().with_shared(observer.clone());
        let converter = ImageConverter::new(&config.convert, Arc::new(observers));

        let state = Arc::new(pixshift_server::state::AppState::new(config, converter));
        let router = pixshift_server::api::create_router(state);

        Self { router, observer }
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

    /// Send a POST request with a multipart form body.
    pub async fn post_multipart(&self, path: &str, body: MultipartBody) -> TestResponse {
        let (content_type, bytes) = body.build();
        self.post_with_content_type(path, bytes, &content_type).await
    }

    /// Send a POST request with a raw body and custom content type.
    pub async fn post_with_content_type(
        &self,
        path: &str,
        body: Vec<u8>,
        content_type: &str,
    ) -> TestResponse {
        let request = Request::builder()
            .method("POST")
            .uri(path)
            .header("Content-Type", content_type)
            .body(Body::from(body))
            .unwrap();
        self.send(request).await
    }

    async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes();

        let body: Value = if body_bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body_bytes).unwrap_or(Value::Null)
        };

        TestResponse {
            status,
            body,
            raw: body_bytes.to_vec(),
        }
    }
}

/// One part of a multipart form.
enum Part {
    File {
        field: String,
        filename: Option<String>,
        content_type: Option<String>,
        bytes: Vec<u8>,
    },
    Text {
        field: String,
        value: String,
    },
}

/// Builder for `multipart/form-data` request bodies.
#[derive(Default)]
pub struct MultipartBody {
    parts: Vec<Part>,
}

impl MultipartBody {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a file part with a filename and content type.
    pub fn file(mut self, field: &str, filename: &str, content_type: &str, bytes: Vec<u8>) -> Self {
        self.parts.push(Part::File {
            field: field.to_string(),
            filename: Some(filename.to_string()),
            content_type: Some(content_type.to_string()),
            bytes,
        });
        self
    }

    /// Adds a binary part with only a content type.
    pub fn unnamed_file(mut self, field: &str, content_type: &str, bytes: Vec<u8>) -> Self {
        self.parts.push(Part::File {
            field: field.to_string(),
            filename: None,
            content_type: Some(content_type.to_string()),
            bytes,
        });
        self
    }

    /// Adds a part with neither a filename nor a content type.
    pub fn bare(mut self, field: &str, bytes: Vec<u8>) -> Self {
        self.parts.push(Part::File {
            field: field.to_string(),
            filename: None,
            content_type: None,
            bytes,
        });
        self
    }

    /// Adds a plain text part.
    pub fn text(mut self, field: &str, value: &str) -> Self {
        self.parts.push(Part::Text {
            field: field.to_string(),
            value: value.to_string(),
        });
        self
    }

    /// Returns the content type header value and the encoded body.
    pub fn build(self) -> (String, Vec<u8>) {
        let mut body = Vec::new();
        for part in self.parts {
            body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
            match part {
                Part::File {
                    field,
                    filename,
                    content_type,
                    bytes,
                } => {
                    let mut disposition =
                        format!("Content-Disposition: form-data; name=\"{}\"", field);
                    if let Some(filename) = filename {
                        disposition.push_str(&format!("; filename=\"{}\"", filename));
                    }
                    body.extend_from_slice(disposition.as_bytes());
                    body.extend_from_slice(b"\r\n");
                    if let Some(content_type) = content_type {
                        body.extend_from_slice(
                            format!("Content-Type: {}\r\n", content_type).as_bytes(),
                        );
                    }
                    body.extend_from_slice(b"\r\n");
                    body.extend_from_slice(&bytes);
                }
                Part::Text { field, value } => {
                    body.extend_from_slice(
                        format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", field)
                            .as_bytes(),
                    );
                    body.extend_from_slice(value.as_bytes());
                }
            }
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());

        (format!("multipart/form-data; boundary={}", BOUNDARY), body)
    }
}

/// Helper to assert a response has expected status.
#[macro_export]
macro_rules! assert_status {
    ($response:expr, $status:expr) => {
        assert_eq!(
            $response.status, $status,
            "Expected status {:?}, got {:?}. Body: {}",
            $status,
            $response.status,
            serde_json::to_string_pretty(&$response.body).unwrap_or_default()
        );
    };
}
