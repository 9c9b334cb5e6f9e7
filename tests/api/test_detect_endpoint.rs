// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Endpoint tests for POST /api/detect
//!
//! These tests drive the real router without loaded weights, covering the
//! validation tier (400s) and the model-not-loaded tier (500). Inference
//! itself is covered by the detector unit tests on synthetic output.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use carbrands_node::api::{router, AppState};
use serde_json::Value;
use tower::util::ServiceExt;

// 1x1 red PNG image (base64)
const TINY_PNG_BASE64: &str = "iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mP8z8DwHwAFBQIAX8jx0gAAAABJRU5ErkJggg==";

const BOUNDARY: &str = "carbrands-test-boundary";

/// Build a multipart POST /api/detect request with one field
fn multipart_request(field_name: &str, filename: Option<&str>, content: &[u8]) -> Request<Body> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
    match filename {
        Some(name) => body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
                field_name, name
            )
            .as_bytes(),
        ),
        None => body.extend_from_slice(
            format!("Content-Disposition: form-data; name=\"{}\"\r\n", field_name).as_bytes(),
        ),
    }
    body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
    body.extend_from_slice(content);
    body.extend_from_slice(format!("\r\n--{}--\r\n", BOUNDARY).as_bytes());

    Request::builder()
        .method("POST")
        .uri("/api/detect")
        .header(
            "content-type",
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(body))
        .unwrap()
}

async fn send(request: Request<Body>) -> (StatusCode, Value) {
    let app = router(AppState::new_for_test());
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

#[tokio::test]
async fn test_missing_image_field_is_400() {
    let request = multipart_request("file", Some("car.png"), b"not-the-right-field");
    let (status, body) = send(request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "No image file provided");
    assert_eq!(body["brand"], "Error");
    assert_eq!(body["confidence"], 0.0);
}

#[tokio::test]
async fn test_empty_filename_is_400() {
    let request = multipart_request("image", Some(""), b"anything");
    let (status, body) = send(request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "No file selected");
}

#[tokio::test]
async fn test_gif_extension_is_400() {
    let request = multipart_request("image", Some("anim.gif"), b"GIF89a");
    let (status, body) = send(request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Unsupported file type: gif");
}

#[tokio::test]
async fn test_uppercase_extension_passes_validation() {
    // Validation is case-insensitive; without weights the request then
    // hits the model-not-loaded tier instead of a 400
    let png_bytes = STANDARD.decode(TINY_PNG_BASE64).unwrap();
    let request = multipart_request("image", Some("CAR.JPG"), &png_bytes);
    let (status, body) = send(request).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Model not loaded");
}

#[tokio::test]
async fn test_valid_upload_without_model_is_500() {
    let png_bytes = STANDARD.decode(TINY_PNG_BASE64).unwrap();
    let request = multipart_request("image", Some("car.png"), &png_bytes);
    let (status, body) = send(request).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Model not loaded");
    assert_eq!(body["brand"], "Error");
    assert_eq!(body["confidence"], 0.0);
}

#[tokio::test]
async fn test_data_uri_field_without_model_is_500() {
    // Inline data-URI uploads carry no filename and skip the extension
    // gate, then stop at the model-not-loaded tier
    let uri = format!("data:image/png;base64,{}", TINY_PNG_BASE64);
    let request = multipart_request("image", None, uri.as_bytes());
    let (status, body) = send(request).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Model not loaded");
}

#[tokio::test]
async fn test_malformed_multipart_body_is_400() {
    // Declared boundary never appears in the body, so the multipart
    // reader fails; that is a client fault, not a server error
    let request = Request::builder()
        .method("POST")
        .uri("/api/detect")
        .header(
            "content-type",
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from("--wrong-boundary\r\ngarbage"))
        .unwrap();
    let (status, body) = send(request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"]
        .as_str()
        .unwrap()
        .starts_with("Invalid multipart body"));
    assert_eq!(body["brand"], "Error");
}

#[tokio::test]
async fn test_error_body_has_error_shape() {
    let request = multipart_request("file", Some("car.png"), b"x");
    let (_, body) = send(request).await;

    let obj = body.as_object().unwrap();
    assert_eq!(obj.len(), 3);
    for key in ["error", "brand", "confidence"] {
        assert!(obj.contains_key(key), "missing key {}", key);
    }
}
