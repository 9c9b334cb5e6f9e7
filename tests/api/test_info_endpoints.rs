// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Endpoint tests for the informational routes:
//! GET /, GET /api/brands, GET /api/model-info

use axum::body::Body;
use axum::http::{Request, StatusCode};
use carbrands_node::api::{router, AppState};
use serde_json::Value;
use tower::util::ServiceExt;

async fn get(uri: &str) -> (StatusCode, Value) {
    let app = router(AppState::new_for_test());
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

#[tokio::test]
async fn test_health_endpoint() {
    let (status, body) = get("/").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["message"], "CarBrandsAI Backend Server");
    assert_eq!(body["model_loaded"], false);
    assert_eq!(body["supported_brands"], 18);
    assert_eq!(body["max_file_size"], "16MB");
}

#[tokio::test]
async fn test_brands_endpoint_lists_18_brands() {
    let (status, body) = get("/api/brands").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 18);
    assert_eq!(body["model_version"], "V5");

    let brands = body["brands"].as_array().unwrap();
    assert_eq!(brands.len(), 18);
    assert_eq!(brands[0], "Audi");
    assert_eq!(brands[17], "Volkswagen");
    assert!(brands.iter().any(|b| b == "Mercedes-Benz"));
}

#[tokio::test]
async fn test_model_info_endpoint() {
    let (status, body) = get("/api/model-info").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["model"]["name"], "CarBrandsAI YOLOv11m");
    assert_eq!(body["model"]["version"], "V5");
    assert_eq!(body["model"]["classes"], 18);
    assert_eq!(body["model"]["input_size"], "640x640");
    assert_eq!(body["performance"]["mAP50"], 0.874);
    assert_eq!(body["supported_brands"].as_array().unwrap().len(), 18);
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let (status, _) = get_raw_status("/api/nope").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

async fn get_raw_status(uri: &str) -> (StatusCode, Vec<u8>) {
    let app = router(AppState::new_for_test());
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, bytes.to_vec())
}
