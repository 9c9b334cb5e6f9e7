// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Informational endpoints: health, brand list, model metadata

use axum::{extract::State, Json};
use serde_json::{json, Value};

use super::http_server::AppState;
use crate::detector::{CLASS_NAMES, NUM_CLASSES};
use crate::version::MODEL_VERSION;

/// GET / - Health check
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "message": "CarBrandsAI Backend Server",
        "model_loaded": state.detector.is_some(),
        "supported_brands": NUM_CLASSES,
        "max_file_size": state.config.max_file_size_label(),
    }))
}

/// GET /api/brands - List of supported car brands
pub async fn brands_handler() -> Json<Value> {
    Json(json!({
        "brands": CLASS_NAMES,
        "count": NUM_CLASSES,
        "model_version": MODEL_VERSION,
    }))
}

/// GET /api/model-info - Detailed model information
pub async fn model_info_handler() -> Json<Value> {
    Json(json!({
        "model": {
            "name": "CarBrandsAI YOLOv11m",
            "version": MODEL_VERSION,
            "architecture": "YOLOv11 Medium",
            "accuracy": "87.4% mAP50",
            "training_epochs": 35,
            "classes": NUM_CLASSES,
            "input_size": "640x640",
            "framework": "ONNX Runtime",
        },
        "supported_brands": CLASS_NAMES,
        "performance": {
            "mAP50": 0.874,
            "precision": 0.89,
            "recall": 0.85,
            "inference_time": "~100ms",
        },
    }))
}
