// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! API error types
//!
//! Every error leaving this service is an error-shaped JSON body; no
//! handler failure is allowed to crash the process or leak a bare 500.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Error-shaped response body
///
/// The `brand`/`confidence` fields mirror the success shape so clients can
/// deserialize either with the same struct.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ErrorResponse {
    pub error: String,
    pub brand: String,
    pub confidence: f32,
}

#[derive(Debug, Clone)]
pub enum ApiError {
    /// Client-side request problem, answered with 400
    InvalidRequest(String),
    /// Detector was never loaded, answered with 500
    ModelNotLoaded,
    /// Anything unexpected in the handler path, answered with 500
    Internal(String),
}

impl ApiError {
    pub fn to_response(&self) -> ErrorResponse {
        let error = match self {
            ApiError::InvalidRequest(msg) => msg.clone(),
            ApiError::ModelNotLoaded => "Model not loaded".to_string(),
            ApiError::Internal(msg) => format!("Server error: {}", msg),
        };

        ErrorResponse {
            error,
            brand: "Error".to_string(),
            confidence: 0.0,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::ModelNotLoaded | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::InvalidRequest(msg) => write!(f, "Invalid request: {}", msg),
            ApiError::ModelNotLoaded => write!(f, "Model not loaded"),
            ApiError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status_code(), Json(self.to_response())).into_response()
    }
}
