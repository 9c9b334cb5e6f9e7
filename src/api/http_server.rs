// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! HTTP server setup and routing

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::detect::detect_handler;
use super::handlers::{brands_handler, health_handler, model_info_handler};
use crate::config::ServerConfig;
use crate::detector::BrandDetector;

/// Shared state for all request handlers
///
/// The detector is loaded once at startup and treated as immutable; `None`
/// means loading failed and /api/detect answers 500 until restart.
#[derive(Clone)]
pub struct AppState {
    pub detector: Option<Arc<BrandDetector>>,
    pub config: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(config: ServerConfig, detector: Option<BrandDetector>) -> Self {
        Self {
            detector: detector.map(Arc::new),
            config: Arc::new(config),
        }
    }

    /// State with default config and no detector, for tests
    pub fn new_for_test() -> Self {
        Self::new(ServerConfig::default(), None)
    }
}

/// Build the application router
pub fn router(state: AppState) -> Router {
    let max_body = state.config.max_upload_bytes;

    Router::new()
        // Health check
        .route("/", get(health_handler))
        // Detection endpoint
        .route("/api/detect", post(detect_handler))
        // Static informational endpoints
        .route("/api/brands", get(brands_handler))
        .route("/api/model-info", get(model_info_handler))
        .layer(DefaultBodyLimit::max(max_body))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind and serve until shutdown
pub async fn start_server(state: AppState) -> anyhow::Result<()> {
    let addr: SocketAddr = format!("{}:{}", state.config.host, state.config.port).parse()?;
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!("API server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
