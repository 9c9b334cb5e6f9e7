// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::Result;
use carbrands_node::{
    api::{start_server, AppState},
    config::ServerConfig,
    detector::BrandDetector,
};
use std::env;
use tokio::signal;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    // Initialize tracing subscriber for logging
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info");
    }
    tracing_subscriber::fmt::init();

    println!("🚗 Starting CarBrands Detection Node...\n");
    println!("📦 BUILD VERSION: {}", carbrands_node::version::VERSION);
    println!("📅 Build Date: {}", carbrands_node::version::BUILD_DATE);
    println!();

    let config = ServerConfig::from_env();

    // Upload directory is created for client parity; nothing is persisted
    if let Err(e) = std::fs::create_dir_all(&config.upload_dir) {
        error!(
            "Failed to create upload directory {}: {}",
            config.upload_dir.display(),
            e
        );
    }

    // Load the detector. A load failure does not abort startup: the server
    // comes up anyway and /api/detect answers 500 until the node restarts
    // with valid weights.
    let detector = match BrandDetector::load(&config.model_path) {
        Ok(detector) => {
            println!("✅ Model loaded");
            Some(detector)
        }
        Err(e) => {
            error!("Model loading failed: {}", e);
            println!("❌ Model loading failed, serving without a detector");
            None
        }
    };

    let port = config.port;
    let state = AppState::new(config, detector);

    println!("\nAPI Endpoints:");
    println!("  Health:       http://localhost:{}/", port);
    println!("  Detect:       POST http://localhost:{}/api/detect", port);
    println!("  Brands:       http://localhost:{}/api/brands", port);
    println!("  Model info:   http://localhost:{}/api/model-info", port);
    println!("\nPress Ctrl+C to shutdown...\n");

    // Serve in the background, shut down on ctrl-c
    let server_handle = tokio::spawn(async move {
        if let Err(e) = start_server(state).await {
            error!("API server error: {}", e);
        }
    });

    signal::ctrl_c().await?;

    info!("Shutting down");
    server_handle.abort();

    println!("👋 Goodbye!");
    Ok(())
}
