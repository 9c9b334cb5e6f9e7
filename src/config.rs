// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Server configuration
//!
//! Defaults mirror the deployed service (0.0.0.0:5000, weights under
//! ./model). Each value can be overridden through the environment.

use std::env;
use std::path::PathBuf;

/// Maximum accepted upload size (16MB)
pub const MAX_UPLOAD_BYTES: usize = 16 * 1024 * 1024;

/// Runtime configuration for the detection node
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Listen address
    pub host: String,
    /// Listen port
    pub port: u16,
    /// Path to the ONNX detection weights
    pub model_path: PathBuf,
    /// Directory created at startup for uploads (kept for client parity,
    /// nothing is persisted into it)
    pub upload_dir: PathBuf,
    /// Maximum request body size in bytes
    pub max_upload_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            model_path: PathBuf::from("./model/best.onnx"),
            upload_dir: PathBuf::from("uploads"),
            max_upload_bytes: MAX_UPLOAD_BYTES,
        }
    }
}

impl ServerConfig {
    /// Build a config from environment variables, falling back to the
    /// defaults above for anything unset.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let host = env::var("API_HOST").unwrap_or(defaults.host);
        let port = env::var("API_PORT")
            .ok()
            .and_then(|v| v.parse::<u16>().ok())
            .unwrap_or(defaults.port);
        let model_path = env::var("MODEL_PATH")
            .map(PathBuf::from)
            .unwrap_or(defaults.model_path);
        let upload_dir = env::var("UPLOAD_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.upload_dir);

        Self {
            host,
            port,
            model_path,
            upload_dir,
            max_upload_bytes: MAX_UPLOAD_BYTES,
        }
    }

    /// Upload cap formatted for the health endpoint ("16MB")
    pub fn max_file_size_label(&self) -> String {
        format!("{}MB", self.max_upload_bytes / (1024 * 1024))
    }
}
