// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod api;
pub mod config;
pub mod detector;
pub mod version;
pub mod vision;

// Re-export main types
pub use config::ServerConfig;
pub use detector::{BoundingBox, BrandDetector, DetectOutcome, Detection, DetectorError};
pub use vision::{ImageError, ImageInput};
