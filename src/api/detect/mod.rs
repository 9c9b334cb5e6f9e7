// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Detection API endpoint module
//!
//! Provides POST /api/detect for car-brand detection on uploaded images.

pub mod handler;
pub mod response;

pub use handler::{detect_handler, ALLOWED_EXTENSIONS};
pub use response::{DetectResponse, ModelInfo};
