// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! HTTP API for the brand detection node

pub mod detect;
pub mod errors;
pub mod handlers;
pub mod http_server;

pub use detect::{DetectResponse, ModelInfo};
pub use errors::{ApiError, ErrorResponse};
pub use http_server::{router, start_server, AppState};
