// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Detection result types
//!
//! A forward pass resolves to one of three states: a single accepted
//! detection, nothing above the confidence threshold, or an error from the
//! runtime. Keeping these distinct lets the caller tell "nothing detected"
//! apart from "extraction failed" instead of collapsing both into the same
//! benign output.

use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box in pixel units of the input image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x: i64,
    pub y: i64,
    pub w: i64,
    pub h: i64,
}

impl BoundingBox {
    pub const ZERO: BoundingBox = BoundingBox {
        x: 0,
        y: 0,
        w: 0,
        h: 0,
    };
}

/// One accepted (class, confidence, box) triple
#[derive(Debug, Clone)]
pub struct Detection {
    /// Model class index, always inside the class table
    pub class_id: usize,
    /// Brand name for `class_id`
    pub label: &'static str,
    /// Predicted confidence, in (0.3, 1.0]
    pub confidence: f32,
    /// Location in original image pixels
    pub bbox: BoundingBox,
}

/// Result of one successful forward pass
#[derive(Debug, Clone)]
pub enum DetectOutcome {
    /// The best candidate cleared the confidence threshold
    Detection(Detection),
    /// No candidate above threshold (or class index outside the table)
    NoDetection,
}
