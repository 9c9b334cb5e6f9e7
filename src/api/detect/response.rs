// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Detection response types

use serde::{Deserialize, Serialize};

use crate::detector::{BoundingBox, Detection, NUM_CLASSES};
use crate::version::MODEL_VERSION;

/// Static metadata attached to every detection response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelInfo {
    pub name: String,
    pub version: String,
    pub classes: usize,
    pub accuracy: String,
}

impl Default for ModelInfo {
    fn default() -> Self {
        Self {
            name: "CarBrandsAI YOLOv11m".to_string(),
            version: MODEL_VERSION.to_string(),
            classes: NUM_CLASSES,
            accuracy: "87.4% mAP50".to_string(),
        }
    }
}

/// Response from POST /api/detect
///
/// Always carries exactly these five keys on HTTP 200.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectResponse {
    /// Brand name, "Unknown" when nothing cleared the threshold, or
    /// "Error" when the upload could not be decoded
    pub brand: String,
    /// Confidence score (0.0-1.0)
    pub confidence: f32,
    /// Wall-clock processing time, formatted like "0.12s"
    pub latency: String,
    /// Location in pixel units of the uploaded image
    #[serde(rename = "box")]
    pub bounding_box: BoundingBox,
    /// Static model metadata
    pub model_info: ModelInfo,
}

impl DetectResponse {
    /// A detection that cleared the confidence threshold
    pub fn detected(detection: &Detection, elapsed_secs: f64) -> Self {
        Self {
            brand: detection.label.to_string(),
            confidence: detection.confidence,
            latency: format_latency(elapsed_secs),
            bounding_box: detection.bbox,
            model_info: ModelInfo::default(),
        }
    }

    /// Nothing detected above threshold (also used when extraction failed)
    pub fn unknown(elapsed_secs: f64) -> Self {
        Self {
            brand: "Unknown".to_string(),
            confidence: 0.0,
            latency: format_latency(elapsed_secs),
            bounding_box: BoundingBox::ZERO,
            model_info: ModelInfo::default(),
        }
    }

    /// The upload could not be decoded; answered with 200, not 500
    pub fn decode_failure() -> Self {
        Self {
            brand: "Error".to_string(),
            confidence: 0.0,
            latency: "0.00s".to_string(),
            bounding_box: BoundingBox::ZERO,
            model_info: ModelInfo::default(),
        }
    }
}

fn format_latency(elapsed_secs: f64) -> String {
    format!("{:.2}s", elapsed_secs)
}
