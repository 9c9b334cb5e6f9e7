// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! YOLO brand-detection model
//!
//! Wraps one ONNX Runtime session over the trained car-brand weights.
//! The detector is constructed once at startup, shared read-only behind
//! `Arc`, and never reloaded while serving.

pub mod classes;
pub mod outcome;

pub use classes::{name_for, CLASS_NAMES, NUM_CLASSES};
pub use outcome::{BoundingBox, DetectOutcome, Detection};

use image::DynamicImage;
use ndarray::{Array4, ArrayViewD, IxDyn};
use ort::execution_providers::CPU as CPUExecutionProvider;
use ort::session::builder::GraphOptimizationLevel;
use ort::session::Session;
use ort::value::Value;
use std::path::Path;
use std::sync::{Arc, Mutex};
use thiserror::Error;
use tracing::{debug, info};

use crate::vision::preprocess::{preprocess_for_detection, Letterbox, DETECTION_INPUT_SIZE};

/// Minimum confidence a candidate must exceed to be reported
pub const CONFIDENCE_THRESHOLD: f32 = 0.3;

/// Box coordinates plus per-class scores, per candidate
const ATTRS_PER_CANDIDATE: usize = 4 + NUM_CLASSES;

#[derive(Debug, Error)]
pub enum DetectorError {
    #[error("Model file not found: {0}")]
    ModelNotFound(String),

    #[error("Failed to initialize detection session: {0}")]
    Init(String),

    #[error("Inference failed: {0}")]
    Inference(String),

    #[error("Unexpected model output: {0}")]
    BadOutput(String),
}

/// Car-brand detector backed by an ONNX Runtime session
#[derive(Clone)]
pub struct BrandDetector {
    /// ONNX Runtime session (thread-safe)
    session: Arc<Mutex<Session>>,
    /// Model input name
    input_name: String,
    /// Confidence threshold for detections
    confidence_threshold: f32,
}

impl std::fmt::Debug for BrandDetector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BrandDetector")
            .field("input_name", &self.input_name)
            .field("confidence_threshold", &self.confidence_threshold)
            .finish_non_exhaustive()
    }
}

impl BrandDetector {
    /// Load the detection model from a file and warm it up
    ///
    /// # Errors
    /// Returns error if:
    /// - Weights file not found
    /// - ONNX Runtime initialization fails
    /// - The warm-up inference fails
    pub fn load<P: AsRef<Path>>(model_path: P) -> Result<Self, DetectorError> {
        let model_path = model_path.as_ref();

        // Validate path exists before attempting to parse
        if !model_path.exists() {
            return Err(DetectorError::ModelNotFound(
                model_path.display().to_string(),
            ));
        }

        info!("Loading brand detection model from {}", model_path.display());

        let session = Session::builder()
            .map_err(|e| DetectorError::Init(e.to_string()))?
            .with_execution_providers([CPUExecutionProvider::default().build()])
            .map_err(|e| DetectorError::Init(e.to_string()))?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .map_err(|e| DetectorError::Init(e.to_string()))?
            .with_intra_threads(4)
            .map_err(|e| DetectorError::Init(e.to_string()))?
            .commit_from_file(model_path)
            .map_err(|e| {
                DetectorError::Init(format!(
                    "Failed to load model from {}: {}",
                    model_path.display(),
                    e
                ))
            })?;

        let input_name = session
            .inputs()
            .first()
            .map(|input| input.name().to_string())
            .unwrap_or_else(|| "images".to_string());

        debug!("Detection model loaded - input: {}", input_name);

        let detector = Self {
            session: Arc::new(Mutex::new(session)),
            input_name,
            confidence_threshold: CONFIDENCE_THRESHOLD,
        };

        // Warm-up pass on a blank frame surfaces load-time errors here
        // instead of on the first real request
        detector.warmup()?;

        info!("✅ Brand detection model loaded and warmed up");

        Ok(detector)
    }

    fn warmup(&self) -> Result<(), DetectorError> {
        let size = DETECTION_INPUT_SIZE as usize;
        let blank = Array4::<f32>::zeros((1, 3, size, size));
        self.run_session(blank).map(|_| ())
    }

    /// Run one forward pass and reduce the candidates to a single answer
    ///
    /// Every candidate the model emits is scanned and the highest-confidence
    /// one is kept; the output ordering of the runtime is not trusted. The
    /// winner is accepted only when its confidence exceeds the threshold and
    /// its class index is inside the class table.
    pub fn detect(&self, image: &DynamicImage) -> Result<DetectOutcome, DetectorError> {
        let (tensor, letterbox) = preprocess_for_detection(image);
        let (orig_w, orig_h) = (image.width(), image.height());

        let output = self.run_session(tensor)?;

        parse_detections(
            output.view(),
            letterbox,
            orig_w,
            orig_h,
            self.confidence_threshold,
        )
    }

    fn run_session(
        &self,
        tensor: Array4<f32>,
    ) -> Result<ndarray::ArrayD<f32>, DetectorError> {
        let input_value =
            Value::from_array(tensor).map_err(|e| DetectorError::Inference(e.to_string()))?;

        let mut session = self.session.lock().unwrap();
        let outputs = session
            .run(ort::inputs![&self.input_name => input_value])
            .map_err(|e| DetectorError::Inference(e.to_string()))?;

        let output = outputs[0]
            .try_extract_array::<f32>()
            .map_err(|e| DetectorError::BadOutput(e.to_string()))?;

        Ok(output.to_owned())
    }
}

/// Reduce raw model output to at most one detection
///
/// Accepts the ultralytics export layout `[1, 4+nc, N]` as well as the
/// transposed `[1, N, 4+nc]`. Box coordinates are center-format in model
/// input space and are projected back to original image pixels.
pub fn parse_detections(
    output: ArrayViewD<f32>,
    letterbox: Letterbox,
    orig_w: u32,
    orig_h: u32,
    threshold: f32,
) -> Result<DetectOutcome, DetectorError> {
    let shape = output.shape();
    if shape.len() != 3 || shape[0] != 1 {
        return Err(DetectorError::BadOutput(format!(
            "expected [1, {}, N] tensor, got {:?}",
            ATTRS_PER_CANDIDATE, shape
        )));
    }

    // attr-major: [1, attrs, candidates]; candidate-major: [1, candidates, attrs]
    let (num_candidates, attr_major) = if shape[1] == ATTRS_PER_CANDIDATE {
        (shape[2], true)
    } else if shape[2] == ATTRS_PER_CANDIDATE {
        (shape[1], false)
    } else {
        return Err(DetectorError::BadOutput(format!(
            "no axis of {:?} matches {} attributes",
            shape, ATTRS_PER_CANDIDATE
        )));
    };

    let at = |candidate: usize, attr: usize| -> f32 {
        if attr_major {
            output[IxDyn(&[0, attr, candidate])]
        } else {
            output[IxDyn(&[0, candidate, attr])]
        }
    };

    // Scan every candidate for the single best (class, score) pair
    let mut best: Option<(usize, f32, [f32; 4])> = None;
    for i in 0..num_candidates {
        let mut class_id = 0usize;
        let mut score = f32::MIN;
        for c in 0..NUM_CLASSES {
            let s = at(i, 4 + c);
            if s > score {
                score = s;
                class_id = c;
            }
        }

        if best.as_ref().map(|(_, conf, _)| score > *conf).unwrap_or(true) {
            best = Some((class_id, score, [at(i, 0), at(i, 1), at(i, 2), at(i, 3)]));
        }
    }

    let Some((class_id, confidence, [cx, cy, w, h])) = best else {
        return Ok(DetectOutcome::NoDetection);
    };

    if confidence <= threshold {
        return Ok(DetectOutcome::NoDetection);
    }

    let Some(label) = name_for(class_id) else {
        return Ok(DetectOutcome::NoDetection);
    };

    // Project model-space corners back to original image pixels
    let (x1, y1) = letterbox.to_original(cx - w / 2.0, cy - h / 2.0);
    let (x2, y2) = letterbox.to_original(cx + w / 2.0, cy + h / 2.0);

    let x1 = x1.clamp(0.0, orig_w as f32);
    let y1 = y1.clamp(0.0, orig_h as f32);
    let x2 = x2.clamp(0.0, orig_w as f32);
    let y2 = y2.clamp(0.0, orig_h as f32);

    let bbox = BoundingBox {
        x: x1 as i64,
        y: y1 as i64,
        w: (x2 - x1) as i64,
        h: (y2 - y1) as i64,
    };

    Ok(DetectOutcome::Detection(Detection {
        class_id,
        label,
        confidence,
        bbox,
    }))
}
