// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Detection endpoint handler

use axum::{extract::State, Json};
use axum_extra::extract::Multipart;
use std::time::Instant;
use tracing::{debug, info, warn};

use super::response::DetectResponse;
use crate::api::errors::ApiError;
use crate::api::http_server::AppState;
use crate::detector::DetectOutcome;
use crate::vision::ImageInput;

/// File extensions accepted for upload
pub const ALLOWED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "webp"];

/// POST /api/detect - Detect the car brand in an uploaded image
///
/// Accepts a multipart form with an `image` field holding either raw file
/// bytes or an inline `data:image/...;base64,` string, and returns the
/// single best detection.
///
/// # Response
/// - `brand`: Best brand name, "Unknown" below threshold, "Error" on
///   undecodable input
/// - `confidence`: Score in 0.0-1.0
/// - `latency`: Processing time, e.g. "0.12s"
/// - `box`: Bounding box `{x, y, w, h}` in pixels of the uploaded image
/// - `model_info`: Static model metadata
///
/// # Errors
/// - 400 Bad Request: missing `image` field, empty filename, unsupported
///   extension, unreadable multipart body
/// - 500 Internal Server Error: model not loaded
pub async fn detect_handler(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<DetectResponse>, ApiError> {
    // 1. Pull the image field out of the multipart body
    let mut upload: Option<(Option<String>, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::InvalidRequest(format!("Invalid multipart body: {}", e)))?
    {
        if field.name() == Some("image") {
            let filename = field.file_name().map(|s| s.to_string());
            let bytes = field
                .bytes()
                .await
                .map_err(|e| ApiError::InvalidRequest(format!("Invalid multipart body: {}", e)))?;
            upload = Some((filename, bytes.to_vec()));
            break;
        }
    }

    let Some((filename, bytes)) = upload else {
        return Err(ApiError::InvalidRequest("No image file provided".to_string()));
    };

    // 2. Validate the filename when one was sent. Inline data-URI fields
    //    carry no filename and skip the extension gate.
    if let Some(ref name) = filename {
        validate_filename(name)?;
    }

    // 3. Inference requires a loaded detector
    let detector = state.detector.as_ref().ok_or(ApiError::ModelNotLoaded)?;

    debug!(
        "Detect request: filename={:?}, {} bytes",
        filename,
        bytes.len()
    );

    let start = Instant::now();

    // 4. Decode. Bad image bytes are answered with an error-shaped 200,
    //    never a 500.
    let image = match decode_upload(bytes) {
        Ok(image) => image,
        Err(response) => return Ok(Json(response)),
    };

    // 5. Run detection. Extraction failures are logged and downgraded to
    //    "Unknown" instead of surfacing to the caller.
    let elapsed = |start: Instant| start.elapsed().as_secs_f64();
    let response = match detector.detect(&image) {
        Ok(DetectOutcome::Detection(detection)) => {
            info!(
                "Detected {} ({:.2}) in {:.2}s",
                detection.label,
                detection.confidence,
                elapsed(start)
            );
            DetectResponse::detected(&detection, elapsed(start))
        }
        Ok(DetectOutcome::NoDetection) => {
            info!("No brand above threshold ({:.2}s)", elapsed(start));
            DetectResponse::unknown(elapsed(start))
        }
        Err(e) => {
            warn!("Detection failed, reporting Unknown: {}", e);
            DetectResponse::unknown(elapsed(start))
        }
    };

    Ok(Json(response))
}

/// Resolve an upload into a decoded image, or the error-shaped response
/// the endpoint answers with (HTTP 200, brand "Error") when the bytes
/// cannot be decoded
fn decode_upload(bytes: Vec<u8>) -> Result<image::DynamicImage, DetectResponse> {
    let input = ImageInput::from_upload(bytes);
    match input.resolve() {
        Ok((image, image_info)) => {
            debug!(
                "Decoded image: {}x{}, {} bytes",
                image_info.width, image_info.height, image_info.size_bytes
            );
            Ok(image)
        }
        Err(e) => {
            warn!("Failed to decode uploaded image: {}", e);
            Err(DetectResponse::decode_failure())
        }
    }
}

/// Reject empty filenames and disallowed extensions
fn validate_filename(name: &str) -> Result<(), ApiError> {
    if name.is_empty() {
        return Err(ApiError::InvalidRequest("No file selected".to_string()));
    }

    let ext = name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_lowercase())
        .unwrap_or_default();

    if !ALLOWED_EXTENSIONS.contains(&ext.as_str()) {
        return Err(ApiError::InvalidRequest(format!(
            "Unsupported file type: {}",
            ext
        )));
    }

    Ok(())
}
