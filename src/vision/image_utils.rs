// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Image loading for the detection endpoint
//!
//! Uploads arrive either as raw multipart bytes or as an inline
//! `data:image/...;base64,` string. Both shapes are resolved once, at the
//! API boundary, into the same canonical `DynamicImage`.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use image::{DynamicImage, ImageFormat};
use thiserror::Error;

use crate::config::MAX_UPLOAD_BYTES;

/// Custom error types for image processing
#[derive(Debug, Error)]
pub enum ImageError {
    #[error("Image data is too large: {0} bytes (max: {1} bytes)")]
    TooLarge(usize, usize),

    #[error("Invalid base64 encoding: {0}")]
    InvalidBase64(#[from] base64::DecodeError),

    #[error("Malformed data URI")]
    MalformedDataUri,

    #[error("Unsupported image format")]
    UnsupportedFormat,

    #[error("Failed to decode image: {0}")]
    DecodeFailed(String),

    #[error("Image data is empty")]
    EmptyData,
}

/// Image information extracted during loading
#[derive(Debug, Clone)]
pub struct ImageInfo {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Detected format
    pub format: ImageFormat,
    /// Size in bytes
    pub size_bytes: usize,
}

/// One uploaded image, before decoding
#[derive(Debug, Clone)]
pub enum ImageInput {
    /// Raw bytes from a multipart file field
    Bytes(Vec<u8>),
    /// Inline `data:image/...;base64,` string
    DataUri(String),
}

impl ImageInput {
    /// Classify an uploaded field body. Clients normally send raw file
    /// bytes, but inline data URIs are accepted as well.
    pub fn from_upload(bytes: Vec<u8>) -> Self {
        if bytes.starts_with(b"data:image") {
            match String::from_utf8(bytes.clone()) {
                Ok(s) => ImageInput::DataUri(s),
                Err(_) => ImageInput::Bytes(bytes),
            }
        } else {
            ImageInput::Bytes(bytes)
        }
    }

    /// Resolve this input into a decoded image
    pub fn resolve(&self) -> Result<(DynamicImage, ImageInfo), ImageError> {
        match self {
            ImageInput::Bytes(bytes) => decode_image_bytes(bytes),
            ImageInput::DataUri(uri) => decode_data_uri_image(uri),
        }
    }
}

/// Decode a `data:image/...;base64,` URI
///
/// The payload after the comma is standard base64; the media type before it
/// is ignored in favor of magic-byte detection.
pub fn decode_data_uri_image(uri: &str) -> Result<(DynamicImage, ImageInfo), ImageError> {
    if uri.is_empty() {
        return Err(ImageError::EmptyData);
    }

    let payload = uri
        .strip_prefix("data:image")
        .and_then(|rest| rest.split_once(','))
        .map(|(_, payload)| payload)
        .ok_or(ImageError::MalformedDataUri)?;

    let bytes = STANDARD.decode(payload)?;
    decode_image_bytes(&bytes)
}

/// Decode raw image bytes (for multipart uploads)
///
/// # Returns
/// * `Ok((DynamicImage, ImageInfo))` - The decoded image and metadata
/// * `Err(ImageError)` - If decoding fails
pub fn decode_image_bytes(bytes: &[u8]) -> Result<(DynamicImage, ImageInfo), ImageError> {
    // Validate size
    if bytes.len() > MAX_UPLOAD_BYTES {
        return Err(ImageError::TooLarge(bytes.len(), MAX_UPLOAD_BYTES));
    }

    if bytes.is_empty() {
        return Err(ImageError::EmptyData);
    }

    // Detect format from magic bytes
    let format = detect_format(bytes)?;

    // Load image
    let img = image::load_from_memory_with_format(bytes, format)
        .map_err(|e| ImageError::DecodeFailed(e.to_string()))?;

    let info = ImageInfo {
        width: img.width(),
        height: img.height(),
        format,
        size_bytes: bytes.len(),
    };

    Ok((img, info))
}

/// Detect image format from magic bytes
///
/// The client-supplied filename is never trusted for this.
pub fn detect_format(bytes: &[u8]) -> Result<ImageFormat, ImageError> {
    if bytes.len() < 4 {
        return Err(ImageError::UnsupportedFormat);
    }

    match bytes {
        // PNG: 89 50 4E 47 (0x89 P N G)
        [0x89, 0x50, 0x4E, 0x47, ..] => Ok(ImageFormat::Png),

        // JPEG: FF D8 FF
        [0xFF, 0xD8, 0xFF, ..] => Ok(ImageFormat::Jpeg),

        // WebP: RIFF .... WEBP
        [0x52, 0x49, 0x46, 0x46, _, _, _, _, 0x57, 0x45, 0x42, 0x50, ..] => Ok(ImageFormat::WebP),

        // GIF: GIF87a or GIF89a
        [0x47, 0x49, 0x46, 0x38, x, ..] if *x == 0x37 || *x == 0x39 => Ok(ImageFormat::Gif),

        _ => Err(ImageError::UnsupportedFormat),
    }
}
