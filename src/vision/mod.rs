// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Image decoding and preprocessing for brand detection

pub mod image_utils;
pub mod preprocess;

pub use image_utils::{
    decode_data_uri_image, decode_image_bytes, detect_format, ImageError, ImageInfo, ImageInput,
};
pub use preprocess::{preprocess_for_detection, Letterbox, DETECTION_INPUT_SIZE};
