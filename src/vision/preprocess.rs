// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Image preprocessing for the YOLO detection model

use image::{DynamicImage, GenericImageView, Rgb, RgbImage};
use ndarray::Array4;

/// Input size expected by the detection model
pub const DETECTION_INPUT_SIZE: u32 = 640;

/// Padding value for letterboxed borders (YOLO convention)
const PAD_COLOR: u8 = 114;

/// Mapping from model input space back to original image pixels
///
/// The image is scaled by `scale` and centered, so a model-space coordinate
/// `m` corresponds to `(m - pad) / scale` in the original image.
#[derive(Debug, Clone, Copy)]
pub struct Letterbox {
    pub scale: f32,
    pub pad_x: f32,
    pub pad_y: f32,
}

impl Letterbox {
    /// Project a model-space point back into original image coordinates
    pub fn to_original(&self, x: f32, y: f32) -> (f32, f32) {
        ((x - self.pad_x) / self.scale, (y - self.pad_y) / self.scale)
    }
}

/// Preprocess an image for detection
///
/// Steps:
/// 1. Resize with aspect ratio preservation to DETECTION_INPUT_SIZE
/// 2. Pad to square with gray (114) background, centered
/// 3. Convert to RGB
/// 4. Scale pixel values to [0, 1]
/// 5. Convert to NCHW tensor format [1, 3, H, W]
///
/// Returns the tensor together with the letterbox mapping needed to project
/// detections back to the input image.
pub fn preprocess_for_detection(image: &DynamicImage) -> (Array4<f32>, Letterbox) {
    let (resized, letterbox) = letterbox_resize(image, DETECTION_INPUT_SIZE);
    let size = DETECTION_INPUT_SIZE as usize;

    let mut tensor = Array4::zeros((1, 3, size, size));
    for y in 0..size {
        for x in 0..size {
            let pixel = resized.get_pixel(x as u32, y as u32);
            for c in 0..3 {
                tensor[[0, c, y, x]] = pixel[c] as f32 / 255.0;
            }
        }
    }

    (tensor, letterbox)
}

/// Resize image with aspect ratio preservation and centered padding
fn letterbox_resize(image: &DynamicImage, target_size: u32) -> (RgbImage, Letterbox) {
    let (orig_w, orig_h) = image.dimensions();

    // Degenerate input: return a fully padded frame
    if orig_w == 0 || orig_h == 0 {
        let padded = RgbImage::from_pixel(target_size, target_size, Rgb([PAD_COLOR; 3]));
        return (
            padded,
            Letterbox {
                scale: 1.0,
                pad_x: 0.0,
                pad_y: 0.0,
            },
        );
    }

    // Scale to fit within target while preserving aspect ratio
    let scale = (target_size as f32 / orig_w as f32).min(target_size as f32 / orig_h as f32);

    let new_w = ((orig_w as f32 * scale).round() as u32).max(1);
    let new_h = ((orig_h as f32 * scale).round() as u32).max(1);

    let resized = image
        .resize_exact(new_w, new_h, image::imageops::FilterType::Triangle)
        .to_rgb8();

    let mut output = RgbImage::from_pixel(target_size, target_size, Rgb([PAD_COLOR; 3]));

    // Center the resized image
    let offset_x = (target_size - new_w) / 2;
    let offset_y = (target_size - new_h) / 2;

    for y in 0..new_h {
        for x in 0..new_w {
            let pixel = resized.get_pixel(x, y);
            output.put_pixel(x + offset_x, y + offset_y, *pixel);
        }
    }

    (
        output,
        Letterbox {
            scale,
            pad_x: offset_x as f32,
            pad_y: offset_y as f32,
        },
    )
}
