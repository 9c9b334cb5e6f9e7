// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Class table for the trained brand-detection weights
//!
//! Index position is a contract with the model: class index `i` in the
//! ONNX output corresponds to `CLASS_NAMES[i]`. Do not reorder.

/// Car brand class names, in training order
pub const CLASS_NAMES: [&str; 18] = [
    "Audi",
    "BMW",
    "BYD (New)",
    "BYD (Old)",
    "Chevrolet",
    "Ford",
    "Honda",
    "Hyundai",
    "KIA",
    "KIA (New)",
    "Lexus",
    "Mazda",
    "Mercedes-Benz",
    "Mitsubishi",
    "Nissan",
    "Tesla",
    "Toyota",
    "Volkswagen",
];

/// Number of classes the model predicts
pub const NUM_CLASSES: usize = CLASS_NAMES.len();

/// Look up the brand name for a model class index
pub fn name_for(class_id: usize) -> Option<&'static str> {
    CLASS_NAMES.get(class_id).copied()
}
