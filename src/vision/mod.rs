// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Image classifiers used to describe an upload
//!
//! This module provides:
//! - Face detection via a SeetaFace cascade (`rustface`)
//! - Dog / not-dog discrimination via ResNet50 (ONNX)
//! - Breed classification via Xception bottleneck features + a trained head (ONNX)
//!
//! Everything runs on CPU.

pub mod breed;
pub mod dog;
pub mod error;
pub mod face;
pub mod image_utils;
pub mod labels;
pub mod model_manager;
pub mod onnx;
pub mod preprocessing;

pub use breed::{BreedClassifier, XceptionBreedClassifier};
pub use dog::{is_dog_class, DogDetector, ResNet50DogDetector, DOG_CLASS_INDICES};
pub use error::VisionError;
pub use face::{CascadeFaceDetector, FaceDetector};
pub use image_utils::{load_image, path_to_tensor};
pub use labels::LabelTable;
pub use model_manager::{ClassifierSet, VisionModelConfig, VisionModelInfo};
