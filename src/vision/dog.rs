// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Dog / not-dog discrimination with an ImageNet classifier

use anyhow::Result;
use std::ops::RangeInclusive;
use std::path::Path;
use tracing::debug;

use super::error::VisionError;
use super::image_utils::path_to_tensor;
use super::onnx::OnnxModel;
use super::preprocessing::{preprocess_resnet50, top1_index};

/// ImageNet class indices that are dog breeds
///
/// Indices 151 ("Chihuahua") through 268 ("Mexican hairless") in the standard
/// 1000-class ILSVRC-2012 label ordering used by the pretrained ResNet50
/// weights. Tied to that ordering: a classifier trained with a different
/// label list needs a different range.
pub const DOG_CLASS_INDICES: RangeInclusive<usize> = 151..=268;

/// Number of classes the ImageNet classifier emits
pub const IMAGENET_CLASSES: usize = 1000;

/// True iff an ImageNet top-1 index names a dog breed
pub fn is_dog_class(index: usize) -> bool {
    DOG_CLASS_INDICES.contains(&index)
}

/// Answers "is there a dog in this picture?"
#[cfg_attr(test, mockall::automock)]
pub trait DogDetector: Send + Sync {
    fn is_dog(&self, path: &Path) -> Result<bool, VisionError>;
}

/// ResNet50 (ImageNet weights) exported to ONNX, NHWC input `[1, 224, 224, 3]`
#[derive(Debug)]
pub struct ResNet50DogDetector {
    model: OnnxModel,
}

impl ResNet50DogDetector {
    pub fn load(model_path: &Path, intra_threads: usize) -> Result<Self> {
        Ok(Self {
            model: OnnxModel::load("resnet50", model_path, intra_threads)?,
        })
    }

    /// Top-1 ImageNet class index for the image at `path`
    pub fn predict_label(&self, path: &Path) -> Result<usize, VisionError> {
        let tensor = preprocess_resnet50(&path_to_tensor(path)?);
        let scores: Vec<f32> = self.model.run(tensor)?.iter().copied().collect();

        if scores.len() != IMAGENET_CLASSES {
            return Err(VisionError::inference(
                self.model.name(),
                format!("expected {} scores, got {}", IMAGENET_CLASSES, scores.len()),
            ));
        }

        let label = top1_index(&scores)
            .ok_or_else(|| VisionError::inference(self.model.name(), "no valid scores"))?;
        debug!("ResNet50 top-1 label for {}: {}", path.display(), label);
        Ok(label)
    }
}

impl DogDetector for ResNet50DogDetector {
    fn is_dog(&self, path: &Path) -> Result<bool, VisionError> {
        Ok(is_dog_class(self.predict_label(path)?))
    }
}
