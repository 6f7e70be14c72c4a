// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Dog breed classification
//!
//! Two ONNX graphs run back to back:
//! - an Xception backbone (ImageNet weights, no top) producing the
//!   bottleneck feature map
//! - a small fine-tuned head (global average pooling + dense softmax) that
//!   scores every breed in the label table

use anyhow::Result;
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

use super::error::VisionError;
use super::image_utils::path_to_tensor;
use super::labels::LabelTable;
use super::onnx::OnnxModel;
use super::preprocessing::{preprocess_xception, top1_index};

/// Names the most likely dog breed for an image
#[cfg_attr(test, mockall::automock)]
pub trait BreedClassifier: Send + Sync {
    fn predict_breed(&self, path: &Path) -> Result<String, VisionError>;
}

#[derive(Debug)]
pub struct XceptionBreedClassifier {
    backbone: OnnxModel,
    head: OnnxModel,
    labels: Arc<LabelTable>,
}

impl XceptionBreedClassifier {
    pub fn load(
        backbone_path: &Path,
        head_path: &Path,
        labels: Arc<LabelTable>,
        intra_threads: usize,
    ) -> Result<Self> {
        let backbone = OnnxModel::load("xception-bottleneck", backbone_path, intra_threads)?;
        let head = OnnxModel::load("xception-breed-head", head_path, intra_threads)?;
        Ok(Self {
            backbone,
            head,
            labels,
        })
    }

    pub fn labels(&self) -> &LabelTable {
        &self.labels
    }

    /// Breed probabilities for the image at `path`, one per label
    pub fn predict_scores(&self, path: &Path) -> Result<Vec<f32>, VisionError> {
        let tensor = preprocess_xception(&path_to_tensor(path)?);
        let bottleneck = self.backbone.run(tensor)?;
        debug!("Bottleneck feature shape: {:?}", bottleneck.shape());

        let scores: Vec<f32> = self.head.run(bottleneck)?.iter().copied().collect();
        if scores.len() != self.labels.len() {
            return Err(VisionError::inference(
                self.head.name(),
                format!(
                    "head emits {} scores but label table has {} breeds",
                    scores.len(),
                    self.labels.len()
                ),
            ));
        }
        Ok(scores)
    }
}

impl BreedClassifier for XceptionBreedClassifier {
    fn predict_breed(&self, path: &Path) -> Result<String, VisionError> {
        let scores = self.predict_scores(path)?;
        let index = top1_index(&scores)
            .ok_or_else(|| VisionError::inference(self.head.name(), "no valid scores"))?;
        let breed = self.labels.get(index).ok_or(VisionError::UnknownLabel {
            index,
            len: self.labels.len(),
        })?;
        debug!("Predicted breed for {}: {} (class {})", path.display(), breed, index);
        Ok(breed.to_string())
    }
}
