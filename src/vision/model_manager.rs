// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Loads the three classifiers once at startup and hands them out

use anyhow::{Context, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

use super::breed::{BreedClassifier, XceptionBreedClassifier};
use super::dog::{DogDetector, ResNet50DogDetector};
use super::face::{CascadeFaceDetector, FaceDetector};
use super::labels::LabelTable;

/// Paths of every model artifact the service needs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisionModelConfig {
    /// SeetaFace cascade definition for the face detector
    pub face_model: PathBuf,
    /// ResNet50 ImageNet classifier (ONNX)
    pub resnet50_model: PathBuf,
    /// Xception feature extractor (ONNX)
    pub xception_backbone: PathBuf,
    /// Fine-tuned breed head (ONNX)
    pub breed_head: PathBuf,
    /// Breed names, one per line, in head output order
    pub dog_names: PathBuf,
    /// ONNX Runtime intra-op threads per session
    pub intra_threads: usize,
}

impl VisionModelConfig {
    /// Standard artifact file names inside `models_dir`
    pub fn from_dir(models_dir: impl AsRef<Path>) -> Self {
        let dir = models_dir.as_ref();
        Self {
            face_model: dir.join("seeta_fd_frontal_v1.0.bin"),
            resnet50_model: dir.join("resnet50.onnx"),
            xception_backbone: dir.join("xception_bottleneck.onnx"),
            breed_head: dir.join("xception_breed_head.onnx"),
            dog_names: dir.join("dog_names.txt"),
            intra_threads: 4,
        }
    }

    pub fn with_intra_threads(mut self, threads: usize) -> Self {
        self.intra_threads = threads.max(1);
        self
    }
}

impl Default for VisionModelConfig {
    fn default() -> Self {
        Self::from_dir("./models")
    }
}

/// Information about a loaded model, reported by `/health`
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct VisionModelInfo {
    pub name: String,
    pub model_type: String,
    pub available: bool,
}

impl VisionModelInfo {
    fn loaded(name: &str, model_type: &str) -> Self {
        Self {
            name: name.to_string(),
            model_type: model_type.to_string(),
            available: true,
        }
    }
}

/// The face detector, dog detector and breed classifier used per request
///
/// Built either from real model files with [`ClassifierSet::load`] or from
/// any trait implementations with [`ClassifierSet::new`].
#[derive(Clone)]
pub struct ClassifierSet {
    pub face: Arc<dyn FaceDetector>,
    pub dog: Arc<dyn DogDetector>,
    pub breed: Arc<dyn BreedClassifier>,
    models: Vec<VisionModelInfo>,
}

impl ClassifierSet {
    pub fn new(
        face: Arc<dyn FaceDetector>,
        dog: Arc<dyn DogDetector>,
        breed: Arc<dyn BreedClassifier>,
    ) -> Self {
        Self {
            face,
            dog,
            breed,
            models: Vec::new(),
        }
    }

    /// Load every model named in `config`
    ///
    /// Any missing or corrupt artifact is an error; the service must not
    /// start without all three classifiers.
    pub fn load(config: &VisionModelConfig) -> Result<Self> {
        let labels = Arc::new(LabelTable::load(&config.dog_names)?);
        info!("Loaded {} breed labels from {}", labels.len(), config.dog_names.display());

        let face = CascadeFaceDetector::load(&config.face_model)
            .context("Failed to initialize face detector")?;
        let dog = ResNet50DogDetector::load(&config.resnet50_model, config.intra_threads)
            .context("Failed to initialize dog detector")?;
        let breed = XceptionBreedClassifier::load(
            &config.xception_backbone,
            &config.breed_head,
            labels,
            config.intra_threads,
        )
        .context("Failed to initialize breed classifier")?;

        Ok(Self {
            face: Arc::new(face),
            dog: Arc::new(dog),
            breed: Arc::new(breed),
            models: vec![
                VisionModelInfo::loaded("seeta-face-cascade", "face"),
                VisionModelInfo::loaded("resnet50", "dog"),
                VisionModelInfo::loaded("xception", "breed"),
            ],
        })
    }

    /// Models backing this set; empty when built from caller-supplied parts
    pub fn list_models(&self) -> &[VisionModelInfo] {
        &self.models
    }
}

impl std::fmt::Debug for ClassifierSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClassifierSet")
            .field("models", &self.models)
            .finish_non_exhaustive()
    }
}
