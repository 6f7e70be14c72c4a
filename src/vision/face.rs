// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Human face detection
//!
//! Wraps the SeetaFace funnel-structured cascade from `rustface`: the
//! grayscale image is scanned with a sliding window over an image pyramid
//! and every window that survives all cascade stages counts as a face.

use anyhow::{Context, Result};
use rustface::{Detector, ImageData, Model};
use std::path::Path;
use tracing::{debug, info};

use super::error::VisionError;
use super::image_utils::load_grayscale;

/// Smallest face, in pixels, the detector will look for
const MIN_FACE_SIZE: u32 = 20;
/// Cascade score a window must reach to count as a face
const SCORE_THRESHOLD: f64 = 2.0;
/// Shrink factor between pyramid levels
const PYRAMID_SCALE_FACTOR: f32 = 0.8;
/// Sliding window stride, in pixels
const SLIDE_WINDOW_STEP: u32 = 4;

/// Answers "is there a person in this picture?"
#[cfg_attr(test, mockall::automock)]
pub trait FaceDetector: Send + Sync {
    /// True iff at least one face region is found in the image at `path`
    fn has_face(&self, path: &Path) -> Result<bool, VisionError>;
}

/// Cascade face detector backed by a bundled SeetaFace model file
///
/// `rustface` detectors are neither `Send` nor `Sync`, so only the parsed
/// cascade is shared and every call builds its own detector from it.
pub struct CascadeFaceDetector {
    model: Model,
}

impl std::fmt::Debug for CascadeFaceDetector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CascadeFaceDetector")
            .field("hierarchies", &self.model.get_hierarchy_count())
            .field("min_face_size", &MIN_FACE_SIZE)
            .field("score_threshold", &SCORE_THRESHOLD)
            .finish_non_exhaustive()
    }
}

impl CascadeFaceDetector {
    /// Load the cascade definition from `model_path`
    pub fn load(model_path: &Path) -> Result<Self> {
        if !model_path.exists() {
            anyhow::bail!("Face cascade model not found: {}", model_path.display());
        }

        info!("Loading face cascade from {}", model_path.display());

        let bytes = std::fs::read(model_path)
            .with_context(|| format!("Failed to read face cascade {}", model_path.display()))?;
        let detector = Self::from_bytes(&bytes)
            .with_context(|| format!("Failed to load face cascade from {}", model_path.display()))?;

        info!("✅ Face cascade loaded");
        Ok(detector)
    }

    /// Parse a cascade definition already in memory
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let model = rustface::read_model(bytes).context("Malformed face cascade")?;
        if model.get_hierarchy_count() == 0 {
            anyhow::bail!("Face cascade has no classifier hierarchies");
        }
        Ok(Self { model })
    }

    fn detector(&self) -> Box<dyn Detector> {
        let mut detector = rustface::create_detector_with_model(self.model.clone());
        detector.set_min_face_size(MIN_FACE_SIZE);
        detector.set_score_thresh(SCORE_THRESHOLD);
        detector.set_pyramid_scale_factor(PYRAMID_SCALE_FACTOR);
        detector.set_slide_window_step(SLIDE_WINDOW_STEP, SLIDE_WINDOW_STEP);
        detector
    }

    /// Number of face regions found in the image at `path`
    pub fn count_faces(&self, path: &Path) -> Result<usize, VisionError> {
        let gray = load_grayscale(path)?;
        let (width, height) = gray.dimensions();
        if width == 0 || height == 0 {
            return Err(VisionError::EmptyData);
        }
        let image = ImageData::new(gray.as_raw(), width, height);

        let faces = self.detector().detect(&image);

        debug!("Face cascade found {} region(s) in {}", faces.len(), path.display());
        Ok(faces.len())
    }
}

impl FaceDetector for CascadeFaceDetector {
    fn has_face(&self, path: &Path) -> Result<bool, VisionError> {
        Ok(self.count_faces(path)? > 0)
    }
}
