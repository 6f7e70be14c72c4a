// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Thin wrapper around an ONNX Runtime session with one input and one output

use anyhow::{Context, Result};
use ndarray::{ArrayD, Dimension};
use ort::execution_providers::CPUExecutionProvider;
use ort::session::builder::GraphOptimizationLevel;
use ort::session::Session;
use ort::value::Value;
use std::path::Path;
use std::sync::Mutex;
use tracing::{debug, info};

use super::error::VisionError;

/// A loaded ONNX model
///
/// `Session::run` needs `&mut`, so the session sits behind a mutex and
/// concurrent requests take turns.
pub struct OnnxModel {
    name: String,
    session: Mutex<Session>,
    input_name: String,
}

impl std::fmt::Debug for OnnxModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OnnxModel")
            .field("name", &self.name)
            .field("input_name", &self.input_name)
            .finish_non_exhaustive()
    }
}

impl OnnxModel {
    /// Load a model from disk on the CPU execution provider
    ///
    /// # Errors
    /// Returns error if the file is missing or ONNX Runtime rejects it.
    pub fn load(name: impl Into<String>, model_path: &Path, intra_threads: usize) -> Result<Self> {
        let name = name.into();

        if !model_path.exists() {
            anyhow::bail!("{} model not found: {}", name, model_path.display());
        }

        info!("Loading {} model from {}", name, model_path.display());

        let session = Session::builder()
            .context("Failed to create session builder")?
            .with_execution_providers([CPUExecutionProvider::default().build()])
            .context("Failed to set CPU execution provider")?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .context("Failed to set optimization level")?
            .with_intra_threads(intra_threads)
            .context("Failed to set intra threads")?
            .commit_from_file(model_path)
            .with_context(|| {
                format!("Failed to load {} model from {}", name, model_path.display())
            })?;

        let input_name = session
            .inputs
            .first()
            .map(|input| input.name.clone())
            .with_context(|| format!("{} model declares no inputs", name))?;

        if session.outputs.is_empty() {
            anyhow::bail!("{} model declares no outputs", name);
        }

        debug!("{} model input: {}", name, input_name);
        info!("✅ {} model loaded (CPU-only)", name);

        Ok(Self {
            name,
            session: Mutex::new(session),
            input_name,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Run the model on one tensor and return its first output, owned
    pub fn run<D: Dimension + 'static>(&self, input: ndarray::Array<f32, D>) -> Result<ArrayD<f32>, VisionError> {
        let input_value =
            Value::from_array(input).map_err(|e| VisionError::inference(&self.name, e))?;

        let mut session = self
            .session
            .lock()
            .map_err(|_| VisionError::inference(&self.name, "session lock poisoned"))?;

        let outputs = session
            .run(ort::inputs![self.input_name.as_str() => input_value])
            .map_err(|e| VisionError::inference(&self.name, e))?;

        let output = outputs[0]
            .try_extract_array::<f32>()
            .map_err(|e| VisionError::inference(&self.name, e))?;

        debug!("{} output shape: {:?}", self.name, output.shape());

        Ok(output.to_owned())
    }
}
