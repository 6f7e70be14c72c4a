// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Errors raised while decoding an upload or running a classifier on it

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum VisionError {
    #[error("Image not found: {}", .0.display())]
    ImageNotFound(PathBuf),

    #[error("Failed to read image {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Image data is empty")]
    EmptyData,

    #[error("Unsupported image format")]
    UnsupportedFormat,

    #[error("Failed to decode image: {0}")]
    Decode(String),

    #[error("Inference failed in {model}: {reason}")]
    Inference { model: String, reason: String },

    #[error("Label index {index} out of range (table has {len} labels)")]
    UnknownLabel { index: usize, len: usize },
}

impl VisionError {
    pub fn inference(model: impl Into<String>, reason: impl ToString) -> Self {
        VisionError::Inference {
            model: model.into(),
            reason: reason.to_string(),
        }
    }

    /// True when the upload itself could not be turned into pixels
    pub fn is_decode_error(&self) -> bool {
        matches!(
            self,
            VisionError::ImageNotFound(_)
                | VisionError::Io { .. }
                | VisionError::EmptyData
                | VisionError::UnsupportedFormat
                | VisionError::Decode(_)
        )
    }
}
