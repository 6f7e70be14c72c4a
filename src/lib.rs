// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod api;
pub mod config;
pub mod pipeline;
pub mod storage;
pub mod vision;

pub use api::{create_app, AppState, ServerConfig};
pub use pipeline::{compose_message, Classification, Verdict};
pub use storage::{LocalUploadStore, MemoryUploadStore, UploadStore};
pub use vision::{ClassifierSet, VisionError, VisionModelConfig};
