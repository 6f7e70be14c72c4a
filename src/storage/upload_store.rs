// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Where uploaded images are kept
//!
//! Files are never cleaned up. Saving a name that already exists replaces
//! the old file.

use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Invalid file name: {0}")]
    InvalidName(String),
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

#[async_trait]
pub trait UploadStore: Send + Sync {
    /// Persist `data` under `filename` and return the path classifiers should read
    async fn save(&self, filename: &str, data: Vec<u8>) -> Result<PathBuf, StorageError>;

    /// Names of every stored upload, sorted
    async fn list(&self) -> Result<Vec<String>, StorageError>;
}

/// Reject anything that is not a single plain path component
fn validate_name(filename: &str) -> Result<(), StorageError> {
    if filename.is_empty() {
        return Err(StorageError::InvalidName("Empty file name".to_string()));
    }

    if filename.contains('/') || filename.contains('\\') {
        return Err(StorageError::InvalidName(format!(
            "Path separators not allowed: {}",
            filename
        )));
    }

    if filename.starts_with('.') {
        return Err(StorageError::InvalidName(format!(
            "Hidden or relative names not allowed: {}",
            filename
        )));
    }

    Ok(())
}

/// Uploads stored as plain files in one directory
#[derive(Debug, Clone)]
pub struct LocalUploadStore {
    dir: PathBuf,
}

impl LocalUploadStore {
    /// Use `dir` for uploads, creating it if needed
    pub async fn new(dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let dir = dir.into();
        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|source| StorageError::Io {
                path: dir.display().to_string(),
                source,
            })?;
        info!("Upload directory: {}", dir.display());
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

#[async_trait]
impl UploadStore for LocalUploadStore {
    async fn save(&self, filename: &str, data: Vec<u8>) -> Result<PathBuf, StorageError> {
        validate_name(filename)?;

        let path = self.dir.join(filename);
        tokio::fs::write(&path, &data)
            .await
            .map_err(|source| StorageError::Io {
                path: path.display().to_string(),
                source,
            })?;

        debug!("Saved {} bytes to {}", data.len(), path.display());
        Ok(path)
    }

    async fn list(&self) -> Result<Vec<String>, StorageError> {
        let io_err = |source: std::io::Error| StorageError::Io {
            path: self.dir.display().to_string(),
            source,
        };

        let mut entries = tokio::fs::read_dir(&self.dir).await.map_err(io_err)?;
        let mut names = Vec::new();
        while let Some(entry) = entries.next_entry().await.map_err(io_err)? {
            if entry.file_type().await.map_err(io_err)?.is_file() {
                names.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        names.sort();
        Ok(names)
    }
}

/// Keeps uploads in memory; for tests with classifiers that never touch disk
#[derive(Debug, Clone, Default)]
pub struct MemoryUploadStore {
    files: Arc<RwLock<HashMap<String, Vec<u8>>>>,
}

impl MemoryUploadStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self, filename: &str) -> Option<Vec<u8>> {
        self.files.read().await.get(filename).cloned()
    }
}

#[async_trait]
impl UploadStore for MemoryUploadStore {
    async fn save(&self, filename: &str, data: Vec<u8>) -> Result<PathBuf, StorageError> {
        validate_name(filename)?;
        self.files.write().await.insert(filename.to_string(), data);
        Ok(PathBuf::from("memory").join(filename))
    }

    async fn list(&self) -> Result<Vec<String>, StorageError> {
        let mut names: Vec<String> = self.files.read().await.keys().cloned().collect();
        names.sort();
        Ok(names)
    }
}
