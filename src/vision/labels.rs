// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Breed label table: class index -> breed name

use anyhow::{Context, Result};
use std::path::Path;

/// Ordered breed vocabulary of the breed classifier head
///
/// Loaded once at startup and shared read-only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelTable {
    labels: Vec<String>,
}

impl LabelTable {
    pub fn new(labels: Vec<String>) -> Self {
        Self { labels }
    }

    /// Parse one label per line
    ///
    /// Blank lines are skipped. Training-folder names such as
    /// `001.Affenpinscher` lose their ordinal prefix.
    pub fn parse(text: &str) -> Self {
        let labels = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| strip_ordinal(line).to_string())
            .collect();
        Self { labels }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read label table {}", path.display()))?;
        let table = Self::parse(&text);
        if table.is_empty() {
            anyhow::bail!("Label table {} has no labels", path.display());
        }
        Ok(table)
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.labels.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

fn strip_ordinal(label: &str) -> &str {
    match label.split_once('.') {
        Some((prefix, rest))
            if !prefix.is_empty() && !rest.is_empty() && prefix.chars().all(|c| c.is_ascii_digit()) =>
        {
            rest
        }
        _ => label,
    }
}
