// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Upload validation: which files are accepted and what they are saved as

use regex::Regex;
use std::sync::OnceLock;
use thiserror::Error;
use unicode_normalization::UnicodeNormalization;

/// File extensions accepted for upload, lowercase
pub const ALLOWED_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];

/// Why an upload was turned away; the message is shown to the user
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum UploadRejection {
    #[error("No file part")]
    MissingFilePart,
    #[error("No image selected for uploading")]
    EmptyFilename,
    #[error("Allowed image types are -> png, jpg, jpeg")]
    DisallowedType,
}

/// True iff the text after the last '.' is an allowed extension (any case)
pub fn allowed_file(filename: &str) -> bool {
    filename
        .rsplit_once('.')
        .map(|(_, ext)| {
            let ext = ext.to_ascii_lowercase();
            ALLOWED_EXTENSIONS.contains(&ext.as_str())
        })
        .unwrap_or(false)
}

fn unsafe_chars() -> &'static Regex {
    static UNSAFE: OnceLock<Regex> = OnceLock::new();
    UNSAFE.get_or_init(|| Regex::new(r"[^A-Za-z0-9_.-]").expect("static pattern"))
}

/// Reduce a client-supplied file name to something safe to store
///
/// Accented letters are folded to their ASCII base (NFKD) and any other
/// non-ASCII character is dropped. Path separators become spaces, runs of
/// whitespace become a single `_`, anything outside `[A-Za-z0-9_.-]` is
/// removed and leading/trailing dots and underscores are trimmed. The result
/// may be empty.
pub fn secure_filename(filename: &str) -> String {
    let ascii: String = filename
        .nfkd()
        .filter(char::is_ascii)
        .map(|c| if c == '/' || c == '\\' { ' ' } else { c })
        .collect();
    let joined = ascii.split_whitespace().collect::<Vec<_>>().join("_");
    unsafe_chars()
        .replace_all(&joined, "")
        .trim_matches(|c| c == '.' || c == '_')
        .to_string()
}

/// Check a submitted file name and return the name to save it under
pub fn validate_filename(filename: &str) -> Result<String, UploadRejection> {
    if filename.is_empty() {
        return Err(UploadRejection::EmptyFilename);
    }
    if !allowed_file(filename) {
        return Err(UploadRejection::DisallowedType);
    }
    let safe = secure_filename(filename);
    if safe.is_empty() {
        return Err(UploadRejection::EmptyFilename);
    }
    Ok(safe)
}
