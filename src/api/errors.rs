// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use std::fmt;
use tracing::error;

use super::templates::render_error_page;
use crate::storage::StorageError;
use crate::vision::VisionError;

/// Failures that end a request with an error page
///
/// Rejected uploads are not errors: they redirect back to the form.
#[derive(Debug, Clone)]
pub enum ApiError {
    InvalidRequest { status: StatusCode, message: String },
    DecodeFailed(String),
    InferenceFailed(String),
    StorageFailed(String),
    InternalError(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidRequest { status, .. } => *status,
            ApiError::DecodeFailed(_)
            | ApiError::InferenceFailed(_)
            | ApiError::StorageFailed(_)
            | ApiError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::InvalidRequest { message, .. } => write!(f, "Invalid request: {}", message),
            ApiError::DecodeFailed(msg) => write!(f, "Could not read image: {}", msg),
            ApiError::InferenceFailed(msg) => write!(f, "Classification failed: {}", msg),
            ApiError::StorageFailed(msg) => write!(f, "Could not save upload: {}", msg),
            ApiError::InternalError(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<VisionError> for ApiError {
    fn from(err: VisionError) -> Self {
        if err.is_decode_error() {
            ApiError::DecodeFailed(err.to_string())
        } else {
            ApiError::InferenceFailed(err.to_string())
        }
    }
}

impl From<StorageError> for ApiError {
    fn from(err: StorageError) -> Self {
        ApiError::StorageFailed(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!("{}", self);
        }
        (status, Html(render_error_page(status, &self.to_string()))).into_response()
    }
}
