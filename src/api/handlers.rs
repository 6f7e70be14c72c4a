// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Route handlers for the upload page

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
    Json,
};
use axum_extra::extract::multipart::{Multipart, MultipartRejection};
use axum_extra::extract::CookieJar;
use serde::Serialize;
use tracing::{info, warn};

use super::errors::ApiError;
use super::flash;
use super::http_server::AppState;
use super::templates::{render_upload_page, static_upload_path};
use super::upload::{validate_filename, UploadRejection};
use crate::vision::VisionModelInfo;

/// Multipart form field that carries the image
pub const FILE_FIELD: &str = "file";

/// The `file` part of an upload form
struct FileField {
    filename: Option<String>,
    data: Vec<u8>,
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub models: Vec<VisionModelInfo>,
}

/// GET / - the upload form, with any messages flashed by a redirect
pub async fn upload_form(jar: CookieJar) -> impl IntoResponse {
    let (jar, messages) = flash::take(jar);
    (jar, Html(render_upload_page(&messages, None)))
}

/// POST / - validate, save and classify one uploaded image
///
/// Rejected uploads flash a message and redirect back to `/` without
/// touching the disk. Accepted uploads render the page with the composed
/// message and the saved image.
pub async fn upload_image(
    State(state): State<AppState>,
    jar: CookieJar,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Response, ApiError> {
    let field = match multipart {
        Ok(mut multipart) => read_file_field(&mut multipart).await?,
        Err(e) => {
            warn!("Upload without a multipart body: {}", e);
            None
        }
    };

    // A `file` part without a filename parameter is a plain form value, not a file
    let (filename, data) = match field {
        Some(FileField {
            filename: Some(filename),
            data,
        }) => match validate_filename(&filename) {
            Ok(filename) => (filename, data),
            Err(rejection) => return Ok(reject(jar, rejection)),
        },
        _ => return Ok(reject(jar, UploadRejection::MissingFilePart)),
    };

    let path = state.uploads.save(&filename, data).await?;
    info!("upload_image filename: {}", path.display());

    let classifiers = state.classifiers.clone();
    let image_path = path.clone();
    let classification = tokio::task::spawn_blocking(move || classifiers.classify(&image_path))
        .await
        .map_err(|e| ApiError::InternalError(format!("classification task failed: {}", e)))??;

    info!(
        "Classified {}: {:?}, breed {}",
        filename, classification.verdict, classification.breed
    );

    let (jar, mut messages) = flash::take(jar);
    messages.push(classification.message);

    Ok((jar, Html(render_upload_page(&messages, Some(&filename)))).into_response())
}

/// GET /display/:filename - permanent redirect to the stored upload
pub async fn display_image(Path(filename): Path<String>) -> Response {
    (
        StatusCode::MOVED_PERMANENTLY,
        [(header::LOCATION, static_upload_path(&filename))],
    )
        .into_response()
}

/// GET /health - liveness plus the models backing the classifiers
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        models: state.classifiers.list_models().to_vec(),
    })
}

fn reject(jar: CookieJar, rejection: UploadRejection) -> Response {
    warn!("Upload rejected: {}", rejection);
    (flash::push(jar, &rejection.to_string()), Redirect::to("/")).into_response()
}

/// Find the `file` part; other form fields are skipped
async fn read_file_field(multipart: &mut Multipart) -> Result<Option<FileField>, ApiError> {
    while let Some(field) = multipart.next_field().await.map_err(|e| ApiError::InvalidRequest {
        status: e.status(),
        message: e.body_text(),
    })? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let filename = field.file_name().map(str::to_string);
        let data = field.bytes().await.map_err(|e| ApiError::InvalidRequest {
            status: e.status(),
            message: e.body_text(),
        })?;

        return Ok(Some(FileField {
            filename,
            data: data.to_vec(),
        }));
    }

    Ok(None)
}
