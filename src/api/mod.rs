// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod errors;
pub mod flash;
pub mod handlers;
pub mod http_server;
pub mod templates;
pub mod upload;

pub use errors::ApiError;
pub use handlers::{display_image, health_handler, upload_form, upload_image, HealthResponse};
pub use http_server::{create_app, start_server, AppState, ServerConfig};
pub use upload::{allowed_file, secure_filename, UploadRejection, ALLOWED_EXTENSIONS};
