// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::Result;
use axum::{extract::DefaultBodyLimit, routing::get, Router};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use super::handlers::{display_image, health_handler, upload_form, upload_image};
use crate::storage::UploadStore;
use crate::vision::ClassifierSet;

/// Shared, read-only per-process state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub classifiers: Arc<ClassifierSet>,
    pub uploads: Arc<dyn UploadStore>,
}

impl AppState {
    pub fn new(classifiers: ClassifierSet, uploads: Arc<dyn UploadStore>) -> Self {
        Self {
            classifiers: Arc::new(classifiers),
            uploads,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub listen_addr: SocketAddr,
    /// Served under `/static`; uploads live in its `uploads` subdirectory
    pub static_dir: PathBuf,
    /// Largest accepted request body
    pub max_upload_bytes: usize,
}

impl ServerConfig {
    pub fn upload_dir(&self) -> PathBuf {
        self.static_dir.join("uploads")
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::from(([0, 0, 0, 0], 3001)),
            static_dir: PathBuf::from("static"),
            max_upload_bytes: 16 * 1024 * 1024,
        }
    }
}

pub fn create_app(state: AppState, config: &ServerConfig) -> Router {
    Router::new()
        .route("/", get(upload_form).post(upload_image))
        .route("/display/:filename", get(display_image))
        .route("/health", get(health_handler))
        .nest_service("/static", ServeDir::new(&config.static_dir))
        .layer(DefaultBodyLimit::max(config.max_upload_bytes))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve until Ctrl-C
pub async fn start_server(state: AppState, config: ServerConfig) -> Result<()> {
    let app = create_app(state, &config);
    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;

    tracing::info!("HTTP server listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("Shutdown signal received");
        })
        .await?;

    Ok(())
}
