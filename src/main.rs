// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::{Context, Result};
use clap::Parser;
use dog_breed_app::{
    api::{start_server, AppState},
    config::ServerArgs,
    storage::LocalUploadStore,
    vision::ClassifierSet,
};
use std::{env, sync::Arc};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    // Initialize tracing subscriber for logging
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info");
    }
    tracing_subscriber::fmt::init();

    let args = ServerArgs::parse();
    let server_config = args.server_config();
    let model_config = args.model_config();

    info!("🧠 Loading classifiers from {}", args.models_dir.display());
    let classifiers = tokio::task::spawn_blocking(move || ClassifierSet::load(&model_config))
        .await
        .context("Classifier loading task panicked")?
        .context("Failed to load classifiers")?;
    info!("✅ Classifiers ready");

    let uploads = LocalUploadStore::new(server_config.upload_dir())
        .await
        .context("Failed to prepare upload directory")?;

    let state = AppState::new(classifiers, Arc::new(uploads));
    start_server(state, server_config).await
}
