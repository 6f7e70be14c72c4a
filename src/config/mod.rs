// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Command-line / environment configuration for the server binary

use clap::Parser;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use crate::api::ServerConfig;
use crate::vision::VisionModelConfig;

/// Dog breed classifier web app
#[derive(Parser, Debug, Clone)]
#[command(name = "dog-breed-app")]
#[command(version)]
#[command(about = "Upload a photo, get a dog breed", long_about = None)]
pub struct ServerArgs {
    /// Address to bind
    #[arg(long, env = "APP_HOST", default_value = "0.0.0.0")]
    pub host: IpAddr,

    /// Port to listen on
    #[arg(long, env = "APP_PORT", default_value_t = 3001)]
    pub port: u16,

    /// Directory served under /static; uploads are written to its uploads/ subdirectory
    #[arg(long, env = "STATIC_DIR", default_value = "static")]
    pub static_dir: PathBuf,

    /// Directory holding the model artifacts
    #[arg(long, env = "MODELS_DIR", default_value = "models")]
    pub models_dir: PathBuf,

    /// Largest accepted upload, in MiB
    #[arg(long, env = "MAX_UPLOAD_MB", default_value_t = 16)]
    pub max_upload_mb: usize,

    /// ONNX Runtime intra-op threads per model
    #[arg(long, env = "INTRA_THREADS", default_value_t = 4)]
    pub intra_threads: usize,
}

impl ServerArgs {
    pub fn server_config(&self) -> ServerConfig {
        ServerConfig {
            listen_addr: SocketAddr::new(self.host, self.port),
            static_dir: self.static_dir.clone(),
            max_upload_bytes: self.max_upload_mb.saturating_mul(1024 * 1024),
        }
    }

    pub fn model_config(&self) -> VisionModelConfig {
        VisionModelConfig::from_dir(&self.models_dir).with_intra_threads(self.intra_threads)
    }
}
