//! Statuscat Proxy - caching HTTP proxy for status code images
//!
//! Serves one image per HTTP status code from a local disk cache, fetching
//! misses from the upstream provider and persisting them. PUT and DELETE
//! manage cache entries directly.

mod config;
mod error;
mod proxy;
mod server;
mod validation;

use std::sync::Arc;

use clap::Parser;
use file_image_cache::ImageCache;
use tracing::{error, info};
use tracing_subscriber::{prelude::*, EnvFilter};

use crate::config::ProxyConfig;
use crate::error::Result;
use crate::proxy::ImageFetcher;
use crate::server::{start_server, ServerState, SharedState};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let env_filter = EnvFilter::from_default_env().add_directive("statuscat_proxy=info".parse()?);

    // Use JSON format for GCP Cloud Logging when LOG_FORMAT=json
    if std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false)
    {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_stackdriver::layer())
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }

    let config = ProxyConfig::parse();
    info!("Starting statuscat proxy...");
    info!("Host: {}", config.host);
    info!("Port: {}", config.port);
    info!("Cache dir: {:?}", config.cache);

    let cache = ImageCache::new(config.cache.clone());
    if let Err(e) = cache.init().await {
        error!(cache_dir = ?config.cache, error = %e, "Cannot create cache directory");
        std::process::exit(1);
    }

    let fetcher = ImageFetcher::new();
    let state: SharedState = Arc::new(ServerState::new(cache, fetcher));

    start_server(state, &config.host, config.port).await?;

    Ok(())
}
