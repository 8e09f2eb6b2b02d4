mod config;
mod drafts;
mod errors;
mod formatter;
mod generation_client;
mod models;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::generation_client::{GenerationClient, ReqwestTransport};
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Blog API v{}", env!("CARGO_PKG_VERSION"));

    if config.generation_api_url_defaulted {
        warn!(
            "BLOG_API_URL is not set; using default generation service at {}",
            config.generation_api_url
        );
    }

    // Initialize generation client
    let transport = ReqwestTransport::new(config.generation_timeout)?;
    let generation = GenerationClient::new(Arc::new(transport), &config.generation_api_url);
    info!(
        "Generation client initialized (endpoint: {}, timeout: {:?})",
        generation.endpoint(),
        config.generation_timeout
    );
    info!("Category scheme: {}", config.category_scheme);

    let state = AppState::new(generation, config.clone());

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
