mod config;
mod db;
mod errors;
mod generation;
mod models;
mod provider;
mod qr;
mod routes;
mod seeding;
mod state;
mod validation;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::create_pool;
use crate::generation::generator::ReviewGenerator;
use crate::generation::prompts::StyleCorpus;
use crate::provider::{GeminiClient, TextProvider};
use crate::routes::build_router;
use crate::seeding::ReviewCatalog;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Review Booster API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL (runs migrations)
    let db = create_pool(&config.database_url).await?;

    // Seed review catalog
    let catalog = ReviewCatalog::new(config.data_dir.clone());

    // Review generator. Missing credential is a normal condition: the
    // generator stays disabled and callers fall back to the catalog.
    let provider: Option<Arc<dyn TextProvider>> = match &config.gemini_api_key {
        Some(key) => {
            info!("Provider client initialized");
            Some(Arc::new(GeminiClient::new(key.clone())))
        }
        None => {
            info!("GEMINI_API_KEY not set — AI review generation disabled");
            None
        }
    };
    let corpus = StyleCorpus::load(&config.data_dir);
    let generator = Arc::new(ReviewGenerator::new(provider, corpus));

    // Build app state
    let state = AppState {
        db,
        generator,
        catalog,
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
