use std::sync::Arc;

use sqlx::PgPool;

use crate::config::Config;
use crate::generation::generator::ReviewGenerator;
use crate::seeding::ReviewCatalog;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    /// Review generator; holds no provider when GEMINI_API_KEY is unset,
    /// in which case every generation call yields the catalog fallback.
    pub generator: Arc<ReviewGenerator>,
    /// Read-only seed review catalog directory.
    pub catalog: ReviewCatalog,
    pub config: Config,
}
