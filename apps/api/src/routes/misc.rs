use anyhow::Context;
use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::json;

use crate::errors::AppError;
use crate::qr::review_page_qr;
use crate::routes::clients::fetch_client;
use crate::state::AppState;

/// GET /api/data-files — seedable catalog file names.
pub async fn data_files(State(state): State<AppState>) -> Result<Json<Vec<String>>, AppError> {
    let files = state
        .catalog
        .list_files()
        .context("Failed to read the seed catalog directory")?;
    Ok(Json(files))
}

/// POST /api/client/:client_id/generate-qr
pub async fn generate_qr(
    State(state): State<AppState>,
    Path(client_id): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    // 404 rather than handing out QR codes for clients that don't exist.
    fetch_client(&state, &client_id).await?;

    let (data_url, link) = review_page_qr(&state.config.app_base_url, &client_id)?;
    Ok(Json(json!({ "qrDataUrl": data_url, "link": link })))
}
