use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Json,
};
use tracing::info;

use crate::errors::AppError;
use crate::models::client::{ClientRow, ClientSummary, CreateClient, UpdateClient};
use crate::seeding::SeedSource;
use crate::state::AppState;
use crate::validation::{validate_create, validate_update};

/// GET /api/clients
pub async fn list_clients(
    State(state): State<AppState>,
) -> Result<Json<Vec<ClientSummary>>, AppError> {
    let clients = sqlx::query_as::<_, ClientSummary>(
        "SELECT client_id, client_name FROM clients ORDER BY client_name",
    )
    .fetch_all(&state.db)
    .await?;

    Ok(Json(clients))
}

/// POST /api/client
///
/// Multipart form: validated client fields plus an optional `reviewFile`
/// JSON upload and/or a `sourceReviewFile` catalog name. The Seed Resolver
/// decides which source wins (upload > named > default).
pub async fn create_client(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<ClientRow>), AppError> {
    let (req, upload) = collect_create_form(multipart).await?;
    validate_create(&req).map_err(AppError::Validation)?;

    let exists: bool =
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM clients WHERE client_id = $1)")
            .bind(&req.client_id)
            .fetch_one(&state.db)
            .await?;
    if exists {
        return Err(AppError::Conflict("Client ID already exists.".to_string()));
    }

    let reviews = state.catalog.resolve(SeedSource {
        upload,
        file_name: req.source_review_file.clone(),
    });

    let client = sqlx::query_as::<_, ClientRow>(
        r#"
        INSERT INTO clients
            (client_id, client_name, business_description, business_services,
             business_destination, google_review_link, logo_url,
             primary_color, secondary_color, reviews)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
        RETURNING *
        "#,
    )
    .bind(&req.client_id)
    .bind(&req.client_name)
    .bind(&req.business_description)
    .bind(&req.business_services)
    .bind(&req.business_destination)
    .bind(&req.google_review_link)
    .bind(&req.logo_url)
    .bind(&req.primary_color)
    .bind(&req.secondary_color)
    .bind(&reviews)
    .fetch_one(&state.db)
    .await?;

    info!(
        "Created client {} seeded with {} reviews",
        client.client_id,
        client.reviews.len()
    );

    Ok((StatusCode::CREATED, Json(client)))
}

/// GET /api/client/:client_id — details without the review list.
pub async fn get_client(
    State(state): State<AppState>,
    Path(client_id): Path<String>,
) -> Result<Json<ClientRow>, AppError> {
    let client = fetch_client(&state, &client_id).await?;
    Ok(Json(client))
}

/// PUT /api/client/:client_id
pub async fn update_client(
    State(state): State<AppState>,
    Path(client_id): Path<String>,
    Json(req): Json<UpdateClient>,
) -> Result<Json<ClientRow>, AppError> {
    validate_update(&req).map_err(AppError::Validation)?;

    let updated = sqlx::query_as::<_, ClientRow>(
        r#"
        UPDATE clients
        SET client_name = $2,
            business_description = $3,
            business_services = $4,
            business_destination = $5,
            google_review_link = $6,
            logo_url = $7,
            primary_color = $8,
            secondary_color = $9
        WHERE client_id = $1
        RETURNING *
        "#,
    )
    .bind(&client_id)
    .bind(&req.client_name)
    .bind(&req.business_description)
    .bind(&req.business_services)
    .bind(&req.business_destination)
    .bind(&req.google_review_link)
    .bind(&req.logo_url)
    .bind(&req.primary_color)
    .bind(&req.secondary_color)
    .fetch_optional(&state.db)
    .await?
    .ok_or_else(|| AppError::NotFound("Client not found.".to_string()))?;

    Ok(Json(updated))
}

/// DELETE /api/client/:client_id
pub async fn delete_client(
    State(state): State<AppState>,
    Path(client_id): Path<String>,
) -> Result<StatusCode, AppError> {
    let result = sqlx::query("DELETE FROM clients WHERE client_id = $1")
        .bind(&client_id)
        .execute(&state.db)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Client not found.".to_string()));
    }
    Ok(StatusCode::NO_CONTENT)
}

/// Fetches a full client row or 404s.
pub(crate) async fn fetch_client(state: &AppState, client_id: &str) -> Result<ClientRow, AppError> {
    sqlx::query_as::<_, ClientRow>("SELECT * FROM clients WHERE client_id = $1")
        .bind(client_id)
        .fetch_optional(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Client not found.".to_string()))
}

/// Drains the multipart form into a `CreateClient` plus the optional
/// uploaded seed file bytes. Unknown fields are ignored.
async fn collect_create_form(
    mut multipart: Multipart,
) -> Result<(CreateClient, Option<Vec<u8>>), AppError> {
    let mut req = CreateClient::with_defaults();
    let mut upload: Option<Vec<u8>> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        if name == "reviewFile" {
            let bytes = field
                .bytes()
                .await
                .map_err(|e| AppError::Validation(format!("Failed to read reviewFile: {e}")))?;
            if !bytes.is_empty() {
                upload = Some(bytes.to_vec());
            }
            continue;
        }

        let value = field
            .text()
            .await
            .map_err(|e| AppError::Validation(format!("Invalid field '{name}': {e}")))?;

        match name.as_str() {
            "clientId" => req.client_id = value,
            "clientName" => req.client_name = value,
            "businessDescription" => req.business_description = value,
            "businessServices" => req.business_services = value,
            "businessDestination" => req.business_destination = value,
            "googleReviewLink" => req.google_review_link = value,
            "logoUrl" if !value.is_empty() => req.logo_url = Some(value),
            "primaryColor" if !value.is_empty() => req.primary_color = value,
            "secondaryColor" if !value.is_empty() => req.secondary_color = value,
            "sourceReviewFile" if !value.is_empty() => req.source_review_file = Some(value),
            _ => {}
        }
    }

    Ok((req, upload))
}
