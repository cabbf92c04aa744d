use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use rand::Rng;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;

use crate::errors::AppError;
use crate::generation::prompts::GenerationContext;
use crate::routes::clients::fetch_client;
use crate::state::AppState;
use crate::validation::validate_review;

#[derive(Debug, Deserialize)]
pub struct ReviewBody {
    pub review: String,
}

#[derive(Debug, Serialize)]
pub struct GeneratedReviewResponse {
    pub review: String,
    /// "generated" when the AI produced the text, "catalog" when the
    /// client's stored reviews were drawn from instead.
    pub source: &'static str,
}

/// GET /api/client/:client_id/reviews
pub async fn get_reviews(
    State(state): State<AppState>,
    Path(client_id): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    let client = fetch_client(&state, &client_id).await?;
    Ok(Json(json!({ "reviews": client.reviews })))
}

/// GET /api/client/:client_id/random-review
pub async fn random_review(
    State(state): State<AppState>,
    Path(client_id): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    let client = fetch_client(&state, &client_id).await?;
    let review = pick_random(&client.reviews).ok_or_else(|| {
        AppError::NotFound("Client not found or has no reviews.".to_string())
    })?;
    Ok(Json(json!({ "review": review })))
}

/// POST /api/client/:client_id/reviews — prepend one review.
pub async fn add_review(
    State(state): State<AppState>,
    Path(client_id): Path<String>,
    Json(body): Json<ReviewBody>,
) -> Result<(StatusCode, Json<serde_json::Value>), AppError> {
    validate_review(&body.review).map_err(AppError::Validation)?;

    let result = sqlx::query(
        "UPDATE clients SET reviews = array_prepend($2, reviews) WHERE client_id = $1",
    )
    .bind(&client_id)
    .bind(&body.review)
    .execute(&state.db)
    .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Client not found.".to_string()));
    }
    Ok((StatusCode::CREATED, Json(json!({ "review": body.review }))))
}

/// DELETE /api/client/:client_id/reviews — remove a review by exact text.
pub async fn delete_review(
    State(state): State<AppState>,
    Path(client_id): Path<String>,
    Json(body): Json<ReviewBody>,
) -> Result<Json<serde_json::Value>, AppError> {
    if body.review.is_empty() {
        return Err(AppError::Validation("Review text is required.".to_string()));
    }

    let result =
        sqlx::query("UPDATE clients SET reviews = array_remove(reviews, $2) WHERE client_id = $1")
            .bind(&client_id)
            .bind(&body.review)
            .execute(&state.db)
            .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Client not found.".to_string()));
    }
    Ok(Json(json!({ "message": "Review deleted." })))
}

/// POST /api/client/:client_id/generate-review
///
/// Tries the AI generator; a generated review is prepended to the client's
/// stored list and returned. When the generator yields nothing (no
/// credential, or all models failed) one of the stored reviews is returned
/// instead, unpersisted.
pub async fn generate_review(
    State(state): State<AppState>,
    Path(client_id): Path<String>,
) -> Result<Json<GeneratedReviewResponse>, AppError> {
    let client = fetch_client(&state, &client_id).await?;

    let ctx = GenerationContext {
        client_name: client.client_name.clone(),
        description: non_empty(&client.business_description),
        services: non_empty(&client.business_services),
        destination: non_empty(&client.business_destination),
    };

    if let Some(review) = state.generator.generate(&ctx).await {
        sqlx::query("UPDATE clients SET reviews = array_prepend($2, reviews) WHERE client_id = $1")
            .bind(&client_id)
            .bind(&review)
            .execute(&state.db)
            .await?;
        info!("Stored generated review for client {client_id}");
        return Ok(Json(GeneratedReviewResponse {
            review,
            source: "generated",
        }));
    }

    let review = pick_random(&client.reviews).ok_or_else(|| {
        AppError::NotFound("No AI text available and client has no reviews.".to_string())
    })?;
    Ok(Json(GeneratedReviewResponse {
        review,
        source: "catalog",
    }))
}

fn pick_random(reviews: &[String]) -> Option<String> {
    if reviews.is_empty() {
        return None;
    }
    let index = rand::thread_rng().gen_range(0..reviews.len());
    Some(reviews[index].clone())
}

fn non_empty(field: &str) -> Option<String> {
    let trimmed = field.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pick_random_returns_none_for_empty_list() {
        assert_eq!(pick_random(&[]), None);
    }

    #[test]
    fn pick_random_returns_a_member_of_the_list() {
        let reviews = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        for _ in 0..50 {
            let picked = pick_random(&reviews).unwrap();
            assert!(reviews.contains(&picked));
        }
    }

    #[test]
    fn non_empty_trims_and_filters_blank_fields() {
        assert_eq!(non_empty("  "), None);
        assert_eq!(non_empty(" spa services "), Some("spa services".to_string()));
    }
}
