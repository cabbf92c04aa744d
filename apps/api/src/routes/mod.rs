pub mod clients;
pub mod health;
pub mod misc;
pub mod reviews;

use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Client API
        .route("/api/clients", get(clients::list_clients))
        .route("/api/client", post(clients::create_client))
        .route(
            "/api/client/:client_id",
            get(clients::get_client)
                .put(clients::update_client)
                .delete(clients::delete_client),
        )
        // Review API
        .route(
            "/api/client/:client_id/reviews",
            get(reviews::get_reviews)
                .post(reviews::add_review)
                .delete(reviews::delete_review),
        )
        .route(
            "/api/client/:client_id/random-review",
            get(reviews::random_review),
        )
        .route(
            "/api/client/:client_id/generate-review",
            post(reviews::generate_review),
        )
        // Misc
        .route("/api/data-files", get(misc::data_files))
        .route("/api/client/:client_id/generate-qr", post(misc::generate_qr))
        .with_state(state)
}
