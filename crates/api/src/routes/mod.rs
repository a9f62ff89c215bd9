//! API routes.

pub mod demo_requests;
pub mod health;

use axum::{
    http::Uri,
    routing::{get, post},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::response::ApiError;
use crate::state::AppState;

/// Creates the API router.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(health::root_handler))
        .route("/health", get(health::health_handler))
        .route(
            "/api/v1/demo-requests",
            post(demo_requests::submit_handler).get(demo_requests::list_handler),
        )
        .fallback(not_found_handler)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Unknown routes still answer with the envelope.
async fn not_found_handler(uri: Uri) -> ApiError {
    ApiError::not_found(uri.path())
}
