//! Router setup with all API routes and middleware.

use axum::http::{header, Method};
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Create the axum Router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    // The transport talks to this surface server-to-server; CORS stays
    // open for monitoring dashboards.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route("/health", get(handlers::health))
        .route("/message", post(handlers::message))
        .route("/events", get(handlers::events))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
