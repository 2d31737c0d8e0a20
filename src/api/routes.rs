//! API Routes
//!
//! Configures the Axum router with all match proxy endpoints.

use axum::{routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    encoded_handler, health_handler, matches_handler, root_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /` - Service description
/// - `GET /health` - Health status with cache counters (never key-gated)
/// - `GET /matches` - The proxied match listing (API key when configured)
/// - `GET /encoded` - The re-encoded match listing
///
/// # Middleware
/// - CORS: Allows any origin (configurable for production)
/// - Tracing: Logs all requests for debugging
pub fn create_router(state: AppState) -> Router {
    // Configure CORS middleware
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build router with all endpoints
    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .route("/matches", get(matches_handler))
        .route("/encoded", get(encoded_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
