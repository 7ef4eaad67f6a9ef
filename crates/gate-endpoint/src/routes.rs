//! # Routes
//!
//! Axum router for the greeting endpoint.

use crate::handlers;
use axum::{routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// Create the endpoint router
///
/// Routes:
/// - GET `/` - Greeting (the paywalled function)
/// - GET `/health` - Health check (used as the readiness probe)
/// - GET `/openapi.json` - OpenAPI document (registered with the paywall)
pub fn create_router() -> Router {
    // The paywall proxy calls from another origin
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(handlers::greet))
        .route("/health", get(handlers::health))
        .route("/openapi.json", get(handlers::openapi))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
