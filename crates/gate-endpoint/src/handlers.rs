//! # Request Handlers
//!
//! Handlers for the greeting endpoint. The computation is deliberately
//! trivial: the interesting part of the demo is the paywall in front of it,
//! not the function behind it.

use axum::{extract::Query, response::IntoResponse, Json};
use serde::Deserialize;

/// Query parameters for the greeting route
#[derive(Debug, Deserialize)]
pub struct GreetParams {
    /// Name to greet; defaults to "World"
    #[serde(default)]
    pub name: Option<String>,
}

/// Greeting handler: `GET /?name=Foo` -> `Hello Foo`
pub async fn greet(Query(params): Query<GreetParams>) -> String {
    let name = params.name.as_deref().unwrap_or("World");
    format!("Hello {}", name)
}

/// Health check endpoint
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "gate-endpoint",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Minimal OpenAPI document for the greeting route.
///
/// The payments platform stores this URL when the service is registered so
/// consumers can discover the endpoint's shape.
pub async fn openapi() -> impl IntoResponse {
    Json(serde_json::json!({
        "openapi": "3.0.3",
        "info": {
            "title": "gate-endpoint",
            "version": env!("CARGO_PKG_VERSION")
        },
        "paths": {
            "/": {
                "get": {
                    "summary": "Greet the caller",
                    "parameters": [{
                        "name": "name",
                        "in": "query",
                        "required": false,
                        "schema": { "type": "string", "default": "World" }
                    }],
                    "responses": {
                        "200": {
                            "description": "Greeting",
                            "content": {
                                "text/plain": {
                                    "schema": { "type": "string" }
                                }
                            }
                        }
                    }
                }
            }
        }
    }))
}
