//! # gate-endpoint
//!
//! The endpoint function paywalled by the credit-gate demo: a tiny axum
//! service with a deterministic greeting route. It runs as its own binary so
//! the demo driver can spawn it as an ephemeral child process.
//!
//! ## Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | GET | `/` | Greeting (`Hello {name}`) |
//! | GET | `/health` | Health check / readiness probe |
//! | GET | `/openapi.json` | OpenAPI document |

pub mod handlers;
pub mod routes;
pub mod state;

pub use routes::create_router;
pub use state::EndpointConfig;
