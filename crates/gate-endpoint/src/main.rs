//! # gate-endpoint
//!
//! The greeting endpoint served behind the paywall.
//!
//! ## Usage
//!
//! ```bash
//! # Optional bind address (defaults shown)
//! export ENDPOINT_HOST=127.0.0.1
//! export ENDPOINT_PORT=8722
//!
//! gate-endpoint
//! ```

use gate_endpoint::{routes, EndpointConfig};
use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(Level::INFO.into())
                .from_env_lossy(),
        )
        .init();

    let config = EndpointConfig::from_env();
    let addr = config.socket_addr();

    let app = routes::create_router();

    info!("gate-endpoint starting on {}", config.base_url());
    info!("Greeting: GET {}/?name=Foo", config.base_url());
    info!("OpenAPI:  GET {}/openapi.json", config.base_url());

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
