//! # Credit-Gate Demo
//!
//! Publish an endpoint behind a paywall, then buy access and call it.
//!
//! ## Usage
//!
//! ```bash
//! # Set environment variables (or use a .env file)
//! export CREATOR_API_KEY=eyJ...
//! export CONSUMER_API_KEY=eyJ...
//! export CONSUMER_ADDRESS=0x...
//!
//! # Build the endpoint binary, then run the demo
//! credit-gate-demo
//! ```

use gate_demo::{driver, DemoSettings};
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

    print_banner();

    // Fail fast on missing credentials, before anything external is touched
    let settings = DemoSettings::from_env()?;
    info!("Environment: {}", settings.creator.environment);
    info!("Consumer address: {}", settings.consumer_address);

    driver::run(settings).await
}

fn print_banner() {
    println!(
        r#"
  Credit-Gate RS
  ━━━━━━━━━━━━━━
  Publish, paywall, purchase, call
  Version: {}

"#,
        env!("CARGO_PKG_VERSION")
    );
}
