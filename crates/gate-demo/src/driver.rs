//! # Demo Driver
//!
//! The linear demo sequence: deploy the endpoint, publish it behind the
//! paywall, purchase credits as the consumer, call it through the proxy.
//! Each step runs exactly once and the first failure ends the run.

use crate::ephemeral::EphemeralEndpoint;
use crate::settings::DemoSettings;
use anyhow::Context;
use gate_core::{flow, AccessGrant, CreditBalance, GateError, PaymentsGateway, PlanConfig};
use gate_endpoint::EndpointConfig;
use gate_nevermined::NeverminedGateway;
use reqwest::Client;
use tokio::time::{sleep, Duration};
use tracing::{info, warn};

/// Paid calls made against the proxy: once with a name, once without
const INVOCATIONS: [Option<&str>; 2] = [Some("Foo"), None];

/// Credit burn is settled asynchronously after a paid call
const SETTLEMENT_DELAY: Duration = Duration::from_secs(10);

/// Run the whole demo sequence
pub async fn run(settings: DemoSettings) -> anyhow::Result<()> {
    let config = load_plan_config();
    let min_balance = INVOCATIONS.len() as u64 * config.service.credits_per_call;

    //
    // 0. Start the endpoint and wait for it to be reachable
    //
    let endpoint_config = EndpointConfig::from_env();
    let endpoint = EphemeralEndpoint::spawn(
        &EphemeralEndpoint::binary_from_env(),
        &endpoint_config.host,
        endpoint_config.port,
    )
    .await?;

    //
    // 1. Creator: register the plan and the service for the endpoint
    //
    let creator = NeverminedGateway::new(settings.creator.clone());
    let published = flow::publish_paywalled_service(
        &creator,
        &config,
        endpoint.url(),
        &endpoint.openapi_url(),
    )
    .await
    .context("Publishing the paywalled service failed")?;

    info!(
        "Published: plan={}, service={}",
        published.plan_did, published.service_did
    );

    //
    // 2. Consumer: buy credits, resolve the access grant, call the service
    //
    let consumer = NeverminedGateway::new(settings.consumer.clone());
    let mut balance = flow::ensure_min_balance(
        &consumer,
        &published.plan_did,
        &settings.consumer_address,
        min_balance,
    )
    .await
    .context("Purchasing credits failed")?;

    let grant = flow::resolve_access(&consumer, &published.plan_did)
        .await
        .context("Resolving the access grant failed")?;

    let http = Client::builder()
        .timeout(Duration::from_secs(30))
        .build()
        .expect("Failed to create HTTP client");

    info!("Calling the paywalled service at {}", grant.proxy_uri);
    for name in INVOCATIONS {
        let greeting = call_paywalled(&http, &grant, name).await?;
        let expected = expected_greeting(name);
        if greeting != expected {
            anyhow::bail!(
                "Unexpected response through the paywall: got {:?}, expected {:?}",
                greeting,
                expected
            );
        }
        info!("Service answered: {}", greeting);

        sleep(SETTLEMENT_DELAY).await;
        balance = verify_flat_charge(
            &consumer,
            &published,
            &settings,
            balance,
            config.service.credits_per_call,
        )
        .await?;
    }

    endpoint.shutdown().await?;
    info!("Service ran successfully!");
    Ok(())
}

/// Call the service through the paywall proxy with the grant's bearer token
async fn call_paywalled(
    http: &Client,
    grant: &AccessGrant,
    name: Option<&str>,
) -> anyhow::Result<String> {
    let mut request = http
        .get(&grant.proxy_uri)
        .header("Authorization", grant.bearer_header())
        .header("Content-Type", "application/json");
    if let Some(name) = name {
        request = request.query(&[("name", name)]);
    }

    let response = request
        .send()
        .await
        .map_err(|e| GateError::Network(e.to_string()))?;

    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| GateError::Network(e.to_string()))?;

    if !status.is_success() {
        return Err(GateError::AccessDenied {
            service: grant.service_did.to_string(),
            message: format!("HTTP {}: {}", status, body),
        }
        .into());
    }

    Ok(body)
}

/// Re-read the consumer's balance and check the call burned the flat charge
async fn verify_flat_charge(
    consumer: &NeverminedGateway,
    published: &flow::PublishedService,
    settings: &DemoSettings,
    before: CreditBalance,
    flat_charge: u64,
) -> anyhow::Result<CreditBalance> {
    let after = consumer
        .plan_balance(&published.plan_did, &settings.consumer_address)
        .await?;

    match before.spent_since(after) {
        Some(spent) if spent == flat_charge => {
            info!("Charged {} credits, {} left", spent, after);
            Ok(after)
        }
        Some(spent) => anyhow::bail!(
            "Unexpected charge: {} credits burned, expected the flat {} ({} -> {})",
            spent,
            flat_charge,
            before,
            after
        ),
        None => anyhow::bail!(
            "Balance increased after a paid call ({} -> {})",
            before,
            after
        ),
    }
}

/// What the endpoint answers for a given query
fn expected_greeting(name: Option<&str>) -> String {
    format!("Hello {}", name.unwrap_or("World"))
}

/// Plan parameters from `config/plan.toml`, falling back to the demo defaults
fn load_plan_config() -> PlanConfig {
    let config_paths = [
        "config/plan.toml",
        "../config/plan.toml",
        "../../config/plan.toml",
    ];

    for path in config_paths {
        if let Ok(content) = std::fs::read_to_string(path) {
            match PlanConfig::from_toml(&content) {
                Ok(config) => {
                    info!("Loaded plan config from {}", path);
                    return config;
                }
                Err(e) => {
                    warn!("Ignoring unparseable {}: {}", path, e);
                }
            }
        }
    }

    warn!("No plan config found, using demo defaults");
    PlanConfig::demo_defaults()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expected_greeting() {
        assert_eq!(expected_greeting(Some("Foo")), "Hello Foo");
        assert_eq!(expected_greeting(None), "Hello World");
    }

    #[test]
    fn test_min_balance_covers_both_invocations() {
        let config = PlanConfig::demo_defaults();
        let min_balance = INVOCATIONS.len() as u64 * config.service.credits_per_call;
        assert_eq!(min_balance, 4);
    }

    #[test]
    fn test_load_plan_config_always_yields_usable_parameters() {
        // With or without config/plan.toml on disk, the driver must end up
        // with a plan it can register.
        let config = load_plan_config();
        assert!(config.plan.price > 0);
        assert!(config.service.credits_per_call > 0);
        assert!(config.service.min_credits_per_call <= config.service.max_credits_per_call);
    }
}
