//! # Ephemeral Endpoint Supervision
//!
//! Runs the `gate-endpoint` binary as a child process for the duration of
//! the demo and waits for it to become reachable before the paywall is
//! registered on top of it. The child is killed when the supervisor is
//! dropped, so a failed run does not leave a stray server behind.

use gate_core::{GateError, GateResult};
use reqwest::Client;
use std::process::Stdio;
use tokio::process::{Child, Command};
use tokio::time::{sleep, Duration};
use tracing::{debug, info};

/// Env var overriding the endpoint binary to spawn
pub const ENDPOINT_BIN_VAR: &str = "ENDPOINT_BIN";

/// Readiness probes before giving up
const MAX_PROBES: u32 = 5;

/// Delay between readiness probes
const PROBE_INTERVAL: Duration = Duration::from_secs(1);

/// A supervised child process serving the endpoint being paywalled
#[derive(Debug)]
pub struct EphemeralEndpoint {
    child: Child,
    url: String,
}

impl EphemeralEndpoint {
    /// Endpoint binary to spawn: `ENDPOINT_BIN` when set, otherwise
    /// `gate-endpoint` resolved on PATH.
    pub fn binary_from_env() -> String {
        std::env::var(ENDPOINT_BIN_VAR).unwrap_or_else(|_| "gate-endpoint".to_string())
    }

    /// Spawn the endpoint binary and wait until `/health` answers.
    ///
    /// Probes once per second, up to 5 attempts. A child that exits early or
    /// never answers fails the spawn; the process is killed before returning.
    pub async fn spawn(binary: &str, host: &str, port: u16) -> GateResult<Self> {
        let url = format!("http://{}:{}", host, port);

        info!("Starting ephemeral endpoint: {} on {}", binary, url);
        let mut child = Command::new(binary)
            .env("ENDPOINT_HOST", host)
            .env("ENDPOINT_PORT", port.to_string())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                GateError::Configuration(format!("Failed to spawn {}: {}", binary, e))
            })?;

        let probe = Client::builder()
            .timeout(Duration::from_secs(2))
            .build()
            .expect("Failed to create HTTP client");
        let health_url = format!("{}/health", url);

        for attempt in 1..=MAX_PROBES {
            if let Ok(Some(status)) = child.try_wait() {
                return Err(GateError::Configuration(format!(
                    "Endpoint process exited during startup: {}",
                    status
                )));
            }

            match probe.get(&health_url).send().await {
                Ok(response) if response.status().is_success() => {
                    info!("Endpoint ready after {} probe(s)", attempt);
                    return Ok(Self { child, url });
                }
                Ok(response) => {
                    debug!("Probe {}: HTTP {}", attempt, response.status());
                }
                Err(e) => {
                    debug!("Probe {}: {}", attempt, e);
                }
            }

            sleep(PROBE_INTERVAL).await;
        }

        let _ = child.start_kill();
        Err(GateError::EndpointUnavailable {
            url,
            attempts: MAX_PROBES,
        })
    }

    /// Base URL the endpoint serves on
    pub fn url(&self) -> &str {
        &self.url
    }

    /// OpenAPI document URL registered with the paywall
    pub fn openapi_url(&self) -> String {
        format!("{}/openapi.json", self.url)
    }

    /// Stop the child process and wait for it to exit
    pub async fn shutdown(mut self) -> GateResult<()> {
        debug!("Stopping ephemeral endpoint");
        self.child
            .kill()
            .await
            .map_err(|e| GateError::Configuration(format!("Failed to stop endpoint: {}", e)))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_spawn_fails_for_missing_binary() {
        let err = EphemeralEndpoint::spawn("/nonexistent/gate-endpoint", "127.0.0.1", 8722)
            .await
            .unwrap_err();

        assert!(matches!(err, GateError::Configuration(_)));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_times_out() {
        // `yes` starts fine but never serves HTTP, so every probe fails
        // and the supervisor gives up.
        let err = EphemeralEndpoint::spawn("yes", "127.0.0.1", 59722)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            GateError::EndpointUnavailable { attempts: 5, .. }
        ));
    }
}
