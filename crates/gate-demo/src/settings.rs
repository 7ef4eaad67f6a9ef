//! # Demo Settings
//!
//! Credentials for the two roles in the demo run. Read once at startup;
//! a missing variable fails the run before any external call is made.

use gate_core::{AccountAddress, GateError, GateResult};
use gate_nevermined::NvmConfig;
use std::env;

/// Settings for one demo run
#[derive(Debug, Clone)]
pub struct DemoSettings {
    /// Creator role: registers the plan and the service
    pub creator: NvmConfig,

    /// Consumer role: orders credits and calls the service
    pub consumer: NvmConfig,

    /// Wallet address the consumer's credits are held under
    pub consumer_address: AccountAddress,
}

impl DemoSettings {
    /// Load settings from environment variables.
    ///
    /// Required env vars:
    /// - `CREATOR_API_KEY`
    /// - `CONSUMER_API_KEY`
    /// - `CONSUMER_ADDRESS`
    ///
    /// Optional: `NVM_ENVIRONMENT` (defaults to `appTesting`).
    pub fn from_env() -> GateResult<Self> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let creator = NvmConfig::from_env("CREATOR_API_KEY")?;
        let consumer = NvmConfig::from_env("CONSUMER_API_KEY")?;

        let address = env::var("CONSUMER_ADDRESS")
            .map_err(|_| GateError::Configuration("CONSUMER_ADDRESS not set".to_string()))?;
        let consumer_address = AccountAddress::new(address)?;

        Ok(Self {
            creator,
            consumer,
            consumer_address,
        })
    }
}
