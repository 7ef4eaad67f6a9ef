//! # Nevermined Configuration
//!
//! Per-role configuration for the Nevermined backend. The demo builds two
//! of these: one from the creator's API key and one from the consumer's.
//! All secrets are loaded from environment variables.

use gate_core::{GateError, GateResult};
use std::env;
use std::str::FromStr;

/// Environment variable selecting the Nevermined deployment
pub const ENVIRONMENT_VAR: &str = "NVM_ENVIRONMENT";

/// Nevermined deployment to talk to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NvmEnvironment {
    /// App testing deployment (testnet assets)
    #[default]
    AppTesting,
    /// App staging deployment
    AppStaging,
    /// Production deployment on Arbitrum
    AppArbitrum,
}

impl NvmEnvironment {
    /// Backend base URL for this deployment
    pub fn base_url(&self) -> &'static str {
        match self {
            NvmEnvironment::AppTesting => "https://one-backend.testing.nevermined.app",
            NvmEnvironment::AppStaging => "https://one-backend.staging.nevermined.app",
            NvmEnvironment::AppArbitrum => "https://one-backend.arbitrum.nevermined.app",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            NvmEnvironment::AppTesting => "appTesting",
            NvmEnvironment::AppStaging => "appStaging",
            NvmEnvironment::AppArbitrum => "appArbitrum",
        }
    }
}

impl FromStr for NvmEnvironment {
    type Err = GateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "appTesting" => Ok(NvmEnvironment::AppTesting),
            "appStaging" => Ok(NvmEnvironment::AppStaging),
            "appArbitrum" => Ok(NvmEnvironment::AppArbitrum),
            other => Err(GateError::Configuration(format!(
                "Unknown Nevermined environment: {}",
                other
            ))),
        }
    }
}

impl std::fmt::Display for NvmEnvironment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Nevermined API configuration for one role
#[derive(Debug, Clone)]
pub struct NvmConfig {
    /// API key (a JWT issued by the Nevermined app)
    pub api_key: String,

    /// Deployment the key belongs to
    pub environment: NvmEnvironment,

    /// API base URL (for testing/mocking)
    pub api_base_url: String,
}

impl NvmConfig {
    /// Load configuration from environment variables.
    ///
    /// `key_var` names the variable holding this role's API key
    /// (`CREATOR_API_KEY` or `CONSUMER_API_KEY`). The deployment comes from
    /// `NVM_ENVIRONMENT` and defaults to `appTesting`.
    pub fn from_env(key_var: &str) -> GateResult<Self> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let api_key = env::var(key_var)
            .map_err(|_| GateError::Configuration(format!("{} not set", key_var)))?;

        let environment = match env::var(ENVIRONMENT_VAR) {
            Ok(value) => value.parse()?,
            Err(_) => NvmEnvironment::default(),
        };

        Self::new(api_key, environment).validated()
    }

    /// Create config with explicit values (for testing)
    pub fn new(api_key: impl Into<String>, environment: NvmEnvironment) -> Self {
        Self {
            api_key: api_key.into(),
            environment,
            api_base_url: environment.base_url().to_string(),
        }
    }

    fn validated(self) -> GateResult<Self> {
        // Nevermined API keys are JWTs
        if !self.api_key.starts_with("eyJ") {
            return Err(GateError::Configuration(
                "Nevermined API key must be a JWT (starts with eyJ)".to_string(),
            ));
        }
        Ok(self)
    }

    /// Get authorization header value
    pub fn auth_header(&self) -> String {
        format!("Bearer {}", self.api_key)
    }

    /// Builder: set custom API base URL (for testing)
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }
}
