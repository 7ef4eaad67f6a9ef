//! # Plan and Service Definitions
//!
//! Parameters the creator submits when registering a payment plan and the
//! payable service attached to it. Defaults mirror `config/plan.toml` and
//! price the plan at 0.01 USDC for 100 credits, with a nominal charge of
//! 2 credits per call.

use serde::{Deserialize, Serialize};

/// Arbitrum Sepolia USDC, the token plans are priced in by default
pub const DEFAULT_PAYMENT_TOKEN: &str = "0x75faf114eafb1BDbe2F0316DF893fd58CE46AA4d";

/// How the platform charges credits per call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChargeType {
    /// Flat credit charge per call
    Fixed,
    /// Charge varies per call within the min/max bounds
    Dynamic,
}

impl Default for ChargeType {
    fn default() -> Self {
        ChargeType::Fixed
    }
}

impl ChargeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChargeType::Fixed => "fixed",
            ChargeType::Dynamic => "dynamic",
        }
    }
}

/// Authentication the paywall proxy uses against the upstream endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UpstreamAuth {
    /// Upstream endpoint is open; only the proxy gates access
    None,
    /// Proxy forwards a bearer token to the upstream
    Bearer,
}

impl Default for UpstreamAuth {
    fn default() -> Self {
        UpstreamAuth::None
    }
}

impl UpstreamAuth {
    pub fn as_str(&self) -> &'static str {
        match self {
            UpstreamAuth::None => "none",
            UpstreamAuth::Bearer => "bearer",
        }
    }
}

/// A credit plan to register with the payments platform
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanDefinition {
    /// Display name
    pub name: String,

    /// Short description
    pub description: String,

    /// Price in the payment token's smallest unit (10_000 = 0.01 USDC)
    pub price: u64,

    /// ERC-20 token the price is denominated in
    pub token_address: String,

    /// Credits granted per purchase
    pub credits: u64,

    /// Plan duration in blocks; the platform exposes no "forever"
    pub duration: u64,

    /// Free-form tags
    #[serde(default)]
    pub tags: Vec<String>,
}

impl PlanDefinition {
    /// Create a plan priced in the default payment token
    pub fn new(name: impl Into<String>, price: u64, credits: u64) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            price,
            token_address: DEFAULT_PAYMENT_TOKEN.to_string(),
            credits,
            duration: 100_000,
            tags: Vec::new(),
        }
    }

    /// Builder: set description
    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = desc.into();
        self
    }

    /// Builder: set token address
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token_address = token.into();
        self
    }

    /// Builder: set duration
    pub fn with_duration(mut self, duration: u64) -> Self {
        self.duration = duration;
        self
    }
}

/// A payable service to attach to a plan
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceDefinition {
    /// Display name
    pub name: String,

    /// Short description
    pub description: String,

    /// How credits are charged per call
    #[serde(default)]
    pub charge_type: ChargeType,

    /// Upstream authentication mode
    #[serde(default)]
    pub upstream_auth: UpstreamAuth,

    /// Minimum credits a call may charge
    pub min_credits_per_call: u64,

    /// Maximum credits a call may charge
    pub max_credits_per_call: u64,

    /// Nominal credits charged per call
    pub credits_per_call: u64,
}

impl ServiceDefinition {
    /// Create a fixed-charge service definition
    pub fn fixed(name: impl Into<String>, credits_per_call: u64) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            charge_type: ChargeType::Fixed,
            upstream_auth: UpstreamAuth::None,
            min_credits_per_call: credits_per_call,
            max_credits_per_call: credits_per_call,
            credits_per_call,
        }
    }

    /// Builder: set description
    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = desc.into();
        self
    }

    /// Builder: set the chargeable credit range
    pub fn with_credit_range(mut self, min: u64, max: u64) -> Self {
        self.min_credits_per_call = min;
        self.max_credits_per_call = max;
        self
    }
}

/// Plan and service parameters for a demo run (loaded from `config/plan.toml`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanConfig {
    pub plan: PlanDefinition,
    pub service: ServiceDefinition,
}

impl PlanConfig {
    /// Built-in defaults: 0.01 USDC for 100 credits, 2 credits per call
    /// chargeable between 1 and 10.
    pub fn demo_defaults() -> Self {
        Self {
            plan: PlanDefinition::new("Test", 10_000, 100)
                .with_description("A test subscription"),
            service: ServiceDefinition::fixed("Test", 2)
                .with_description("A test service")
                .with_credit_range(1, 10),
        }
    }

    /// Load from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(toml_str)
    }
}

impl Default for PlanConfig {
    fn default() -> Self {
        Self::demo_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plan_builder() {
        let plan = PlanDefinition::new("Test", 10_000, 100)
            .with_description("A test subscription")
            .with_duration(50_000);

        assert_eq!(plan.price, 10_000);
        assert_eq!(plan.credits, 100);
        assert_eq!(plan.duration, 50_000);
        assert_eq!(plan.token_address, DEFAULT_PAYMENT_TOKEN);
    }

    #[test]
    fn test_fixed_service() {
        let service = ServiceDefinition::fixed("Test", 2).with_credit_range(1, 10);

        assert_eq!(service.charge_type, ChargeType::Fixed);
        assert_eq!(service.upstream_auth, UpstreamAuth::None);
        assert_eq!(service.credits_per_call, 2);
        assert_eq!(service.min_credits_per_call, 1);
        assert_eq!(service.max_credits_per_call, 10);
    }

    #[test]
    fn test_plan_config_from_toml() {
        let toml_str = r#"
[plan]
name = "Test"
description = "A test subscription"
price = 10000
token_address = "0x75faf114eafb1BDbe2F0316DF893fd58CE46AA4d"
credits = 100
duration = 100000
tags = []

[service]
name = "Test"
description = "A test service"
charge_type = "fixed"
upstream_auth = "none"
min_credits_per_call = 1
max_credits_per_call = 10
credits_per_call = 2
"#;
        let config = PlanConfig::from_toml(toml_str).unwrap();
        assert_eq!(config.plan.price, 10_000);
        assert_eq!(config.service.credits_per_call, 2);
        assert_eq!(config.service.charge_type, ChargeType::Fixed);
    }

    #[test]
    fn test_demo_defaults_match_documented_values() {
        let config = PlanConfig::demo_defaults();
        assert_eq!(config.plan.price, 10_000);
        assert_eq!(config.plan.credits, 100);
        assert_eq!(config.service.min_credits_per_call, 1);
        assert_eq!(config.service.max_credits_per_call, 10);
        assert_eq!(config.service.credits_per_call, 2);
    }
}
