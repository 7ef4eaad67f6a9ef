//! # gate-nevermined
//!
//! Nevermined payments gateway for credit-gate-rs.
//!
//! This crate implements the [`gate_core::PaymentsGateway`] trait against the
//! Nevermined backend REST API. Each instance is bound to one role's API key:
//!
//! - **Creator** — registers plans and attaches payable services to them
//! - **Consumer** — orders credits, reads balances, fetches access grants
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use gate_nevermined::NeverminedGateway;
//! use gate_core::{PaymentsGateway, PlanConfig};
//!
//! // One gateway per role
//! let creator = NeverminedGateway::from_env("CREATOR_API_KEY")?;
//! let consumer = NeverminedGateway::from_env("CONSUMER_API_KEY")?;
//!
//! let plan_did = creator.create_plan(&PlanConfig::demo_defaults().plan).await?;
//! let receipt = consumer.order_plan(&plan_did).await?;
//! ```
//!
//! The deployment is selected with `NVM_ENVIRONMENT` (`appTesting`,
//! `appStaging`, `appArbitrum`); the default is `appTesting`, whose plans are
//! priced in testnet USDC.

pub mod client;
pub mod config;

// Re-exports
pub use client::NeverminedGateway;
pub use config::{NvmConfig, NvmEnvironment, ENVIRONMENT_VAR};
