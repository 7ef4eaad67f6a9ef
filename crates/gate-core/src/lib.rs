//! # gate-core
//!
//! Core types and traits for the credit-gate paywall demo.
//!
//! This crate provides:
//! - `PaymentsGateway` trait for payments platform implementations
//! - `PlanDefinition` and `ServiceDefinition` for registering a paywalled service
//! - `AccessGrant` and `OrderReceipt` for the consumer side
//! - Publisher/consumer flows (`publish_paywalled_service`, `ensure_min_balance`, `resolve_access`)
//! - `GateError` for typed error handling
//!
//! ## Example
//!
//! ```rust,ignore
//! use gate_core::{flow, PlanConfig};
//!
//! // Creator: register the plan and the service behind it
//! let published = flow::publish_paywalled_service(
//!     &creator_gateway,
//!     &PlanConfig::demo_defaults(),
//!     &endpoint_url,
//!     &openapi_url,
//! ).await?;
//!
//! // Consumer: buy credits, then resolve the access grant
//! flow::ensure_min_balance(&consumer_gateway, &published.plan_did, &account, 2).await?;
//! let grant = flow::resolve_access(&consumer_gateway, &published.plan_did).await?;
//!
//! // Call grant.proxy_uri with grant.bearer_header()
//! ```

pub mod access;
pub mod asset;
pub mod error;
pub mod flow;
pub mod gateway;
pub mod plan;

// Re-exports for convenience
pub use access::{AccessGrant, OrderReceipt};
pub use asset::{AccountAddress, CreditBalance, Did};
pub use error::{GateError, GateResult};
pub use flow::{ensure_min_balance, publish_paywalled_service, resolve_access, PublishedService};
pub use gateway::{BoxedPaymentsGateway, PaymentsGateway};
pub use plan::{
    ChargeType, PlanConfig, PlanDefinition, ServiceDefinition, UpstreamAuth,
    DEFAULT_PAYMENT_TOKEN,
};
