//! # Payments Gateway Trait
//!
//! Seam between the demo flows and the payments platform. The creator and
//! consumer each hold their own gateway instance (one per API key); the
//! flows in [`crate::flow`] only ever see `&dyn PaymentsGateway`, so tests
//! can drive them with a scripted gateway and no network.

use crate::access::{AccessGrant, OrderReceipt};
use crate::asset::{AccountAddress, CreditBalance, Did};
use crate::error::GateResult;
use crate::plan::{PlanDefinition, ServiceDefinition};
use async_trait::async_trait;
use std::sync::Arc;

/// Core trait for payments platform implementations.
#[async_trait]
pub trait PaymentsGateway: Send + Sync {
    /// Register a credit plan. Creator credentials required.
    ///
    /// # Returns
    /// The DID the platform minted for the plan.
    async fn create_plan(&self, plan: &PlanDefinition) -> GateResult<Did>;

    /// Attach a payable service to a plan. Creator credentials required.
    ///
    /// # Arguments
    /// * `plan_did` - Plan the service bills against
    /// * `service` - Charge parameters
    /// * `endpoint_url` - Upstream endpoint the paywall proxies to
    /// * `openapi_url` - OpenAPI document describing the endpoint
    ///
    /// # Returns
    /// The DID the platform minted for the service.
    async fn register_service(
        &self,
        plan_did: &Did,
        service: &ServiceDefinition,
        endpoint_url: &str,
        openapi_url: &str,
    ) -> GateResult<Did>;

    /// Read an account's credit balance on a plan.
    async fn plan_balance(
        &self,
        plan_did: &Did,
        account: &AccountAddress,
    ) -> GateResult<CreditBalance>;

    /// Order credits on a plan with the caller's own funds.
    async fn order_plan(&self, plan_did: &Did) -> GateResult<OrderReceipt>;

    /// List the services attached to a plan.
    async fn services_for_plan(&self, plan_did: &Did) -> GateResult<Vec<Did>>;

    /// Fetch an access grant (bearer token + proxy URI) for a service.
    async fn access_grant(&self, service_did: &Did) -> GateResult<AccessGrant>;

    /// Get the gateway name (for logging).
    fn gateway_name(&self) -> &'static str;
}

/// Type alias for a shared gateway (dynamic dispatch)
pub type BoxedPaymentsGateway = Arc<dyn PaymentsGateway>;
