//! # Nevermined Gateway
//!
//! Implementation of [`PaymentsGateway`] against the Nevermined payments
//! backend. One instance per role: the creator registers plans and services,
//! the consumer orders credits and fetches access grants. The backend mints
//! all identifiers; this client only moves them around.

use crate::config::NvmConfig;
use async_trait::async_trait;
use gate_core::{
    AccessGrant, AccountAddress, CreditBalance, Did, GateError, GateResult, OrderReceipt,
    PaymentsGateway, PlanDefinition, ServiceDefinition,
};
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument};

/// Nevermined payments gateway
pub struct NeverminedGateway {
    config: NvmConfig,
    client: Client,
}

impl NeverminedGateway {
    /// Create a new gateway for one role
    pub fn new(config: NvmConfig) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    /// Create from an environment variable holding this role's API key
    pub fn from_env(key_var: &str) -> GateResult<Self> {
        let config = NvmConfig::from_env(key_var)?;
        Ok(Self::new(config))
    }

    /// Base URL of the backend this gateway talks to
    pub fn base_url(&self) -> &str {
        &self.config.api_base_url
    }

    /// Send a request and decode the JSON response.
    ///
    /// Non-2xx responses are decoded as the backend's error envelope when
    /// possible, falling back to the raw body.
    async fn execute<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<&serde_json::Value>,
    ) -> GateResult<T> {
        let url = format!("{}{}", self.config.api_base_url, path);

        let mut request = self
            .client
            .request(method, &url)
            .header("Authorization", self.config.auth_header());
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request
            .send()
            .await
            .map_err(|e| GateError::Network(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| GateError::Network(e.to_string()))?;

        if !status.is_success() {
            error!("Nevermined API error: status={}, body={}", status, text);

            if let Ok(envelope) = serde_json::from_str::<NvmErrorResponse>(&text) {
                return Err(GateError::Gateway {
                    gateway: "nevermined".to_string(),
                    message: envelope.message(),
                });
            }

            return Err(GateError::Gateway {
                gateway: "nevermined".to_string(),
                message: format!("HTTP {}: {}", status, text),
            });
        }

        serde_json::from_str(&text).map_err(|e| {
            GateError::Serialization(format!("Failed to parse Nevermined response: {}", e))
        })
    }
}

#[async_trait]
impl PaymentsGateway for NeverminedGateway {
    #[instrument(skip(self, plan), fields(plan_name = %plan.name))]
    async fn create_plan(&self, plan: &PlanDefinition) -> GateResult<Did> {
        let body = serde_json::to_value(NvmPlanRequest::from(plan))
            .map_err(|e| GateError::Serialization(e.to_string()))?;

        debug!("Creating plan: price={}, credits={}", plan.price, plan.credits);

        let response: NvmDidResponse = self
            .execute(Method::POST, "/api/v1/payments/subscription", Some(&body))
            .await?;

        info!("Created plan: did={}", response.did);
        Did::new(response.did)
    }

    #[instrument(skip(self, service), fields(plan = %plan_did, service_name = %service.name))]
    async fn register_service(
        &self,
        plan_did: &Did,
        service: &ServiceDefinition,
        endpoint_url: &str,
        openapi_url: &str,
    ) -> GateResult<Did> {
        let request = NvmServiceRequest {
            subscription_did: plan_did.as_str().to_string(),
            name: service.name.clone(),
            description: service.description.clone(),
            service_charge_type: service.charge_type.as_str().to_string(),
            auth_type: service.upstream_auth.as_str().to_string(),
            endpoints: vec![NvmEndpoint {
                get: endpoint_url.to_string(),
            }],
            open_api_url: openapi_url.to_string(),
            min_credits_to_charge: service.min_credits_per_call,
            max_credits_to_charge: service.max_credits_per_call,
            amount_of_credits: service.credits_per_call,
        };
        let body = serde_json::to_value(request)
            .map_err(|e| GateError::Serialization(e.to_string()))?;

        let response: NvmDidResponse = self
            .execute(Method::POST, "/api/v1/payments/service", Some(&body))
            .await?;

        info!("Registered service: did={}", response.did);
        Did::new(response.did)
    }

    #[instrument(skip(self), fields(plan = %plan_did))]
    async fn plan_balance(
        &self,
        plan_did: &Did,
        account: &AccountAddress,
    ) -> GateResult<CreditBalance> {
        let body = serde_json::json!({
            "subscriptionDid": plan_did.as_str(),
            "accountAddress": account.as_str(),
        });

        let response: NvmBalanceResponse = self
            .execute(Method::POST, "/api/v1/payments/subscription/balance", Some(&body))
            .await?;

        let credits = parse_credit_amount(&response.balance)?;
        debug!("Balance for {}: {} credits", account, credits);
        Ok(CreditBalance(credits))
    }

    #[instrument(skip(self), fields(plan = %plan_did))]
    async fn order_plan(&self, plan_did: &Did) -> GateResult<OrderReceipt> {
        let body = serde_json::json!({
            "subscriptionDid": plan_did.as_str(),
        });

        let response: NvmOrderResponse = self
            .execute(Method::POST, "/api/v1/payments/subscription/order", Some(&body))
            .await?;

        info!(
            "Ordered plan {}: agreement={:?}",
            plan_did, response.agreement_id
        );

        let mut receipt = OrderReceipt::new(plan_did.clone(), response.success);
        if let Some(agreement_id) = response.agreement_id {
            receipt = receipt.with_agreement_id(agreement_id);
        }
        Ok(receipt)
    }

    #[instrument(skip(self), fields(plan = %plan_did))]
    async fn services_for_plan(&self, plan_did: &Did) -> GateResult<Vec<Did>> {
        let path = format!(
            "/api/v1/payments/subscription/services/{}",
            plan_did.as_str()
        );

        let dids: Vec<String> = self.execute(Method::GET, &path, None).await?;

        debug!("Plan {} has {} services", plan_did, dids.len());
        dids.into_iter().map(Did::new).collect()
    }

    #[instrument(skip(self), fields(service = %service_did))]
    async fn access_grant(&self, service_did: &Did) -> GateResult<AccessGrant> {
        let path = format!("/api/v1/payments/service/token/{}", service_did.as_str());

        let response: NvmTokenResponse = self.execute(Method::GET, &path, None).await?;

        if response.token.access_token.is_empty() {
            return Err(GateError::AccessDenied {
                service: service_did.to_string(),
                message: "Backend returned an empty access token".to_string(),
            });
        }

        info!(
            "Access grant issued for {}: proxy={}",
            service_did, response.token.nevermined_proxy_uri
        );

        Ok(AccessGrant::new(
            service_did.clone(),
            response.token.access_token,
            response.token.nevermined_proxy_uri,
        ))
    }

    fn gateway_name(&self) -> &'static str {
        "nevermined"
    }
}

/// The backend reports balances as either a JSON number or a decimal string
fn parse_credit_amount(value: &serde_json::Value) -> GateResult<u64> {
    match value {
        serde_json::Value::Number(n) => n.as_u64().ok_or_else(|| {
            GateError::Serialization(format!("Balance is not a u64: {}", n))
        }),
        serde_json::Value::String(s) => s.parse().map_err(|_| {
            GateError::Serialization(format!("Balance is not numeric: {}", s))
        }),
        other => Err(GateError::Serialization(format!(
            "Unexpected balance value: {}",
            other
        ))),
    }
}

// =============================================================================
// Nevermined API Types
// =============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct NvmPlanRequest {
    name: String,
    description: String,
    price: u64,
    token_address: String,
    amount_of_credits: u64,
    duration: u64,
    tags: Vec<String>,
}

impl From<&PlanDefinition> for NvmPlanRequest {
    fn from(plan: &PlanDefinition) -> Self {
        Self {
            name: plan.name.clone(),
            description: plan.description.clone(),
            price: plan.price,
            token_address: plan.token_address.clone(),
            amount_of_credits: plan.credits,
            duration: plan.duration,
            tags: plan.tags.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct NvmServiceRequest {
    subscription_did: String,
    name: String,
    description: String,
    service_charge_type: String,
    auth_type: String,
    endpoints: Vec<NvmEndpoint>,
    open_api_url: String,
    min_credits_to_charge: u64,
    max_credits_to_charge: u64,
    amount_of_credits: u64,
}

#[derive(Debug, Serialize)]
struct NvmEndpoint {
    get: String,
}

#[derive(Debug, Deserialize)]
struct NvmDidResponse {
    did: String,
}

#[derive(Debug, Deserialize)]
struct NvmBalanceResponse {
    balance: serde_json::Value,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NvmOrderResponse {
    #[serde(default = "default_success")]
    success: bool,
    #[serde(default)]
    agreement_id: Option<String>,
}

fn default_success() -> bool {
    true
}

#[derive(Debug, Deserialize)]
struct NvmTokenResponse {
    token: NvmToken,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NvmToken {
    access_token: String,
    nevermined_proxy_uri: String,
}

#[derive(Debug, Deserialize)]
struct NvmErrorResponse {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

impl NvmErrorResponse {
    fn message(self) -> String {
        self.message
            .or(self.error)
            .unwrap_or_else(|| "unknown error".to_string())
    }
}
