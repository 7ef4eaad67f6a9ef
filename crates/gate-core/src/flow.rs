//! # Publisher and Consumer Flows
//!
//! The two halves of the demo sequence, written against the
//! [`PaymentsGateway`] seam so they can be exercised without a network.
//!
//! Publisher: register a plan, attach a payable service pointing at the
//! endpoint. Consumer: top up credits until the minimum balance is reached,
//! then resolve the plan's single service into an access grant.
//!
//! No step retries; the first failure propagates to the caller.

use crate::access::AccessGrant;
use crate::asset::{AccountAddress, CreditBalance, Did};
use crate::error::{GateError, GateResult};
use crate::gateway::PaymentsGateway;
use crate::plan::PlanConfig;
use tracing::{debug, info};

/// Handles minted when a service is published behind the paywall
#[derive(Debug, Clone)]
pub struct PublishedService {
    pub plan_did: Did,
    pub service_did: Did,
}

/// Register a plan and attach a payable service for the endpoint.
///
/// Creator-side flow: both calls use the creator's gateway. Fails on the
/// first rejected call.
pub async fn publish_paywalled_service(
    gateway: &dyn PaymentsGateway,
    config: &PlanConfig,
    endpoint_url: &str,
    openapi_url: &str,
) -> GateResult<PublishedService> {
    info!(gateway = gateway.gateway_name(), "Creating plan");
    let plan_did = gateway.create_plan(&config.plan).await?;
    debug!(%plan_did, "Plan registered");

    info!(%plan_did, endpoint_url, "Registering service");
    let service_did = gateway
        .register_service(&plan_did, &config.service, endpoint_url, openapi_url)
        .await?;
    debug!(%service_did, "Service registered");

    Ok(PublishedService {
        plan_did,
        service_did,
    })
}

/// Top up the consumer's credit balance until it reaches `min_credits`.
///
/// Reads the balance, and while it is short, orders the plan and re-reads.
/// An order that is rejected, or that does not increase the balance, fails
/// the flow: there is no point invoking the endpoint without credits.
pub async fn ensure_min_balance(
    gateway: &dyn PaymentsGateway,
    plan_did: &Did,
    account: &AccountAddress,
    min_credits: u64,
) -> GateResult<CreditBalance> {
    let mut balance = gateway.plan_balance(plan_did, account).await?;
    info!(%balance, min_credits, "Initial credit balance");

    while balance.credits() < min_credits {
        info!(%plan_did, "Topping up");
        let receipt = gateway.order_plan(plan_did).await?;
        if !receipt.accepted {
            return Err(GateError::PurchaseDeclined {
                reason: format!("Order {} rejected by platform", receipt.reference),
            });
        }

        let new_balance = gateway.plan_balance(plan_did, account).await?;
        if new_balance <= balance {
            return Err(GateError::PurchaseDeclined {
                reason: format!(
                    "Order {} accepted but balance did not increase ({} -> {})",
                    receipt.reference, balance, new_balance
                ),
            });
        }
        balance = new_balance;
    }

    Ok(balance)
}

/// Resolve a plan's service into an access grant.
///
/// The demo publishes exactly one service per plan; zero or several attached
/// services means the run is talking to the wrong plan.
pub async fn resolve_access(
    gateway: &dyn PaymentsGateway,
    plan_did: &Did,
) -> GateResult<AccessGrant> {
    let services = gateway.services_for_plan(plan_did).await?;
    if services.len() != 1 {
        return Err(GateError::InvalidRequest(format!(
            "Expected 1 service on plan {}, got {}",
            plan_did,
            services.len()
        )));
    }

    let service_did = &services[0];
    debug!(%service_did, "Fetching access grant");
    gateway.access_grant(service_did).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::access::OrderReceipt;
    use crate::plan::{PlanDefinition, ServiceDefinition};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// Scripted gateway: balances are served in order, orders can be made
    /// to fail, and every call is counted.
    struct ScriptedGateway {
        balances: Mutex<Vec<u64>>,
        services: Vec<Did>,
        decline_orders: bool,
        orders: AtomicUsize,
        grants: AtomicUsize,
    }

    impl ScriptedGateway {
        fn new(balances: Vec<u64>, services: Vec<Did>) -> Self {
            Self {
                balances: Mutex::new(balances),
                services,
                decline_orders: false,
                orders: AtomicUsize::new(0),
                grants: AtomicUsize::new(0),
            }
        }

        fn declining(mut self) -> Self {
            self.decline_orders = true;
            self
        }
    }

    #[async_trait]
    impl PaymentsGateway for ScriptedGateway {
        async fn create_plan(&self, _plan: &PlanDefinition) -> GateResult<Did> {
            Did::new("did:nv:plan0001")
        }

        async fn register_service(
            &self,
            plan_did: &Did,
            _service: &ServiceDefinition,
            _endpoint_url: &str,
            _openapi_url: &str,
        ) -> GateResult<Did> {
            assert_eq!(plan_did.as_str(), "did:nv:plan0001");
            Did::new("did:nv:svc0001")
        }

        async fn plan_balance(
            &self,
            _plan_did: &Did,
            _account: &AccountAddress,
        ) -> GateResult<CreditBalance> {
            let mut balances = self.balances.lock().unwrap();
            if balances.len() > 1 {
                Ok(CreditBalance(balances.remove(0)))
            } else {
                Ok(CreditBalance(balances[0]))
            }
        }

        async fn order_plan(&self, plan_did: &Did) -> GateResult<OrderReceipt> {
            self.orders.fetch_add(1, Ordering::SeqCst);
            if self.decline_orders {
                return Err(GateError::PurchaseDeclined {
                    reason: "insufficient funds".into(),
                });
            }
            Ok(OrderReceipt::new(plan_did.clone(), true))
        }

        async fn services_for_plan(&self, _plan_did: &Did) -> GateResult<Vec<Did>> {
            Ok(self.services.clone())
        }

        async fn access_grant(&self, service_did: &Did) -> GateResult<AccessGrant> {
            self.grants.fetch_add(1, Ordering::SeqCst);
            Ok(AccessGrant::new(
                service_did.clone(),
                "jwt-token",
                "https://proxy.test/svc",
            ))
        }

        fn gateway_name(&self) -> &'static str {
            "scripted"
        }
    }

    fn plan_did() -> Did {
        Did::new("did:nv:plan0001").unwrap()
    }

    fn account() -> AccountAddress {
        AccountAddress::new("0x75faf114eafb1BDbe2F0316DF893fd58CE46AA4d").unwrap()
    }

    #[tokio::test]
    async fn test_publish_returns_both_dids() {
        let gateway = ScriptedGateway::new(vec![0], vec![]);
        let published =
            publish_paywalled_service(&gateway, &PlanConfig::demo_defaults(), "http://e", "http://o")
                .await
                .unwrap();

        assert_eq!(published.plan_did.as_str(), "did:nv:plan0001");
        assert_eq!(published.service_did.as_str(), "did:nv:svc0001");
    }

    #[tokio::test]
    async fn test_sufficient_balance_orders_nothing() {
        let gateway = ScriptedGateway::new(vec![5], vec![]);
        let balance = ensure_min_balance(&gateway, &plan_did(), &account(), 2)
            .await
            .unwrap();

        assert_eq!(balance.credits(), 5);
        assert_eq!(gateway.orders.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_top_up_loop_orders_until_minimum() {
        // 0 -> order -> 1 -> order -> 2
        let gateway = ScriptedGateway::new(vec![0, 1, 2], vec![]);
        let balance = ensure_min_balance(&gateway, &plan_did(), &account(), 2)
            .await
            .unwrap();

        assert_eq!(balance.credits(), 2);
        assert_eq!(gateway.orders.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_declined_order_fails_flow() {
        let gateway = ScriptedGateway::new(vec![0], vec![]).declining();
        let err = ensure_min_balance(&gateway, &plan_did(), &account(), 2)
            .await
            .unwrap_err();

        assert!(matches!(err, GateError::PurchaseDeclined { .. }));
    }

    #[tokio::test]
    async fn test_stale_balance_after_order_fails_flow() {
        // Order accepted but the balance never moves
        let gateway = ScriptedGateway::new(vec![0, 0], vec![]);
        let err = ensure_min_balance(&gateway, &plan_did(), &account(), 2)
            .await
            .unwrap_err();

        assert!(matches!(err, GateError::PurchaseDeclined { .. }));
    }

    #[tokio::test]
    async fn test_resolve_access_requires_exactly_one_service() {
        let none = ScriptedGateway::new(vec![0], vec![]);
        assert!(resolve_access(&none, &plan_did()).await.is_err());
        assert_eq!(none.grants.load(Ordering::SeqCst), 0);

        let two = ScriptedGateway::new(
            vec![0],
            vec![Did::new("did:nv:a").unwrap(), Did::new("did:nv:b").unwrap()],
        );
        assert!(resolve_access(&two, &plan_did()).await.is_err());
        assert_eq!(two.grants.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_resolve_access_fetches_grant_for_single_service() {
        let gateway = ScriptedGateway::new(vec![0], vec![Did::new("did:nv:svc0001").unwrap()]);
        let grant = resolve_access(&gateway, &plan_did()).await.unwrap();

        assert_eq!(grant.service_did.as_str(), "did:nv:svc0001");
        assert_eq!(grant.proxy_uri, "https://proxy.test/svc");
        assert_eq!(gateway.grants.load(Ordering::SeqCst), 1);
    }
}
