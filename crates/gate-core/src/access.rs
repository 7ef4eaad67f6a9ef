//! # Access Grants and Order Receipts
//!
//! Transient handles returned by the payments platform: the receipt for a
//! credit purchase and the grant that lets a consumer call the paywalled
//! endpoint through the platform's proxy.

use crate::asset::Did;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Receipt for ordering credits on a plan
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderReceipt {
    /// Local reference for this order (generated)
    pub reference: String,

    /// Plan the credits were ordered on
    pub plan_did: Did,

    /// Whether the platform accepted the order
    pub accepted: bool,

    /// Agreement identifier, when the platform returns one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agreement_id: Option<String>,

    /// Created timestamp
    pub created_at: DateTime<Utc>,
}

impl OrderReceipt {
    /// Create a receipt with a generated local reference
    pub fn new(plan_did: Did, accepted: bool) -> Self {
        Self {
            reference: Uuid::new_v4().to_string(),
            plan_did,
            accepted,
            agreement_id: None,
            created_at: Utc::now(),
        }
    }

    /// Builder: attach the platform's agreement id
    pub fn with_agreement_id(mut self, id: impl Into<String>) -> Self {
        self.agreement_id = Some(id.into());
        self
    }
}

/// Grant to call a paywalled service: bearer token plus the proxy to call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessGrant {
    /// Service the grant is for
    pub service_did: Did,

    /// JWT bearer token presented on each call
    pub access_token: String,

    /// Paywall proxy URI the call must go through
    pub proxy_uri: String,

    /// Issued timestamp
    pub issued_at: DateTime<Utc>,
}

impl AccessGrant {
    pub fn new(
        service_did: Did,
        access_token: impl Into<String>,
        proxy_uri: impl Into<String>,
    ) -> Self {
        Self {
            service_did,
            access_token: access_token.into(),
            proxy_uri: proxy_uri.into(),
            issued_at: Utc::now(),
        }
    }

    /// `Authorization` header value for calls through the proxy
    pub fn bearer_header(&self) -> String {
        format!("Bearer {}", self.access_token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn did() -> Did {
        Did::new("did:nv:aaaa1111").unwrap()
    }

    #[test]
    fn test_order_receipt_reference_is_unique() {
        let a = OrderReceipt::new(did(), true);
        let b = OrderReceipt::new(did(), true);
        assert_ne!(a.reference, b.reference);
        assert!(a.accepted);
        assert!(a.agreement_id.is_none());
    }

    #[test]
    fn test_bearer_header() {
        let grant = AccessGrant::new(did(), "eyJhbGciOi.test.token", "https://proxy.example/svc");
        assert_eq!(grant.bearer_header(), "Bearer eyJhbGciOi.test.token");
        assert_eq!(grant.proxy_uri, "https://proxy.example/svc");
    }
}
