//! # Asset Identifiers
//!
//! Opaque handles minted by the payments platform: decentralized identifiers
//! for plans and services, wallet addresses, and credit balances. The demo
//! never interprets these beyond basic shape checks.

use crate::error::{GateError, GateResult};
use serde::{Deserialize, Serialize};

/// A decentralized identifier (`did:nv:...`) for a plan or service
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Did(String);

impl Did {
    /// Wrap a DID string, rejecting values without a `did:` scheme
    pub fn new(value: impl Into<String>) -> GateResult<Self> {
        let value = value.into();
        if !value.starts_with("did:") {
            return Err(GateError::InvalidRequest(format!(
                "Not a DID: {}",
                value
            )));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Did {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An EVM account address (`0x`-prefixed, 40 hex chars)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountAddress(String);

impl AccountAddress {
    pub fn new(value: impl Into<String>) -> GateResult<Self> {
        let value = value.into();
        let hex = value.strip_prefix("0x").ok_or_else(|| {
            GateError::InvalidRequest(format!("Address must be 0x-prefixed: {}", value))
        })?;
        if hex.len() != 40 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(GateError::InvalidRequest(format!(
                "Not a 20-byte hex address: {}",
                value
            )));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for AccountAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Credit balance held by a consumer on a plan
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CreditBalance(pub u64);

impl CreditBalance {
    pub fn credits(&self) -> u64 {
        self.0
    }

    /// Credits burned between this balance and a later reading
    pub fn spent_since(&self, later: CreditBalance) -> Option<u64> {
        self.0.checked_sub(later.0)
    }
}

impl std::fmt::Display for CreditBalance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} credits", self.0)
    }
}
