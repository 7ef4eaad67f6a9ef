//! # Paywall Error Types
//!
//! Typed error handling for the credit-gate demo.
//! All gateway and flow operations return `Result<T, GateError>`.

use thiserror::Error;

/// Core error type for all paywall operations
#[derive(Debug, Error)]
pub enum GateError {
    /// Configuration errors (missing keys, invalid config)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Payments gateway rejected the call
    #[error("Gateway error [{gateway}]: {message}")]
    Gateway { gateway: String, message: String },

    /// Network/HTTP error communicating with a collaborator
    #[error("Network error: {0}")]
    Network(String),

    /// Ordering credits on a plan failed or did not settle
    #[error("Purchase declined: {reason}")]
    PurchaseDeclined { reason: String },

    /// Access token missing, invalid, or expired
    #[error("Access denied for service {service}: {message}")]
    AccessDenied { service: String, message: String },

    /// The ephemeral endpoint never became reachable
    #[error("Endpoint unavailable at {url} after {attempts} attempts")]
    EndpointUnavailable { url: String, attempts: u32 },

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl GateError {
    /// Returns true if this error is retryable
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            GateError::Network(_) | GateError::Gateway { .. } | GateError::EndpointUnavailable { .. }
        )
    }
}

/// Result type alias for paywall operations
pub type GateResult<T> = Result<T, GateError>;
