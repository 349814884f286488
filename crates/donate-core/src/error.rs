//! # Donation Error Types
//!
//! Typed error handling for the donation gateway.
//! All provider operations return `Result<T, DonationError>`.

use thiserror::Error;

/// Core error type for all gateway operations
#[derive(Debug, Error)]
pub enum DonationError {
    /// Configuration errors (missing keys, invalid config)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Plan not found or not fetchable from the provider
    #[error("Plan not found: {plan_id}")]
    PlanNotFound { plan_id: String },

    /// Payment not found at the provider
    #[error("Payment not found: {payment_id}")]
    PaymentNotFound { payment_id: String },

    /// Billing period the gateway cannot schedule
    #[error("Unsupported billing interval: {period}")]
    UnsupportedBillingPeriod { period: String },

    /// Payment provider API error
    #[error("Provider error [{provider}]: {message}")]
    ProviderError { provider: String, message: String },

    /// Network/HTTP error communicating with the provider
    #[error("Network error: {0}")]
    NetworkError(String),

    /// Webhook signature verification failed
    #[error("Webhook verification failed: {0}")]
    WebhookVerificationFailed(String),

    /// Webhook payload parsing error
    #[error("Webhook parse error: {0}")]
    WebhookParseError(String),

    /// Payment signature on a checkout callback did not match
    #[error("Payment signature verification failed")]
    PaymentVerificationFailed,

    /// Internal error (should not happen)
    #[error("Internal error: {0}")]
    Internal(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl DonationError {
    /// Returns true if this error is retryable
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            DonationError::NetworkError(_) | DonationError::ProviderError { .. }
        )
    }

    /// Returns the HTTP status code appropriate for this error
    pub fn status_code(&self) -> u16 {
        match self {
            DonationError::Configuration(_) => 500,
            DonationError::InvalidRequest(_) => 400,
            DonationError::PlanNotFound { .. } => 404,
            DonationError::PaymentNotFound { .. } => 404,
            DonationError::UnsupportedBillingPeriod { .. } => 400,
            DonationError::ProviderError { .. } => 502,
            DonationError::NetworkError(_) => 503,
            DonationError::WebhookVerificationFailed(_) => 400,
            DonationError::WebhookParseError(_) => 400,
            DonationError::PaymentVerificationFailed => 400,
            DonationError::Internal(_) => 500,
            DonationError::Serialization(_) => 500,
        }
    }
}

/// Result type alias for gateway operations
pub type DonationResult<T> = Result<T, DonationError>;
