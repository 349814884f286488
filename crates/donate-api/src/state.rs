//! # Application State
//!
//! Shared state for the Axum application.
//! The payment provider is constructed once and injected into request
//! handlers; handlers never reach for a global client.

use donate_core::{BoxedPaymentProvider, DonationStats};
use donate_razorpay::RazorpayClient;
use std::sync::Arc;

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Environment (development, staging, production)
    pub environment: String,
}

impl AppConfig {
    /// Load from environment variables
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            host: std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
        }
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> anyhow::Result<std::net::SocketAddr> {
        Ok(format!("{}:{}", self.host, self.port).parse()?)
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Payment provider (Razorpay in production, a test double in tests)
    pub provider: BoxedPaymentProvider,
    /// Webhook signing secret for inbound delivery verification
    pub webhook_secret: String,
    /// Account key secret for checkout-callback signature verification
    pub key_secret: String,
    /// Donation statistics served to the front end
    pub stats: DonationStats,
    /// Application config
    pub config: AppConfig,
}

impl AppState {
    /// Create state with the Razorpay client configured from environment
    pub fn new() -> anyhow::Result<Self> {
        let config = AppConfig::from_env();

        let client = RazorpayClient::from_env()
            .map_err(|e| anyhow::anyhow!("Failed to initialize Razorpay: {}", e))?;
        let webhook_secret = client.config().webhook_secret.clone();
        let key_secret = client.config().key_secret.clone();

        Ok(Self::with_provider(
            Arc::new(client),
            webhook_secret,
            key_secret,
            config,
        ))
    }

    /// Create state with an explicit provider (dependency injection seam,
    /// used by tests with a mock provider)
    pub fn with_provider(
        provider: BoxedPaymentProvider,
        webhook_secret: impl Into<String>,
        key_secret: impl Into<String>,
        config: AppConfig,
    ) -> Self {
        Self {
            provider,
            webhook_secret: webhook_secret.into(),
            key_secret: key_secret.into(),
            stats: DonationStats::placeholder(),
            config,
        }
    }
}
