//! # donate-core
//!
//! Core types and traits for the donation-gateway payment layer.
//!
//! This crate provides:
//! - `PaymentProvider` trait for implementing payment providers
//! - `Customer`, `Plan`, `Subscription`, and `Payment` wire types
//! - `WebhookEvent` and `dispatch_webhook_event` for provider callbacks
//! - `Receipt` and `DonationStats` response shapes
//! - `DonationError` for typed error handling
//!
//! ## Example
//!
//! ```rust,ignore
//! use donate_core::{dispatch_webhook_event, LoggingWebhookHandler, WebhookEvent};
//!
//! // In the webhook endpoint, after signature validation:
//! let event = WebhookEvent::from_body(&body)?;
//! dispatch_webhook_event(&LoggingWebhookHandler, &event)?;
//! ```

pub mod error;
pub mod provider;
pub mod receipt;
pub mod stats;
pub mod types;
pub mod webhook;

// Re-exports for convenience
pub use error::{DonationError, DonationResult};
pub use provider::{BoxedPaymentProvider, PaymentProvider};
pub use receipt::Receipt;
pub use stats::{DonationStats, RecentDonation};
pub use types::{
    BillingPeriod, Customer, NewCustomer, NewSubscription, Payment, PaymentStatus, Plan,
    Subscription, SubscriptionStatus,
};
pub use webhook::{
    dispatch_webhook_event, LoggingWebhookHandler, WebhookEvent, WebhookEventKind, WebhookHandler,
};
