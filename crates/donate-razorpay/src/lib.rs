//! # donate-razorpay
//!
//! Razorpay provider implementation for donation-gateway-rs.
//!
//! This crate provides:
//!
//! 1. **RazorpayClient** - `PaymentProvider` implementation over the
//!    Razorpay REST API (customers, plans, subscriptions, payments)
//! 2. **Signature verification** - HMAC-SHA256 checks for webhook
//!    deliveries and checkout callbacks
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use donate_razorpay::{RazorpayClient, signature};
//! use donate_core::PaymentProvider;
//!
//! // Create client from environment
//! let client = RazorpayClient::from_env()?;
//!
//! // Outbound: fetch a payment
//! let payment = client.fetch_payment("pay_abc123").await?;
//!
//! // Inbound: verify a webhook delivery before trusting the body
//! let ok = signature::verify_webhook_signature(&body, &header, &secret);
//! ```

pub mod client;
pub mod config;
pub mod signature;

// Re-exports
pub use client::RazorpayClient;
pub use config::RazorpayConfig;
pub use signature::{
    compute_hmac_sha256, verify_payment_signature, verify_webhook_signature,
};
