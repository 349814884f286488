//! # Payment Provider Trait
//!
//! Seam between the HTTP layer and the payment provider's API.
//! The gateway constructs a provider explicitly and passes it into request
//! handlers; there is no process-global client.

use crate::error::DonationResult;
use crate::types::{Customer, NewCustomer, NewSubscription, Payment, Plan, Subscription};
use async_trait::async_trait;
use std::sync::Arc;

/// Outbound operations the gateway delegates to the payment provider.
///
/// Implemented by `donate-razorpay`; test doubles implement it with canned
/// data so handlers can be exercised without network access.
#[async_trait]
pub trait PaymentProvider: Send + Sync {
    /// Look up an existing customer by email.
    ///
    /// Returns `Ok(None)` when no customer matches.
    async fn find_customer_by_email(&self, email: &str) -> DonationResult<Option<Customer>>;

    /// Create a customer record at the provider.
    async fn create_customer(&self, customer: &NewCustomer) -> DonationResult<Customer>;

    /// Fetch a subscription plan by ID.
    async fn fetch_plan(&self, plan_id: &str) -> DonationResult<Plan>;

    /// Create a subscription for a customer on a plan.
    async fn create_subscription(
        &self,
        subscription: &NewSubscription,
    ) -> DonationResult<Subscription>;

    /// Fetch a payment by ID.
    async fn fetch_payment(&self, payment_id: &str) -> DonationResult<Payment>;

    /// Get the provider name (for logging and error context).
    fn provider_name(&self) -> &'static str;
}

/// Type alias for a shared provider handle (dynamic dispatch)
pub type BoxedPaymentProvider = Arc<dyn PaymentProvider>;
