//! # Provider Entity Types
//!
//! Thin wire types for the entities the payment provider owns.
//! The gateway never persists these; they exist to reshape provider
//! responses for the front end.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A customer record at the payment provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
    /// Provider customer ID (e.g., "cust_...")
    pub id: String,

    /// Display name
    pub name: String,

    /// Email address
    pub email: String,

    /// Contact number
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,
}

/// Details for creating a customer at the provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewCustomer {
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,
}

impl NewCustomer {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            contact: None,
        }
    }

    /// Builder: set contact number
    pub fn with_contact(mut self, contact: impl Into<String>) -> Self {
        self.contact = Some(contact.into());
        self
    }
}

/// Billing period of a subscription plan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BillingPeriod {
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl BillingPeriod {
    /// Returns the period name as the provider spells it
    pub fn as_str(&self) -> &'static str {
        match self {
            BillingPeriod::Daily => "daily",
            BillingPeriod::Weekly => "weekly",
            BillingPeriod::Monthly => "monthly",
            BillingPeriod::Yearly => "yearly",
        }
    }

    /// Number of billing cycles to schedule for a one-year commitment.
    /// Only monthly and yearly plans are offered; anything else is
    /// rejected at subscription creation.
    pub fn total_count(&self) -> Option<u32> {
        match self {
            BillingPeriod::Monthly => Some(12),
            BillingPeriod::Yearly => Some(1),
            BillingPeriod::Daily | BillingPeriod::Weekly => None,
        }
    }
}

impl std::fmt::Display for BillingPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A subscription plan defined at the provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Plan {
    /// Provider plan ID (e.g., "plan_...")
    pub id: String,

    /// Billing period
    pub period: BillingPeriod,

    /// Number of periods between charges (usually 1)
    #[serde(default = "default_interval")]
    pub interval: u32,
}

fn default_interval() -> u32 {
    1
}

/// Status of a subscription at the provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionStatus {
    Created,
    Authenticated,
    Active,
    Pending,
    Halted,
    Cancelled,
    Completed,
    Expired,
}

impl SubscriptionStatus {
    /// Whether the subscription will produce further charges
    pub fn is_live(&self) -> bool {
        matches!(
            self,
            SubscriptionStatus::Created
                | SubscriptionStatus::Authenticated
                | SubscriptionStatus::Active
                | SubscriptionStatus::Pending
        )
    }
}

/// A subscription created at the provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subscription {
    /// Provider subscription ID (e.g., "sub_...")
    pub id: String,

    /// Plan this subscription bills against
    pub plan_id: String,

    /// Current status
    pub status: SubscriptionStatus,

    /// Customer the subscription belongs to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<String>,
}

/// Request to create a subscription at the provider
#[derive(Debug, Clone, Serialize)]
pub struct NewSubscription {
    /// Plan to subscribe to
    pub plan_id: String,

    /// Customer to bill
    pub customer_id: String,

    /// Number of billing cycles
    pub total_count: u32,

    /// Whether the provider should notify the customer directly
    pub customer_notify: bool,
}

/// Status of a payment at the provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Created,
    Authorized,
    Captured,
    Refunded,
    Failed,
}

impl PaymentStatus {
    /// Whether the money is (or is about to be) secured
    pub fn is_successful(&self) -> bool {
        matches!(self, PaymentStatus::Authorized | PaymentStatus::Captured)
    }
}

/// A payment record at the provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payment {
    /// Provider payment ID (e.g., "pay_...")
    pub id: String,

    /// Amount in the smallest currency unit (paise for INR)
    pub amount: i64,

    /// ISO currency code as the provider reports it
    pub currency: String,

    /// Current status
    pub status: PaymentStatus,

    /// Unix timestamp of creation at the provider
    pub created_at: i64,

    /// Free-form notes attached at checkout (donor name, PAN, etc.)
    #[serde(default)]
    pub notes: HashMap<String, String>,
}

impl Payment {
    /// Amount in major currency units (rupees for INR)
    pub fn amount_major(&self) -> f64 {
        self.amount as f64 / 100.0
    }

    /// Creation time as a UTC datetime
    pub fn created_at_utc(&self) -> DateTime<Utc> {
        Utc.timestamp_opt(self.created_at, 0)
            .single()
            .unwrap_or_else(Utc::now)
    }
}
