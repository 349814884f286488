//! # Razorpay API Client
//!
//! Implementation of the `PaymentProvider` trait against the Razorpay
//! REST API. Every call is point-to-point request/response; the provider
//! owns all entities.

use crate::config::RazorpayConfig;
use async_trait::async_trait;
use donate_core::{
    BillingPeriod, Customer, DonationError, DonationResult, NewCustomer, NewSubscription, Payment,
    PaymentProvider, PaymentStatus, Plan, Subscription, SubscriptionStatus,
};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, error, instrument};

/// Razorpay REST API client
pub struct RazorpayClient {
    config: RazorpayConfig,
    client: Client,
}

impl RazorpayClient {
    /// Create a new client
    pub fn new(config: RazorpayConfig) -> DonationResult<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .map_err(|e| DonationError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    /// Create from environment variables
    pub fn from_env() -> DonationResult<Self> {
        let config = RazorpayConfig::from_env()?;
        Self::new(config)
    }

    /// The configuration this client was built with
    pub fn config(&self) -> &RazorpayConfig {
        &self.config
    }

    fn url(&self, path: &str) -> String {
        format!("{}/v1{}", self.config.api_base_url, path)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> DonationResult<T> {
        let response = self
            .client
            .get(self.url(path))
            .basic_auth(&self.config.key_id, Some(&self.config.key_secret))
            .send()
            .await
            .map_err(|e| DonationError::NetworkError(e.to_string()))?;

        self.parse_response(response).await
    }

    async fn post<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &serde_json::Value,
    ) -> DonationResult<T> {
        let response = self
            .client
            .post(self.url(path))
            .basic_auth(&self.config.key_id, Some(&self.config.key_secret))
            .json(body)
            .send()
            .await
            .map_err(|e| DonationError::NetworkError(e.to_string()))?;

        self.parse_response(response).await
    }

    async fn parse_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> DonationResult<T> {
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| DonationError::NetworkError(e.to_string()))?;

        if !status.is_success() {
            error!("Razorpay API error: status={}, body={}", status, body);

            if let Ok(error_response) = serde_json::from_str::<RazorpayErrorResponse>(&body) {
                return Err(DonationError::ProviderError {
                    provider: "razorpay".to_string(),
                    message: error_response.error.description,
                });
            }

            return Err(DonationError::ProviderError {
                provider: "razorpay".to_string(),
                message: format!("HTTP {}: {}", status, body),
            });
        }

        serde_json::from_str(&body).map_err(|e| {
            DonationError::Serialization(format!("Failed to parse Razorpay response: {}", e))
        })
    }
}

#[async_trait]
impl PaymentProvider for RazorpayClient {
    #[instrument(skip(self))]
    async fn find_customer_by_email(&self, email: &str) -> DonationResult<Option<Customer>> {
        let path = format!("/customers?email={}&count=1", urlencode(email));
        let collection: RazorpayCollection<RazorpayCustomer> = self.get(&path).await?;

        debug!("Customer lookup returned {} items", collection.items.len());

        Ok(collection.items.into_iter().next().map(Customer::from))
    }

    #[instrument(skip(self, customer), fields(email = %customer.email))]
    async fn create_customer(&self, customer: &NewCustomer) -> DonationResult<Customer> {
        let body = json!({
            "name": customer.name,
            "email": customer.email,
            "contact": customer.contact.as_deref().unwrap_or("0000000000"),
            // Razorpay rejects duplicate emails unless told otherwise
            "fail_existing": "0",
        });

        let created: RazorpayCustomer = self.post("/customers", &body).await?;
        Ok(Customer::from(created))
    }

    #[instrument(skip(self))]
    async fn fetch_plan(&self, plan_id: &str) -> DonationResult<Plan> {
        let raw: RazorpayPlan = self.get(&format!("/plans/{}", plan_id)).await?;
        raw.try_into()
    }

    #[instrument(skip(self, subscription), fields(plan_id = %subscription.plan_id))]
    async fn create_subscription(
        &self,
        subscription: &NewSubscription,
    ) -> DonationResult<Subscription> {
        let body = json!({
            "plan_id": subscription.plan_id,
            "customer_id": subscription.customer_id,
            "total_count": subscription.total_count,
            "customer_notify": if subscription.customer_notify { 1 } else { 0 },
        });

        let created: RazorpaySubscription = self.post("/subscriptions", &body).await?;

        debug!("Created subscription {}", created.id);

        Ok(Subscription {
            id: created.id,
            plan_id: created.plan_id,
            status: created.status,
            customer_id: created.customer_id,
        })
    }

    #[instrument(skip(self))]
    async fn fetch_payment(&self, payment_id: &str) -> DonationResult<Payment> {
        let raw: RazorpayPayment = self.get(&format!("/payments/{}", payment_id)).await?;
        Ok(raw.into())
    }

    fn provider_name(&self) -> &'static str {
        "razorpay"
    }
}

/// Minimal percent-encoding for query values (emails contain `+` and `@`)
fn urlencode(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("%{:02X}", byte)),
        }
    }
    out
}

// =============================================================================
// Razorpay API Types
// =============================================================================

#[derive(Debug, Deserialize)]
struct RazorpayCollection<T> {
    #[serde(default = "Vec::new")]
    items: Vec<T>,
}

#[derive(Debug, Deserialize)]
struct RazorpayCustomer {
    id: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    email: Option<String>,
    // Razorpay returns contact as either a string or a number
    #[serde(default)]
    contact: Option<serde_json::Value>,
}

impl From<RazorpayCustomer> for Customer {
    fn from(raw: RazorpayCustomer) -> Self {
        let contact = raw.contact.and_then(|c| match c {
            serde_json::Value::String(s) => Some(s),
            serde_json::Value::Number(n) => Some(n.to_string()),
            _ => None,
        });

        Customer {
            id: raw.id,
            name: raw.name.unwrap_or_default(),
            email: raw.email.unwrap_or_default(),
            contact,
        }
    }
}

#[derive(Debug, Deserialize)]
struct RazorpayPlan {
    id: String,
    period: String,
    #[serde(default = "default_interval")]
    interval: u32,
}

fn default_interval() -> u32 {
    1
}

impl TryFrom<RazorpayPlan> for Plan {
    type Error = DonationError;

    fn try_from(raw: RazorpayPlan) -> DonationResult<Plan> {
        let period = match raw.period.as_str() {
            "daily" => BillingPeriod::Daily,
            "weekly" => BillingPeriod::Weekly,
            "monthly" => BillingPeriod::Monthly,
            "yearly" => BillingPeriod::Yearly,
            other => {
                return Err(DonationError::UnsupportedBillingPeriod {
                    period: other.to_string(),
                })
            }
        };

        Ok(Plan {
            id: raw.id,
            period,
            interval: raw.interval,
        })
    }
}

#[derive(Debug, Deserialize)]
struct RazorpaySubscription {
    id: String,
    plan_id: String,
    status: SubscriptionStatus,
    #[serde(default)]
    customer_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RazorpayPayment {
    id: String,
    amount: i64,
    currency: String,
    status: PaymentStatus,
    created_at: i64,
    // Empty notes arrive as `[]`, populated notes as an object
    #[serde(default)]
    notes: serde_json::Value,
}

impl From<RazorpayPayment> for Payment {
    fn from(raw: RazorpayPayment) -> Self {
        let notes = raw
            .notes
            .as_object()
            .map(|m| {
                m.iter()
                    .filter_map(|(k, v)| v.as_str().map(|s| (k.clone(), s.to_string())))
                    .collect()
            })
            .unwrap_or_default();

        Payment {
            id: raw.id,
            amount: raw.amount,
            currency: raw.currency,
            status: raw.status,
            created_at: raw.created_at,
            notes,
        }
    }
}

#[derive(Debug, Deserialize)]
struct RazorpayErrorResponse {
    error: RazorpayError,
}

#[derive(Debug, Deserialize)]
struct RazorpayError {
    #[serde(default)]
    code: Option<String>,
    description: String,
}
