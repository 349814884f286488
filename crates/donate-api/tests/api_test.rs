//! End-to-end endpoint tests with a mock payment provider.

use async_trait::async_trait;
use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum_test::TestServer;
use donate_api::{create_router, AppConfig, AppState};
use donate_core::{
    BillingPeriod, Customer, DonationError, DonationResult, NewCustomer, NewSubscription, Payment,
    PaymentProvider, PaymentStatus, Plan, Subscription, SubscriptionStatus,
};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Arc;

const WEBHOOK_SECRET: &str = "test_webhook_secret";
const KEY_SECRET: &str = "test_key_secret";

/// Provider double serving canned data, no network
struct MockProvider {
    existing_customer_email: Option<String>,
    plan_period: BillingPeriod,
}

impl Default for MockProvider {
    fn default() -> Self {
        Self {
            existing_customer_email: None,
            plan_period: BillingPeriod::Monthly,
        }
    }
}

#[async_trait]
impl PaymentProvider for MockProvider {
    async fn find_customer_by_email(&self, email: &str) -> DonationResult<Option<Customer>> {
        Ok(self
            .existing_customer_email
            .as_deref()
            .filter(|known| *known == email)
            .map(|known| Customer {
                id: "cust_existing".to_string(),
                name: "Existing Donor".to_string(),
                email: known.to_string(),
                contact: None,
            }))
    }

    async fn create_customer(&self, customer: &NewCustomer) -> DonationResult<Customer> {
        Ok(Customer {
            id: "cust_new".to_string(),
            name: customer.name.clone(),
            email: customer.email.clone(),
            contact: customer.contact.clone(),
        })
    }

    async fn fetch_plan(&self, plan_id: &str) -> DonationResult<Plan> {
        Ok(Plan {
            id: plan_id.to_string(),
            period: self.plan_period,
            interval: 1,
        })
    }

    async fn create_subscription(
        &self,
        subscription: &NewSubscription,
    ) -> DonationResult<Subscription> {
        Ok(Subscription {
            id: "sub_mock".to_string(),
            plan_id: subscription.plan_id.clone(),
            status: SubscriptionStatus::Created,
            customer_id: Some(subscription.customer_id.clone()),
        })
    }

    async fn fetch_payment(&self, payment_id: &str) -> DonationResult<Payment> {
        match payment_id {
            "pay_failed" => Ok(Payment {
                id: payment_id.to_string(),
                amount: 50000,
                currency: "INR".to_string(),
                status: PaymentStatus::Failed,
                created_at: 1_715_700_000,
                notes: HashMap::new(),
            }),
            "pay_missing" => Err(DonationError::PaymentNotFound {
                payment_id: payment_id.to_string(),
            }),
            _ => {
                let mut notes = HashMap::new();
                notes.insert("name".to_string(), "Rahul S.".to_string());
                Ok(Payment {
                    id: payment_id.to_string(),
                    amount: 200_000,
                    currency: "INR".to_string(),
                    status: PaymentStatus::Captured,
                    created_at: 1_715_700_000,
                    notes,
                })
            }
        }
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }
}

fn test_server_with(provider: MockProvider) -> TestServer {
    let config = AppConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        environment: "test".to_string(),
    };
    let state = AppState::with_provider(Arc::new(provider), WEBHOOK_SECRET, KEY_SECRET, config);
    TestServer::new(create_router(state)).unwrap()
}

fn test_server() -> TestServer {
    test_server_with(MockProvider::default())
}

fn sign(body: &[u8], secret: &str) -> String {
    donate_razorpay::compute_hmac_sha256(secret, body)
}

fn signature_header(value: &str) -> (HeaderName, HeaderValue) {
    (
        HeaderName::from_static("x-razorpay-signature"),
        HeaderValue::from_str(value).unwrap(),
    )
}

// =============================================================================
// Webhook scenarios
// =============================================================================

#[tokio::test]
async fn webhook_with_valid_signature_acknowledges() {
    let server = test_server();
    let body = br#"{"event":"payment.authorized","payload":{"payment":{"entity":{"id":"pay_1"}}}}"#;
    let (name, value) = signature_header(&sign(body, WEBHOOK_SECRET));

    let response = server
        .post("/api/razorpay-webhook")
        .add_header(name, value)
        .bytes(body.to_vec().into())
        .await;

    response.assert_status(StatusCode::OK);
    let json: Value = response.json();
    assert_eq!(json, json!({ "success": true }));
}

#[tokio::test]
async fn webhook_with_corrupted_signature_rejected() {
    let server = test_server();
    let body = br#"{"event":"payment.authorized","payload":{"payment":{"entity":{"id":"pay_1"}}}}"#;
    let mut sig = sign(body, WEBHOOK_SECRET);
    // Corrupt one hex digit
    let last = sig.pop().unwrap();
    sig.push(if last == '0' { '1' } else { '0' });
    let (name, value) = signature_header(&sig);

    let response = server
        .post("/api/razorpay-webhook")
        .add_header(name, value)
        .bytes(body.to_vec().into())
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let json: Value = response.json();
    assert_eq!(json["success"], false);
    assert_eq!(json["message"], "Invalid signature");
}

#[tokio::test]
async fn webhook_without_signature_header_rejected() {
    let server = test_server();
    let body = br#"{"event":"payment.authorized","payload":{}}"#;

    let response = server
        .post("/api/razorpay-webhook")
        .bytes(body.to_vec().into())
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn webhook_with_malformed_json_still_acknowledges() {
    let server = test_server();
    let body = b"this is not json at all";
    let (name, value) = signature_header(&sign(body, WEBHOOK_SECRET));

    let response = server
        .post("/api/razorpay-webhook")
        .add_header(name, value)
        .bytes(body.to_vec().into())
        .await;

    response.assert_status(StatusCode::OK);
    let json: Value = response.json();
    assert_eq!(json["success"], true);
}

#[tokio::test]
async fn webhook_with_unknown_event_acknowledges() {
    let server = test_server();
    let body = br#"{"event":"settlement.processed","payload":{"settlement":{"entity":{"id":"setl_1"}}}}"#;
    let (name, value) = signature_header(&sign(body, WEBHOOK_SECRET));

    let response = server
        .post("/api/razorpay-webhook")
        .add_header(name, value)
        .bytes(body.to_vec().into())
        .await;

    response.assert_status(StatusCode::OK);
}

// =============================================================================
// Payment verification scenarios
// =============================================================================

#[tokio::test]
async fn verify_one_time_payment_captured() {
    let server = test_server();

    let response = server
        .post("/api/verify-payment")
        .json(&json!({ "razorpay_payment_id": "pay_ok" }))
        .await;

    response.assert_status(StatusCode::OK);
    let json: Value = response.json();
    assert_eq!(json["success"], true);
    assert_eq!(json["payment"]["id"], "pay_ok");
}

#[tokio::test]
async fn verify_one_time_payment_failed_status() {
    let server = test_server();

    let response = server
        .post("/api/verify-payment")
        .json(&json!({ "razorpay_payment_id": "pay_failed" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let json: Value = response.json();
    assert_eq!(json["message"], "Payment verification failed");
}

#[tokio::test]
async fn verify_subscription_payment_signature() {
    let server = test_server();
    let sig = sign(b"pay_1|sub_1", KEY_SECRET);

    let response = server
        .post("/api/verify-payment")
        .json(&json!({
            "razorpay_payment_id": "pay_1",
            "razorpay_subscription_id": "sub_1",
            "razorpay_signature": sig
        }))
        .await;

    response.assert_status(StatusCode::OK);

    // Same request signed with the wrong secret
    let bad_sig = sign(b"pay_1|sub_1", "wrong_secret");
    let response = server
        .post("/api/verify-payment")
        .json(&json!({
            "razorpay_payment_id": "pay_1",
            "razorpay_subscription_id": "sub_1",
            "razorpay_signature": bad_sig
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let json: Value = response.json();
    assert_eq!(json["message"], "Invalid signature");
}

#[tokio::test]
async fn verify_payment_missing_parameters() {
    let server = test_server();

    let response = server.post("/api/verify-payment").json(&json!({})).await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let json: Value = response.json();
    assert_eq!(json["message"], "Missing required parameters");
}

// =============================================================================
// Subscription creation scenarios
// =============================================================================

#[tokio::test]
async fn create_subscription_for_new_customer() {
    let server = test_server();

    let response = server
        .post("/api/create-subscription")
        .json(&json!({
            "plan_id": "plan_monthly",
            "customer_details": {
                "name": "Priya M.",
                "email": "priya@example.com",
                "phone": "9999999999"
            }
        }))
        .await;

    response.assert_status(StatusCode::OK);
    let json: Value = response.json();
    assert_eq!(json["success"], true);
    assert_eq!(json["subscription"]["id"], "sub_mock");
    assert_eq!(json["subscription"]["plan_id"], "plan_monthly");
    assert_eq!(json["subscription"]["status"], "created");
}

#[tokio::test]
async fn create_subscription_reuses_existing_customer() {
    let server = test_server_with(MockProvider {
        existing_customer_email: Some("priya@example.com".to_string()),
        ..MockProvider::default()
    });

    let response = server
        .post("/api/create-subscription")
        .json(&json!({
            "plan_id": "plan_monthly",
            "customer_details": {
                "name": "Priya M.",
                "email": "priya@example.com"
            }
        }))
        .await;

    response.assert_status(StatusCode::OK);
}

#[tokio::test]
async fn create_subscription_missing_fields() {
    let server = test_server();

    let response = server
        .post("/api/create-subscription")
        .json(&json!({ "plan_id": "plan_monthly" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let json: Value = response.json();
    assert_eq!(json["error"], "Missing required fields: plan_id, email, or name");
}

#[tokio::test]
async fn create_subscription_invalid_email() {
    let server = test_server();

    let response = server
        .post("/api/create-subscription")
        .json(&json!({
            "plan_id": "plan_monthly",
            "customer_details": { "name": "X", "email": "not-an-email" }
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let json: Value = response.json();
    assert_eq!(json["error"], "Invalid email format");
}

#[tokio::test]
async fn create_subscription_unsupported_billing_interval() {
    let server = test_server_with(MockProvider {
        plan_period: BillingPeriod::Weekly,
        ..MockProvider::default()
    });

    let response = server
        .post("/api/create-subscription")
        .json(&json!({
            "plan_id": "plan_weekly",
            "customer_details": { "name": "X", "email": "x@example.com" }
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let json: Value = response.json();
    assert_eq!(json["error"], "Unsupported billing interval");
}

// =============================================================================
// Stats and receipts
// =============================================================================

#[tokio::test]
async fn donation_stats_returns_placeholder() {
    let server = test_server();

    let response = server.get("/api/donation-stats").await;

    response.assert_status(StatusCode::OK);
    let json: Value = response.json();
    assert_eq!(json["success"], true);
    assert_eq!(json["stats"]["totalRaised"], 127500);
    assert_eq!(json["stats"]["recentDonations"].as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn generate_receipt_reshapes_payment() {
    let server = test_server();

    let response = server.get("/api/generate-receipt/pay_ok").await;

    response.assert_status(StatusCode::OK);
    let json: Value = response.json();
    assert_eq!(json["success"], true);
    assert_eq!(json["receipt"]["paymentId"], "pay_ok");
    assert_eq!(json["receipt"]["amount"], 2000.0);
    assert_eq!(json["receipt"]["donorName"], "Rahul S.");
}

#[tokio::test]
async fn generate_receipt_unknown_payment() {
    let server = test_server();

    let response = server.get("/api/generate-receipt/pay_missing").await;

    response.assert_status(StatusCode::NOT_FOUND);
    let json: Value = response.json();
    assert_eq!(json["success"], false);
}

#[tokio::test]
async fn health_endpoint() {
    let server = test_server();

    let response = server.get("/health").await;

    response.assert_status(StatusCode::OK);
    let json: Value = response.json();
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["service"], "donation-gateway");
}
