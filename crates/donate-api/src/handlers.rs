//! # Request Handlers
//!
//! Axum request handlers for the donation gateway.
//! Every endpoint is a thin pass-through to the payment provider; the one
//! piece of real logic is the webhook endpoint, which authenticates the
//! delivery before dispatching it.

use crate::state::AppState;
use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use donate_core::{
    dispatch_webhook_event, DonationError, LoggingWebhookHandler, NewCustomer, NewSubscription,
    Receipt, WebhookEvent,
};
use donate_razorpay::signature;
use serde::{Deserialize, Serialize};
use tracing::{error, info, instrument, warn};

// =============================================================================
// Request/Response Types
// =============================================================================

/// Create subscription request
#[derive(Debug, Deserialize)]
pub struct CreateSubscriptionRequest {
    #[serde(default)]
    pub plan_id: Option<String>,
    #[serde(default)]
    pub customer_details: Option<CustomerDetails>,
}

/// Customer details for subscription creation
#[derive(Debug, Deserialize)]
pub struct CustomerDetails {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

/// Create subscription response
#[derive(Debug, Serialize)]
pub struct CreateSubscriptionResponse {
    pub success: bool,
    pub subscription: SubscriptionSummary,
}

/// Subscription fields the front end needs
#[derive(Debug, Serialize)]
pub struct SubscriptionSummary {
    pub id: String,
    pub plan_id: String,
    pub status: donate_core::SubscriptionStatus,
}

/// Verify payment request (checkout callback fields from the front end)
#[derive(Debug, Deserialize)]
pub struct VerifyPaymentRequest {
    #[serde(default)]
    pub razorpay_payment_id: Option<String>,
    #[serde(default)]
    pub razorpay_subscription_id: Option<String>,
    #[serde(default)]
    pub razorpay_signature: Option<String>,
}

/// Webhook acknowledgment
#[derive(Debug, Serialize)]
pub struct WebhookAck {
    pub success: bool,
}

/// Error response: `error` for processing failures, `message` for
/// verification rejections (shapes the front end matches on)
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ErrorResponse {
    pub fn error(text: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(text.into()),
            message: None,
        }
    }

    pub fn message(text: impl Into<String>) -> Self {
        Self {
            success: false,
            error: None,
            message: Some(text.into()),
        }
    }
}

fn donation_error_to_response(err: DonationError) -> (StatusCode, Json<ErrorResponse>) {
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(ErrorResponse::error(err.to_string())))
}

/// Structural email check equivalent to the front end's
/// `\S+@\S+\.\S+` expectation.
fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let mut parts = email.splitn(2, '@');
    let local = parts.next().unwrap_or("");
    let domain = parts.next().unwrap_or("");
    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((head, tld)) => !head.is_empty() && !tld.is_empty(),
        None => false,
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// Health check endpoint
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "donation-gateway",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Create a subscription: find or create the customer, fetch the plan,
/// schedule the billing cycles, create the subscription at the provider.
#[instrument(skip(state, request))]
pub async fn create_subscription(
    State(state): State<AppState>,
    Json(request): Json<CreateSubscriptionRequest>,
) -> Result<Json<CreateSubscriptionResponse>, (StatusCode, Json<ErrorResponse>)> {
    let (plan_id, details) = match (request.plan_id, request.customer_details) {
        (Some(plan_id), Some(details)) => (plan_id, details),
        _ => {
            return Err((
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::error(
                    "Missing required fields: plan_id, email, or name",
                )),
            ))
        }
    };

    let (name, email) = match (details.name, details.email) {
        (Some(name), Some(email)) if !name.is_empty() && !email.is_empty() => (name, email),
        _ => {
            return Err((
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::error(
                    "Missing required fields: plan_id, email, or name",
                )),
            ))
        }
    };

    if !is_valid_email(&email) {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::error("Invalid email format")),
        ));
    }

    // Find or create the customer at the provider
    let customer = match state.provider.find_customer_by_email(&email).await {
        Ok(Some(existing)) => existing,
        Ok(None) => {
            let mut new_customer = NewCustomer::new(name, &email);
            if let Some(phone) = details.phone {
                new_customer = new_customer.with_contact(phone);
            }
            state
                .provider
                .create_customer(&new_customer)
                .await
                .map_err(|e| {
                    error!("Customer management error: {}", e);
                    donation_error_to_response(e)
                })?
        }
        Err(e) => {
            error!("Customer management error: {}", e);
            return Err(donation_error_to_response(e));
        }
    };

    let plan = state.provider.fetch_plan(&plan_id).await.map_err(|e| {
        error!("Plan fetch error: {}", e);
        donation_error_to_response(e)
    })?;

    let total_count = plan.period.total_count().ok_or_else(|| {
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::error("Unsupported billing interval")),
        )
    })?;

    info!(
        "Creating subscription: plan={}, period={}, customer={}",
        plan.id, plan.period, customer.id
    );

    let subscription = state
        .provider
        .create_subscription(&NewSubscription {
            plan_id: plan.id.clone(),
            customer_id: customer.id,
            total_count,
            customer_notify: true,
        })
        .await
        .map_err(|e| {
            error!("Subscription error: {}", e);
            donation_error_to_response(e)
        })?;

    Ok(Json(CreateSubscriptionResponse {
        success: true,
        subscription: SubscriptionSummary {
            id: subscription.id,
            plan_id: subscription.plan_id,
            status: subscription.status,
        },
    }))
}

/// Verify a checkout payment.
///
/// One-time payments are verified by fetching the payment and checking
/// its status; subscription payments carry an HMAC signature over
/// `payment_id|subscription_id`.
#[instrument(skip(state, request))]
pub async fn verify_payment(
    State(state): State<AppState>,
    Json(request): Json<VerifyPaymentRequest>,
) -> Result<Json<serde_json::Value>, (StatusCode, Json<ErrorResponse>)> {
    // One-time payment branch
    if let (Some(payment_id), None) = (
        request.razorpay_payment_id.as_deref(),
        request.razorpay_subscription_id.as_deref(),
    ) {
        let payment = state.provider.fetch_payment(payment_id).await.map_err(|e| {
            error!("Payment verification error: {}", e);
            donation_error_to_response(e)
        })?;

        if payment.status.is_successful() {
            return Ok(Json(serde_json::json!({
                "success": true,
                "payment": payment
            })));
        }

        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::message("Payment verification failed")),
        ));
    }

    // Subscription payment branch
    if let Some(subscription_id) = request.razorpay_subscription_id.as_deref() {
        let payment_id = request.razorpay_payment_id.as_deref().unwrap_or("");
        let received = request.razorpay_signature.as_deref().unwrap_or("");

        if signature::verify_payment_signature(
            payment_id,
            subscription_id,
            received,
            &state.key_secret,
        ) {
            return Ok(Json(serde_json::json!({ "success": true })));
        }

        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::message("Invalid signature")),
        ));
    }

    Err((
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse::message("Missing required parameters")),
    ))
}

/// Handle a Razorpay webhook delivery.
///
/// Signature failure is the one rejection; everything after a valid
/// signature is acknowledged with 200 so the provider never retry-storms
/// on our internal errors.
#[instrument(skip(state, headers, body))]
pub async fn razorpay_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<WebhookAck>, (StatusCode, Json<ErrorResponse>)> {
    let received = headers
        .get("x-razorpay-signature")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");

    if !signature::verify_webhook_signature(&body, received, &state.webhook_secret) {
        warn!("Webhook rejected: invalid signature");
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::message("Invalid signature")),
        ));
    }

    // The body is trusted from here on. Parse and dispatch failures are
    // logged and swallowed; a non-2xx would make the provider retry a
    // delivery that will never succeed.
    let event = match WebhookEvent::from_body(&body) {
        Ok(event) => event,
        Err(e) => {
            error!("Webhook parse error: {}", e);
            return Ok(Json(WebhookAck { success: true }));
        }
    };

    info!(
        "Received webhook: event={}, entity={:?}",
        event.kind,
        event.entity_id()
    );

    if let Err(e) = dispatch_webhook_event(&LoggingWebhookHandler, &event) {
        error!("Webhook processing error: {}", e);
    }

    Ok(Json(WebhookAck { success: true }))
}

/// Fetch donation statistics (placeholder until a persistence layer exists)
pub async fn donation_stats(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "success": true,
        "stats": state.stats
    }))
}

/// Generate donation receipt data for a payment
#[instrument(skip(state))]
pub async fn generate_receipt(
    State(state): State<AppState>,
    Path(payment_id): Path<String>,
) -> Result<Json<serde_json::Value>, (StatusCode, Json<ErrorResponse>)> {
    let payment = state
        .provider
        .fetch_payment(&payment_id)
        .await
        .map_err(|e| {
            error!("Receipt generation error: {}", e);
            donation_error_to_response(e)
        })?;

    let receipt = Receipt::from_payment(&payment);

    Ok(Json(serde_json::json!({
        "success": true,
        "receipt": receipt
    })))
}
