//! # Routes
//!
//! Axum router configuration for the donation gateway.

use crate::handlers;
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// Create the main application router
///
/// Routes:
/// - POST /api/create-subscription - Create a subscription
/// - POST /api/verify-payment - Verify a checkout payment
/// - POST /api/razorpay-webhook - Razorpay webhook handler (raw body)
/// - GET  /api/donation-stats - Donation statistics
/// - GET  /api/generate-receipt/{payment_id} - Receipt data for a payment
/// - GET  /health - Health check
pub fn create_router(state: AppState) -> Router {
    // The front end is served from a different origin
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        .route("/create-subscription", post(handlers::create_subscription))
        .route("/verify-payment", post(handlers::verify_payment))
        .route("/razorpay-webhook", post(handlers::razorpay_webhook))
        .route("/donation-stats", get(handlers::donation_stats))
        .route(
            "/generate-receipt/{payment_id}",
            get(handlers::generate_receipt),
        );

    Router::new()
        .route("/health", get(handlers::health))
        .route("/", get(handlers::health))
        .nest("/api", api_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
