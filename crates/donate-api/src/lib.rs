//! # donate-api
//!
//! HTTP API layer for donation-gateway-rs.
//!
//! This crate provides:
//! - Axum-based HTTP server
//! - REST endpoints bridging the donation front end to Razorpay
//! - Webhook verification and dispatch for provider callbacks
//!
//! ## Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | GET | `/health` | Health check |
//! | POST | `/api/create-subscription` | Create subscription |
//! | POST | `/api/verify-payment` | Verify checkout payment |
//! | POST | `/api/razorpay-webhook` | Razorpay webhook |
//! | GET | `/api/donation-stats` | Donation statistics |
//! | GET | `/api/generate-receipt/{payment_id}` | Receipt data |

pub mod handlers;
pub mod routes;
pub mod state;

pub use routes::create_router;
pub use state::{AppConfig, AppState};
