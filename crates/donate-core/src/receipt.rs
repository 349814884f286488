//! # Donation Receipts
//!
//! Reshapes a provider payment record into receipt data for the front
//! end. PDF rendering is a downstream concern; the gateway only produces
//! the JSON.

use crate::types::Payment;
use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Receipt data derived from a payment
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Receipt {
    /// Generated receipt number (not stored anywhere)
    pub receipt_number: String,

    /// Provider payment ID
    pub payment_id: String,

    /// Amount in major currency units
    pub amount: f64,

    /// Currency code
    pub currency: String,

    /// Donor name from payment notes
    pub donor_name: String,

    /// Donor email from payment notes
    pub donor_email: String,

    /// Donation type from payment notes
    pub donation_type: String,

    /// Payment date, RFC 3339
    pub date: String,

    /// PAN from payment notes (tax receipts)
    pub pan: String,
}

impl Receipt {
    /// Build a receipt from a fetched payment.
    ///
    /// Missing notes fall back to placeholder text rather than failing;
    /// a donor without a PAN still gets a receipt.
    pub fn from_payment(payment: &Payment) -> Self {
        let note = |key: &str, fallback: &str| {
            payment
                .notes
                .get(key)
                .cloned()
                .unwrap_or_else(|| fallback.to_string())
        };

        Self {
            receipt_number: generate_receipt_number(),
            payment_id: payment.id.clone(),
            amount: payment.amount_major(),
            currency: payment.currency.clone(),
            donor_name: note("name", "Donor"),
            donor_email: note("email", "Not provided"),
            donation_type: note("donation_type", "Donation"),
            date: payment.created_at_utc().to_rfc3339(),
            pan: note("pan", "Not provided"),
        }
    }
}

/// Receipt number from the trailing digits of the current millisecond
/// clock: "RCP-" plus six digits.
fn generate_receipt_number() -> String {
    let millis = Utc::now().timestamp_millis();
    format!("RCP-{:06}", millis % 1_000_000)
}
