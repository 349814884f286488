//! # Signature Verification
//!
//! HMAC-SHA256 checks for the two signatures Razorpay sends:
//! the `X-Razorpay-Signature` header on webhook deliveries (signed over
//! the raw body) and the checkout-callback signature (signed over
//! `payment_id|subscription_id`).
//!
//! Verification must run over the exact bytes received on the wire; a
//! re-serialized body will not match.

use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Compute HMAC-SHA256 over a message and hex-encode the digest
pub fn compute_hmac_sha256(secret: &str, message: &[u8]) -> String {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC can take key of any size");
    mac.update(message);
    hex::encode(mac.finalize().into_bytes())
}

/// Verify a webhook delivery signature.
///
/// Returns false, never errors, on any mismatch or malformed input.
pub fn verify_webhook_signature(raw_body: &[u8], received_signature: &str, secret: &str) -> bool {
    if received_signature.is_empty() || secret.is_empty() {
        return false;
    }
    let expected = compute_hmac_sha256(secret, raw_body);
    constant_time_compare(received_signature, &expected)
}

/// Verify the signature Razorpay's checkout hands back after a
/// subscription payment, signed over `"{payment_id}|{subscription_id}"`
/// with the account key secret.
pub fn verify_payment_signature(
    payment_id: &str,
    subscription_id: &str,
    received_signature: &str,
    key_secret: &str,
) -> bool {
    if received_signature.is_empty() || key_secret.is_empty() {
        return false;
    }
    let message = format!("{}|{}", payment_id, subscription_id);
    let expected = compute_hmac_sha256(key_secret, message.as_bytes());
    constant_time_compare(received_signature, &expected)
}

fn constant_time_compare(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.bytes()
        .zip(b.bytes())
        .fold(0, |acc, (x, y)| acc | (x ^ y))
        == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "webhook_secret_123";

    #[test]
    fn test_hmac_is_hex_sha256() {
        let sig = compute_hmac_sha256(SECRET, b"{}");
        assert_eq!(sig.len(), 64);
        assert!(sig.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_valid_signature_accepted() {
        let body = br#"{"event":"payment.authorized","payload":{"payment":{"entity":{"id":"pay_1"}}}}"#;
        let sig = compute_hmac_sha256(SECRET, body);

        assert!(verify_webhook_signature(body, &sig, SECRET));
    }

    #[test]
    fn test_mutated_body_rejected() {
        let body = br#"{"event":"payment.authorized","payload":{"payment":{"entity":{"id":"pay_1"}}}}"#;
        let sig = compute_hmac_sha256(SECRET, body);

        let mut mutated = body.to_vec();
        mutated[10] ^= 0x01;
        assert!(!verify_webhook_signature(&mutated, &sig, SECRET));
    }

    #[test]
    fn test_mutated_signature_rejected() {
        let body = br#"{"event":"payment.authorized"}"#;
        let mut sig = compute_hmac_sha256(SECRET, body);
        // Flip one hex digit
        let last = sig.pop().unwrap();
        sig.push(if last == '0' { '1' } else { '0' });

        assert!(!verify_webhook_signature(body, &sig, SECRET));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let body = br#"{"event":"payment.authorized"}"#;
        let sig = compute_hmac_sha256("other_secret", body);

        assert!(!verify_webhook_signature(body, &sig, SECRET));
    }

    #[test]
    fn test_malformed_inputs_return_false() {
        assert!(!verify_webhook_signature(b"{}", "", SECRET));
        assert!(!verify_webhook_signature(b"{}", "not-hex-not-64", SECRET));
        assert!(!verify_webhook_signature(b"{}", "abc", ""));
    }

    #[test]
    fn test_payment_signature_roundtrip() {
        let sig = compute_hmac_sha256("key_secret", b"pay_1|sub_1");

        assert!(verify_payment_signature("pay_1", "sub_1", &sig, "key_secret"));
        assert!(!verify_payment_signature("pay_2", "sub_1", &sig, "key_secret"));
        assert!(!verify_payment_signature("pay_1", "sub_2", &sig, "key_secret"));
        assert!(!verify_payment_signature("pay_1", "sub_1", &sig, "wrong"));
    }

    #[test]
    fn test_constant_time_compare() {
        assert!(constant_time_compare("abc123", "abc123"));
        assert!(!constant_time_compare("abc123", "abc124"));
        assert!(!constant_time_compare("abc", "abcd"));
    }
}
