//! # Webhook Events & Dispatch
//!
//! Event types and routing for inbound provider callbacks.
//! A `WebhookEvent` is untrusted until the transport layer has validated
//! the provider signature over the raw body; only then is it parsed and
//! dispatched here.

use crate::error::{DonationError, DonationResult};
use serde::Deserialize;
use tracing::{debug, info, warn};

/// Webhook event kinds the gateway routes on.
///
/// Unknown kinds are carried through explicitly rather than dropped, so a
/// new provider event type never breaks delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WebhookEventKind {
    /// Payment was authorized
    PaymentAuthorized,
    /// Payment failed
    PaymentFailed,
    /// Subscription became active
    SubscriptionActivated,
    /// Subscription was halted after repeated charge failures
    SubscriptionHalted,
    /// Subscription was cancelled
    SubscriptionCancelled,
    /// Unrecognized event (forward-compatible passthrough)
    Unknown(String),
}

impl WebhookEventKind {
    /// Map a provider event name to a kind
    pub fn parse(name: &str) -> Self {
        match name {
            "payment.authorized" => WebhookEventKind::PaymentAuthorized,
            "payment.failed" => WebhookEventKind::PaymentFailed,
            "subscription.activated" => WebhookEventKind::SubscriptionActivated,
            "subscription.halted" => WebhookEventKind::SubscriptionHalted,
            "subscription.cancelled" => WebhookEventKind::SubscriptionCancelled,
            other => WebhookEventKind::Unknown(other.to_string()),
        }
    }

    /// The provider's name for this event
    pub fn as_str(&self) -> &str {
        match self {
            WebhookEventKind::PaymentAuthorized => "payment.authorized",
            WebhookEventKind::PaymentFailed => "payment.failed",
            WebhookEventKind::SubscriptionActivated => "subscription.activated",
            WebhookEventKind::SubscriptionHalted => "subscription.halted",
            WebhookEventKind::SubscriptionCancelled => "subscription.cancelled",
            WebhookEventKind::Unknown(name) => name,
        }
    }
}

impl std::fmt::Display for WebhookEventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Raw webhook body shape: `{ "event": "...", "payload": { ... } }`
#[derive(Debug, Deserialize)]
struct RawWebhookBody {
    event: String,
    #[serde(default)]
    payload: serde_json::Value,
}

/// A parsed, signature-verified webhook event
#[derive(Debug, Clone)]
pub struct WebhookEvent {
    /// Event kind
    pub kind: WebhookEventKind,

    /// Payload mapping from entity name to entity data
    pub payload: serde_json::Value,
}

impl WebhookEvent {
    /// Parse an event from a verified raw body.
    ///
    /// Call only after signature validation has passed.
    pub fn from_body(body: &[u8]) -> DonationResult<Self> {
        let raw: RawWebhookBody = serde_json::from_slice(body)
            .map_err(|e| DonationError::WebhookParseError(e.to_string()))?;

        Ok(Self {
            kind: WebhookEventKind::parse(&raw.event),
            payload: raw.payload,
        })
    }

    /// Extract the primary entity ID from the payload
    /// (`payload.<entity>.entity.id` for payment/subscription events).
    pub fn entity_id(&self) -> Option<&str> {
        let entity = match self.kind {
            WebhookEventKind::PaymentAuthorized | WebhookEventKind::PaymentFailed => "payment",
            WebhookEventKind::SubscriptionActivated
            | WebhookEventKind::SubscriptionHalted
            | WebhookEventKind::SubscriptionCancelled => "subscription",
            WebhookEventKind::Unknown(_) => return None,
        };

        self.payload
            .get(entity)
            .and_then(|e| e.get("entity"))
            .and_then(|e| e.get("id"))
            .and_then(|id| id.as_str())
    }
}

/// Webhook event handler trait.
///
/// Default bodies log and acknowledge; real side effects (database
/// updates, confirmation email) belong to collaborators implementing
/// this trait.
#[allow(unused_variables)]
pub trait WebhookHandler: Send + Sync {
    /// Called when a payment is authorized
    fn on_payment_authorized(&self, event: &WebhookEvent) -> DonationResult<()> {
        info!("Payment authorized: {:?}", event.entity_id());
        Ok(())
    }

    /// Called when a payment fails
    fn on_payment_failed(&self, event: &WebhookEvent) -> DonationResult<()> {
        warn!("Payment failed: {:?}", event.entity_id());
        Ok(())
    }

    /// Called when a subscription becomes active
    fn on_subscription_activated(&self, event: &WebhookEvent) -> DonationResult<()> {
        info!("Subscription activated: {:?}", event.entity_id());
        Ok(())
    }

    /// Called when a subscription is halted
    fn on_subscription_halted(&self, event: &WebhookEvent) -> DonationResult<()> {
        warn!("Subscription halted: {:?}", event.entity_id());
        Ok(())
    }

    /// Called when a subscription is cancelled
    fn on_subscription_cancelled(&self, event: &WebhookEvent) -> DonationResult<()> {
        info!("Subscription cancelled: {:?}", event.entity_id());
        Ok(())
    }

    /// Called for unknown/unhandled events
    fn on_unknown_event(&self, event: &WebhookEvent) -> DonationResult<()> {
        debug!("Unhandled webhook event: {}", event.kind);
        Ok(())
    }
}

/// Default no-op webhook handler (just logs events)
pub struct LoggingWebhookHandler;

impl WebhookHandler for LoggingWebhookHandler {}

/// Dispatch a webhook event to the appropriate handler method.
///
/// Pure routing: unknown kinds go to `on_unknown_event` and are accepted
/// silently.
pub fn dispatch_webhook_event(
    handler: &dyn WebhookHandler,
    event: &WebhookEvent,
) -> DonationResult<()> {
    match &event.kind {
        WebhookEventKind::PaymentAuthorized => handler.on_payment_authorized(event),
        WebhookEventKind::PaymentFailed => handler.on_payment_failed(event),
        WebhookEventKind::SubscriptionActivated => handler.on_subscription_activated(event),
        WebhookEventKind::SubscriptionHalted => handler.on_subscription_halted(event),
        WebhookEventKind::SubscriptionCancelled => handler.on_subscription_cancelled(event),
        WebhookEventKind::Unknown(_) => handler.on_unknown_event(event),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payment_event() -> WebhookEvent {
        WebhookEvent {
            kind: WebhookEventKind::PaymentAuthorized,
            payload: json!({
                "payment": {
                    "entity": {
                        "id": "pay_1",
                        "amount": 50000,
                        "status": "authorized"
                    }
                }
            }),
        }
    }

    #[test]
    fn test_kind_parsing() {
        assert_eq!(
            WebhookEventKind::parse("payment.authorized"),
            WebhookEventKind::PaymentAuthorized
        );
        assert_eq!(
            WebhookEventKind::parse("subscription.halted"),
            WebhookEventKind::SubscriptionHalted
        );
        assert_eq!(
            WebhookEventKind::parse("refund.created"),
            WebhookEventKind::Unknown("refund.created".to_string())
        );
    }

    #[test]
    fn test_from_body() {
        let body =
            br#"{"event":"payment.authorized","payload":{"payment":{"entity":{"id":"pay_1"}}}}"#;
        let event = WebhookEvent::from_body(body).unwrap();

        assert_eq!(event.kind, WebhookEventKind::PaymentAuthorized);
        assert_eq!(event.entity_id(), Some("pay_1"));
    }

    #[test]
    fn test_from_body_missing_payload() {
        let event = WebhookEvent::from_body(br#"{"event":"payment.failed"}"#).unwrap();
        assert_eq!(event.kind, WebhookEventKind::PaymentFailed);
        assert_eq!(event.entity_id(), None);
    }

    #[test]
    fn test_from_body_malformed() {
        assert!(WebhookEvent::from_body(b"not json").is_err());
        assert!(WebhookEvent::from_body(br#"{"payload":{}}"#).is_err());
    }

    #[test]
    fn test_subscription_entity_id() {
        let event = WebhookEvent {
            kind: WebhookEventKind::SubscriptionCancelled,
            payload: json!({
                "subscription": { "entity": { "id": "sub_9" } }
            }),
        };
        assert_eq!(event.entity_id(), Some("sub_9"));
    }

    #[test]
    fn test_dispatch_routes_to_handler() {
        struct TestHandler {
            called: std::sync::atomic::AtomicBool,
        }

        impl WebhookHandler for TestHandler {
            fn on_payment_authorized(&self, _event: &WebhookEvent) -> DonationResult<()> {
                self.called.store(true, std::sync::atomic::Ordering::SeqCst);
                Ok(())
            }
        }

        let handler = TestHandler {
            called: std::sync::atomic::AtomicBool::new(false),
        };

        dispatch_webhook_event(&handler, &payment_event()).unwrap();
        assert!(handler.called.load(std::sync::atomic::Ordering::SeqCst));
    }

    #[test]
    fn test_dispatch_unknown_never_errors() {
        let event = WebhookEvent {
            kind: WebhookEventKind::Unknown("order.paid".to_string()),
            payload: json!({}),
        };

        dispatch_webhook_event(&LoggingWebhookHandler, &event).unwrap();
    }
}
