//! Webhook Receiver Core
//!
//! This module provides secure webhook handling for payments platform
//! integrations. It implements:
//!
//! - **Signature Verification**: HMAC-SHA256 validation of the
//!   `webhook-signature` header against the shared secret
//! - **Typed Events**: a closed discriminated union of 22 event types across
//!   five entity families
//! - **Dispatch**: sequential fan-out to a wildcard handler and a
//!   type-specific handler
//! - **HTTP Surface**: an axum router mapping the error taxonomy to status
//!   codes
//!
//! # Architecture
//!
//! ```text
//! Request -> Signature Verify -> Schema Validate -> Dispatch Handlers
//!                  |                    |                  |
//!                  v                    v                  v
//!                 401                  400          200 / 500 (handler)
//! ```
//!
//! Each request is processed independently; the only shared state is the
//! immutable signing key and the read-only handler registry, so one
//! [`WebhookState`](router::WebhookState) serves any number of concurrent
//! requests.
//!
//! # Security
//!
//! - Webhook signing secret loaded from the environment, never logged
//! - Constant-time signature comparison to prevent timing attacks
//! - Raw body verification so the MAC covers the exact received bytes
//!
//! # Example
//!
//! ```rust
//! use payhook::webhook::{self, SignatureVerifier, WebhookHandlers};
//! use payhook::webhook::events::WebhookEventType;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> anyhow::Result<()> {
//! let verifier = SignatureVerifier::new("whsec_dGVzdHNlY3JldA==")?;
//! let handlers = WebhookHandlers::new()
//!     .on(WebhookEventType::PaymentSucceeded, |event| async move {
//!         println!("payment for {}", event.business_id);
//!         Ok(())
//!     });
//!
//! // In a request handler, with raw body bytes and the request headers:
//! let body = br#"{}"#;
//! let headers = vec![("webhook-id", "msg_1")];
//! let outcome = webhook::process(&verifier, &handlers, body, headers).await;
//! assert!(outcome.is_err()); // missing signature headers
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod dispatch;
pub mod events;
pub mod router;
pub mod signature;

// Re-export commonly used items
pub use config::WebhookConfig;
pub use dispatch::WebhookHandlers;
pub use events::{EventData, EventFamily, WebhookEvent, WebhookEventType};
pub use router::{webhook_router, WebhookState};
pub use signature::SignatureVerifier;

use crate::error::WebhookError;

/// Run the full receiver pipeline: verify the signature, validate the event
/// schema, dispatch to handlers.
///
/// Failure at any stage short-circuits the remaining stages: handlers never
/// see an unverified or unvalidated payload. Returns the parsed event so
/// callers can log or correlate it.
pub async fn process<'a, I>(
    verifier: &SignatureVerifier,
    handlers: &WebhookHandlers,
    payload: &[u8],
    headers: I,
) -> Result<WebhookEvent, WebhookError>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let value = verifier.verify(payload, headers)?;
    let event = WebhookEvent::from_value(value)?;
    handlers.dispatch(&event).await?;
    Ok(event)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ValidationError, VerificationError};
    use crate::webhook::events::tests::event_fixture;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    fn verifier() -> SignatureVerifier {
        SignatureVerifier::new("whsec_dGVzdHNlY3JldA==").unwrap()
    }

    fn signed_headers(v: &SignatureVerifier, body: &[u8]) -> Vec<(String, String)> {
        let now = chrono::Utc::now().timestamp();
        v.signed_headers("msg_1", now, body).to_vec()
    }

    fn as_pairs(headers: &[(String, String)]) -> Vec<(&str, &str)> {
        headers
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect()
    }

    #[tokio::test]
    async fn test_pipeline_success() {
        let v = verifier();
        let calls = Arc::new(AtomicU32::new(0));
        let handlers = {
            let calls = calls.clone();
            WebhookHandlers::new().on(WebhookEventType::PaymentSucceeded, move |_| {
                let calls = calls.clone();
                async move {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok(())
                }
            })
        };

        let body = serde_json::to_vec(&event_fixture(WebhookEventType::PaymentSucceeded)).unwrap();
        let headers = signed_headers(&v, &body);

        let event = process(&v, &handlers, &body, as_pairs(&headers))
            .await
            .unwrap();
        assert_eq!(event.event_type, WebhookEventType::PaymentSucceeded);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_bad_signature_short_circuits_before_handlers() {
        let v = verifier();
        let calls = Arc::new(AtomicU32::new(0));
        let handlers = {
            let calls = calls.clone();
            WebhookHandlers::new().on_any(move |_| {
                let calls = calls.clone();
                async move {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok(())
                }
            })
        };

        let body = serde_json::to_vec(&event_fixture(WebhookEventType::PaymentSucceeded)).unwrap();
        let mut headers = signed_headers(&v, &body);
        headers[2].1 = "v1,Zm9yZ2VkZm9yZ2VkZm9yZ2VkZm9yZ2VkZm9yZ2U=".to_string();

        let err = process(&v, &handlers, &body, as_pairs(&headers))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            WebhookError::Verification(VerificationError::NoMatchingSignature)
        ));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_invalid_schema_short_circuits_before_handlers() {
        let v = verifier();
        let calls = Arc::new(AtomicU32::new(0));
        let handlers = {
            let calls = calls.clone();
            WebhookHandlers::new().on_any(move |_| {
                let calls = calls.clone();
                async move {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok(())
                }
            })
        };

        let body = br#"{"type":"payment.exploded","business_id":"biz_123"}"#;
        let headers = signed_headers(&v, body);

        let err = process(&v, &handlers, body, as_pairs(&headers))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            WebhookError::Validation(ValidationError::Schema(_))
        ));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }
}
