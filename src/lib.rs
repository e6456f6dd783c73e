//! Payhook - Payments Webhook Verification & Dispatch
//!
//! This crate provides a production-ready receiver for payments platform
//! webhooks: HMAC-SHA256 signature verification, a strongly-typed event
//! model, and async fan-out to application handlers.
//!
//! # Features
//!
//! - **Signature Verification**: versioned `v1,<mac>` tokens over a
//!   `{id}.{timestamp}.{body}` signing string, constant-time comparison,
//!   ±300s replay window
//! - **Typed Events**: closed discriminated union of 22 event types across
//!   the Payment, Subscription, Refund, Dispute, and LicenseKey families
//! - **Dispatch**: wildcard-then-specific sequential handler invocation with
//!   unmodified error propagation
//! - **Serving Shell**: axum router and `payhookd` binary mapping failures
//!   to 401/400/500
//!
//! # Architecture
//!
//! ```text
//! Platform ──POST──▶ Router ──▶ SignatureVerifier ──▶ WebhookEvent
//!                       │               │                  │
//!                       ▼               ▼                  ▼
//!                  401/400/500    constant-time       WebhookHandlers
//!                                 HMAC check          (wildcard, typed)
//! ```
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use payhook::webhook::events::WebhookEventType;
//! use payhook::webhook::{webhook_router, SignatureVerifier, WebhookHandlers, WebhookState};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let verifier = SignatureVerifier::new("whsec_dGVzdHNlY3JldA==")?;
//!     let handlers = WebhookHandlers::new()
//!         .on_any(|event| async move {
//!             tracing::info!(event_type = %event.event_type, "received");
//!             Ok(())
//!         })
//!         .on(WebhookEventType::PaymentSucceeded, |event| async move {
//!             // grant the purchase
//!             let _ = event.business_id;
//!             Ok(())
//!         });
//!
//!     let app = webhook_router(Arc::new(WebhookState::new(verifier, handlers)));
//!     let listener = tokio::net::TcpListener::bind("127.0.0.1:3001").await?;
//!     axum::serve(listener, app).await?;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod error;
pub mod webhook;

// Re-exports for convenience
pub use error::{Result, ValidationError, VerificationError, WebhookError};
pub use webhook::{
    SignatureVerifier, WebhookConfig, WebhookEvent, WebhookEventType, WebhookHandlers,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
