//! Error types for payhook
//!
//! This module provides the error type hierarchy using `thiserror`. The split
//! mirrors the HTTP semantics webhook receivers care about: verification
//! failures (unauthenticated sender), validation failures (authenticated but
//! malformed payload), handler failures (integration code), and configuration
//! failures (fatal at startup).

use thiserror::Error;

/// The main error type for payhook operations
#[derive(Error, Debug)]
pub enum WebhookError {
    /// Signature verification failed; the request is not proven to come from
    /// the payments platform. Maps to HTTP 401.
    #[error("verification failed: {0}")]
    Verification(#[from] VerificationError),

    /// The verified payload does not match any known event schema.
    /// Maps to HTTP 400.
    #[error("payload validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// A user-supplied handler returned an error. Propagated unmodified so
    /// the caller can decide retry semantics; maps to HTTP 500.
    #[error("handler failed: {0}")]
    Handler(#[source] anyhow::Error),

    /// Invalid configuration (empty secret, undecodable secret, missing
    /// environment). Fatal before any request is processed.
    #[error("configuration error: {0}")]
    Configuration(String),
}

/// Signature verification errors
///
/// Every variant means the inbound request must be rejected without invoking
/// any handler. Display strings are part of the receiver contract and are
/// asserted in tests.
#[derive(Error, Debug)]
pub enum VerificationError {
    /// One or more of `webhook-id`, `webhook-timestamp`, `webhook-signature`
    /// is absent
    #[error("missing required headers")]
    MissingHeaders,

    /// The timestamp header is present but not a decimal integer
    #[error("invalid signature headers")]
    InvalidHeaders,

    /// Timestamp is more than the tolerance window behind current time
    #[error("message timestamp too old")]
    TimestampTooOld,

    /// Timestamp is more than the tolerance window ahead of current time
    #[error("message timestamp too new")]
    TimestampTooNew,

    /// No `v1` signature token matched the recomputed MAC
    #[error("no matching signature found")]
    NoMatchingSignature,

    /// Signature matched but the body is not valid JSON
    #[error("payload is not valid JSON: {0}")]
    InvalidJson(#[source] serde_json::Error),
}

/// Event payload validation errors
#[derive(Error, Debug)]
pub enum ValidationError {
    /// The payload does not deserialize into any of the known event shapes.
    /// Carries the serde diagnostic (field path and message).
    #[error("event does not match any known schema: {0}")]
    Schema(String),

    /// `data.payload_type` names a different entity family than the one
    /// implied by the event `type`
    #[error("data.payload_type is {actual} but event type implies {expected}")]
    FamilyMismatch {
        /// Family implied by the event `type` discriminant
        expected: crate::webhook::events::EventFamily,
        /// Family named by `data.payload_type`
        actual: crate::webhook::events::EventFamily,
    },
}

/// Result type alias for payhook operations
pub type Result<T> = std::result::Result<T, WebhookError>;

impl WebhookError {
    /// Create a configuration error from a string
    pub fn configuration<S: Into<String>>(msg: S) -> Self {
        WebhookError::Configuration(msg.into())
    }
}
