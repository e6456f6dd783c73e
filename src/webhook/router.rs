//! Webhook HTTP Endpoint
//!
//! The axum serving surface for the receiver. One POST route runs the full
//! verify -> parse -> dispatch pipeline against shared state; a health route
//! serves liveness probes.
//!
//! # Architecture
//!
//! ```text
//! POST /webhook ──> verify signature ──> parse event ──> dispatch handlers
//!        │                │                   │                 │
//!        ▼                ▼                   ▼                 ▼
//!      200 OK        401 Unauthorized    400 Bad Request   500 Internal
//! ```
//!
//! The raw body bytes are verified exactly as received. Extracting the body
//! as anything other than raw text before verification would break the MAC.

use std::sync::Arc;

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{VerificationError, WebhookError};
use crate::webhook::dispatch::WebhookHandlers;
use crate::webhook::signature::SignatureVerifier;

/// Shared state for the webhook routes
pub struct WebhookState {
    /// Verifier holding the shared secret
    pub verifier: SignatureVerifier,
    /// Handler registry supplied by the integrating application
    pub handlers: WebhookHandlers,
}

impl WebhookState {
    /// Bundle a verifier and handler registry into serving state
    pub fn new(verifier: SignatureVerifier, handlers: WebhookHandlers) -> Self {
        Self { verifier, handlers }
    }
}

/// Health check response for liveness probes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Health status (always "healthy" if responding)
    pub status: String,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self {
            status: "healthy".to_string(),
        }
    }
}

/// Build the webhook router.
///
/// Routes:
/// - `POST /webhook` — signature-verified event intake
/// - `GET /health` — liveness probe
pub fn webhook_router(state: Arc<WebhookState>) -> Router {
    Router::new()
        .route("/webhook", post(webhook_handler))
        .route("/health", get(health_handler))
        .with_state(state)
}

/// Liveness probe handler
async fn health_handler() -> impl IntoResponse {
    Json(HealthResponse::default())
}

/// Webhook intake handler: verify, parse, dispatch, map errors to status
/// codes.
///
/// The body is taken as `String` so the exact received bytes reach the
/// verifier.
async fn webhook_handler(
    State(state): State<Arc<WebhookState>>,
    headers: HeaderMap,
    body: String,
) -> impl IntoResponse {
    // Non-UTF-8 header values cannot match the required headers anyway.
    let header_pairs = headers
        .iter()
        .filter_map(|(name, value)| value.to_str().ok().map(|v| (name.as_str(), v)));

    match crate::webhook::process(&state.verifier, &state.handlers, body.as_bytes(), header_pairs)
        .await
    {
        Ok(event) => {
            info!(
                event_type = %event.event_type,
                business_id = %event.business_id,
                "webhook processed"
            );
            StatusCode::OK.into_response()
        }
        Err(err) => {
            let status = status_for(&err);
            warn!(status = %status, error = %err, "webhook rejected");
            (status, err.to_string()).into_response()
        }
    }
}

/// Map a pipeline error to its HTTP status.
///
/// Signature failures are 401 so the sender's retry machinery backs off on
/// auth problems; a verified-but-malformed body and schema failures are the
/// sender's bug, 400; handler failures are ours, 500, which asks the sender
/// to redeliver.
fn status_for(err: &WebhookError) -> StatusCode {
    match err {
        WebhookError::Verification(VerificationError::InvalidJson(_)) => StatusCode::BAD_REQUEST,
        WebhookError::Verification(_) => StatusCode::UNAUTHORIZED,
        WebhookError::Validation(_) => StatusCode::BAD_REQUEST,
        WebhookError::Handler(_) | WebhookError::Configuration(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}
