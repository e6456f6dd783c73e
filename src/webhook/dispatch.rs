//! Event Dispatch
//!
//! Fans a validated [`WebhookEvent`] out to caller-supplied async handlers.
//! The registry maps event types to at most one handler each, plus one
//! optional wildcard handler invoked for every event.
//!
//! # Ordering contract
//!
//! Dispatch is sequential: the wildcard handler runs first and is awaited to
//! completion, then the type-specific handler. Callers may rely on this for
//! side-effect sequencing (audit logging before business action). Handler
//! errors propagate immediately; a wildcard failure prevents the specific
//! handler from running, and a specific-handler failure does not undo the
//! wildcard's side effects. Redelivery is the sender's concern, so handlers
//! must be idempotent.

use std::collections::HashMap;
use std::future::Future;

use futures::future::BoxFuture;
use futures::FutureExt;

use crate::error::WebhookError;
use crate::webhook::events::{WebhookEvent, WebhookEventType};

type Handler = Box<dyn Fn(WebhookEvent) -> BoxFuture<'static, anyhow::Result<()>> + Send + Sync>;

/// Registry of async webhook handlers
///
/// Built once by the integrating application and shared across requests. The
/// dispatcher only reads it: handlers are invoked at most once per event, and
/// handlers for non-matching types are never invoked.
///
/// # Example
///
/// ```rust
/// use payhook::webhook::dispatch::WebhookHandlers;
/// use payhook::webhook::events::WebhookEventType;
///
/// let handlers = WebhookHandlers::new()
///     .on_any(|event| async move {
///         tracing::info!(event_type = %event.event_type, "webhook received");
///         Ok(())
///     })
///     .on(WebhookEventType::PaymentSucceeded, |event| async move {
///         // grant the purchase
///         let _ = event.business_id;
///         Ok(())
///     });
/// ```
#[derive(Default)]
pub struct WebhookHandlers {
    any: Option<Handler>,
    by_type: HashMap<WebhookEventType, Handler>,
}

impl WebhookHandlers {
    /// Create an empty registry. Dispatching against it is a no-op.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler for one event type.
    ///
    /// The handler receives its own clone of the event. Registering a second
    /// handler for the same type replaces the first.
    pub fn on<F, Fut>(mut self, event_type: WebhookEventType, handler: F) -> Self
    where
        F: Fn(WebhookEvent) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
    {
        self.by_type
            .insert(event_type, Box::new(move |event| handler(event).boxed()));
        self
    }

    /// Register the wildcard handler, invoked for every event before any
    /// type-specific handler.
    pub fn on_any<F, Fut>(mut self, handler: F) -> Self
    where
        F: Fn(WebhookEvent) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
    {
        self.any = Some(Box::new(move |event| handler(event).boxed()));
        self
    }

    /// Registry whose wildcard handler logs every event with structured
    /// fields. Useful as a serving default and in local development.
    pub fn logging() -> Self {
        Self::new().on_any(|event| async move {
            tracing::info!(
                event_type = %event.event_type,
                business_id = %event.business_id,
                timestamp = %event.timestamp,
                "webhook event received"
            );
            Ok(())
        })
    }

    /// Check whether any handler (wildcard or specific) would run for the
    /// given event type
    pub fn handles(&self, event_type: WebhookEventType) -> bool {
        self.any.is_some() || self.by_type.contains_key(&event_type)
    }

    /// Dispatch an event: wildcard handler first, then the type-specific
    /// handler, each awaited to completion.
    ///
    /// Absent handlers are skipped silently. The first handler error aborts
    /// dispatch and surfaces as [`WebhookError::Handler`].
    pub async fn dispatch(&self, event: &WebhookEvent) -> Result<(), WebhookError> {
        if let Some(handler) = &self.any {
            handler(event.clone()).await.map_err(WebhookError::Handler)?;
        }
        if let Some(handler) = self.by_type.get(&event.event_type) {
            handler(event.clone()).await.map_err(WebhookError::Handler)?;
        }
        Ok(())
    }
}

impl std::fmt::Debug for WebhookHandlers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut types: Vec<&'static str> = self.by_type.keys().map(|t| t.as_str()).collect();
        types.sort_unstable();
        f.debug_struct("WebhookHandlers")
            .field("any", &self.any.is_some())
            .field("types", &types)
            .finish()
    }
}
