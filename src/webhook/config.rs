//! Webhook Configuration
//!
//! The shared secret is loaded from the environment and never logged. All
//! other knobs have wire-contract defaults.

use crate::error::WebhookError;
use crate::webhook::signature::{SignatureVerifier, TIMESTAMP_TOLERANCE_SECS};

/// Environment variable holding the shared webhook secret
pub const SECRET_ENV_VAR: &str = "PAYHOOK_WEBHOOK_SECRET";

/// Configuration for the webhook receiver
#[derive(Clone)]
pub struct WebhookConfig {
    /// Shared signing secret, `whsec_`-prefixed base64 or raw
    pub secret: String,
    /// Allowed clock skew in seconds, each direction
    pub tolerance_secs: i64,
}

impl WebhookConfig {
    /// Load configuration from the environment.
    ///
    /// Requires `PAYHOOK_WEBHOOK_SECRET`; fails fast with
    /// [`WebhookError::Configuration`] when it is missing or empty.
    pub fn from_env() -> Result<Self, WebhookError> {
        let secret = std::env::var(SECRET_ENV_VAR).map_err(|_| {
            WebhookError::configuration(format!("{SECRET_ENV_VAR} must be set"))
        })?;
        if secret.is_empty() {
            return Err(WebhookError::configuration(format!(
                "{SECRET_ENV_VAR} must not be empty"
            )));
        }
        Ok(Self {
            secret,
            tolerance_secs: TIMESTAMP_TOLERANCE_SECS,
        })
    }

    /// Build the signature verifier for this configuration
    pub fn verifier(&self) -> Result<SignatureVerifier, WebhookError> {
        Ok(SignatureVerifier::new(&self.secret)?.with_tolerance(self.tolerance_secs))
    }

    /// Configuration with a fixed secret for tests
    pub fn test_config() -> Self {
        Self {
            secret: "whsec_dGVzdHNlY3JldA==".to_string(),
            tolerance_secs: TIMESTAMP_TOLERANCE_SECS,
        }
    }
}

impl std::fmt::Debug for WebhookConfig {
    // Secret is redacted; only its form is shown.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebhookConfig")
            .field("secret", &"<redacted>")
            .field("tolerance_secs", &self.tolerance_secs)
            .finish()
    }
}
