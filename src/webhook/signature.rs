//! Webhook Signature Verification
//!
//! Symmetric HMAC-SHA256 message signing and verification for inbound
//! webhooks. The sender signs `"{id}.{timestamp}.{body}"` with a shared
//! secret and attaches the MAC as a versioned, base64-encoded header token.
//! The receiver recomputes the MAC and compares in constant time.
//!
//! # Security
//!
//! - Constant-time signature comparison (`subtle`) to prevent timing attacks
//! - Timestamp tolerance window (±300s) to bound replay exposure
//! - The raw body must be verified byte-for-byte as received; re-serializing
//!   JSON before verification breaks the MAC

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use chrono::Utc;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

use crate::error::{VerificationError, WebhookError};

type HmacSha256 = Hmac<Sha256>;

/// Header carrying the opaque message id
pub const ID_HEADER: &str = "webhook-id";

/// Header carrying the signing timestamp (decimal unix seconds)
pub const TIMESTAMP_HEADER: &str = "webhook-timestamp";

/// Header carrying one or more space-separated `v1,<base64-mac>` tokens
pub const SIGNATURE_HEADER: &str = "webhook-signature";

/// Allowed clock skew in either direction, in seconds
pub const TIMESTAMP_TOLERANCE_SECS: i64 = 300;

/// Marker prefix for base64-encoded shared secrets
const SECRET_PREFIX: &str = "whsec_";

/// Signature scheme version emitted and accepted by this verifier
const SIGNATURE_VERSION: &str = "v1";

/// Verifies that inbound webhook payloads were signed by a holder of the
/// shared secret within the tolerance window.
///
/// Immutable once constructed; a single instance is safe to share across
/// concurrent requests.
///
/// # Example
///
/// ```rust
/// use payhook::webhook::signature::SignatureVerifier;
///
/// let verifier = SignatureVerifier::new("whsec_dGVzdHNlY3JldA==").unwrap();
/// let body = br#"{"hello":"world"}"#;
/// let sig = verifier.sign("msg_1", 1700000000, body);
/// assert!(sig.starts_with("v1,"));
/// ```
pub struct SignatureVerifier {
    key: Vec<u8>,
    tolerance_secs: i64,
}

impl SignatureVerifier {
    /// Create a verifier from a shared secret.
    ///
    /// A `whsec_`-prefixed secret is treated as base64: the prefix is
    /// stripped and the remainder decoded into the raw key. Any other
    /// non-empty string is used as raw key bytes.
    ///
    /// Fails with [`WebhookError::Configuration`] if the secret is empty or
    /// the prefixed form does not decode.
    pub fn new(secret: &str) -> Result<Self, WebhookError> {
        if secret.is_empty() {
            return Err(WebhookError::configuration(
                "webhook secret must not be empty",
            ));
        }

        let key = match secret.strip_prefix(SECRET_PREFIX) {
            Some(encoded) => BASE64.decode(encoded).map_err(|e| {
                WebhookError::configuration(format!("webhook secret is not valid base64: {e}"))
            })?,
            None => secret.as_bytes().to_vec(),
        };

        if key.is_empty() {
            return Err(WebhookError::configuration(
                "webhook secret must not be empty",
            ));
        }

        Ok(Self {
            key,
            tolerance_secs: TIMESTAMP_TOLERANCE_SECS,
        })
    }

    /// Override the tolerance window. Intended for configuration plumbing;
    /// the wire default is ±300s.
    pub fn with_tolerance(mut self, tolerance_secs: i64) -> Self {
        self.tolerance_secs = tolerance_secs;
        self
    }

    /// Sign a message, producing a `"v1,<base64-mac>"` token.
    ///
    /// The canonical signing string is `"{id}.{timestamp}.{payload}"` with
    /// the payload interpreted as UTF-8 text and the MAC base64-encoded with
    /// the standard alphabet.
    pub fn sign(&self, message_id: &str, timestamp: i64, payload: &[u8]) -> String {
        let signed_content = format!(
            "{}.{}.{}",
            message_id,
            timestamp,
            String::from_utf8_lossy(payload)
        );
        let mut mac =
            HmacSha256::new_from_slice(&self.key).expect("HMAC can take key of any size");
        mac.update(signed_content.as_bytes());
        format!(
            "{},{}",
            SIGNATURE_VERSION,
            BASE64.encode(mac.finalize().into_bytes())
        )
    }

    /// Verify a payload against the signature headers using the wall clock.
    ///
    /// `headers` is any iterable of name/value pairs; lookup is
    /// case-insensitive so framework header maps can be passed through
    /// unchanged. On success returns the parsed JSON body.
    pub fn verify<'a, I>(
        &self,
        payload: &[u8],
        headers: I,
    ) -> Result<serde_json::Value, VerificationError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        self.verify_at(payload, headers, Utc::now().timestamp())
    }

    /// Verify with an explicit current time in unix seconds.
    ///
    /// The router passes the wall clock; tests pin `now` to exercise the
    /// tolerance bounds exactly.
    pub fn verify_at<'a, I>(
        &self,
        payload: &[u8],
        headers: I,
        now_secs: i64,
    ) -> Result<serde_json::Value, VerificationError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut message_id = None;
        let mut timestamp_raw = None;
        let mut signature_header = None;

        for (name, value) in headers {
            if name.eq_ignore_ascii_case(ID_HEADER) {
                message_id = Some(value);
            } else if name.eq_ignore_ascii_case(TIMESTAMP_HEADER) {
                timestamp_raw = Some(value);
            } else if name.eq_ignore_ascii_case(SIGNATURE_HEADER) {
                signature_header = Some(value);
            }
        }

        let (Some(message_id), Some(timestamp_raw), Some(signature_header)) =
            (message_id, timestamp_raw, signature_header)
        else {
            return Err(VerificationError::MissingHeaders);
        };

        let timestamp: i64 = timestamp_raw
            .trim()
            .parse()
            .map_err(|_| VerificationError::InvalidHeaders)?;

        if now_secs - timestamp > self.tolerance_secs {
            return Err(VerificationError::TimestampTooOld);
        }
        if timestamp - now_secs > self.tolerance_secs {
            return Err(VerificationError::TimestampTooNew);
        }

        let expected = self.sign(message_id, timestamp, payload);
        let expected_mac = expected
            .split_once(',')
            .map(|(_, mac)| mac)
            .unwrap_or(&expected);

        for token in signature_header.split_whitespace() {
            let Some((version, candidate)) = token.split_once(',') else {
                continue;
            };
            if version != SIGNATURE_VERSION {
                continue;
            }
            // Length mismatch short-circuits inside ct_eq; length is not
            // secret, only the MAC bytes are.
            if candidate
                .as_bytes()
                .ct_eq(expected_mac.as_bytes())
                .unwrap_u8()
                == 1
            {
                return serde_json::from_slice(payload).map_err(VerificationError::InvalidJson);
            }
        }

        Err(VerificationError::NoMatchingSignature)
    }

    /// Build the three signature headers for a payload signed now.
    ///
    /// Sender-side helper used by tests and local tooling to produce a
    /// request the verifier accepts.
    pub fn signed_headers(
        &self,
        message_id: &str,
        timestamp: i64,
        payload: &[u8],
    ) -> [(String, String); 3] {
        [
            (ID_HEADER.to_string(), message_id.to_string()),
            (TIMESTAMP_HEADER.to_string(), timestamp.to_string()),
            (
                SIGNATURE_HEADER.to_string(),
                self.sign(message_id, timestamp, payload),
            ),
        ]
    }
}

impl std::fmt::Debug for SignatureVerifier {
    // The key must never appear in logs or panic output.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignatureVerifier")
            .field("key", &"<redacted>")
            .field("tolerance_secs", &self.tolerance_secs)
            .finish()
    }
}
