//! Webhook Event Types
//!
//! Strongly-typed representations of the payments platform's webhook events.
//! The wire envelope is a discriminated union keyed by `type`; the `data`
//! object is itself tagged by `payload_type`, naming one of five entity
//! families. Parsing enforces that the two discriminants agree.
//!
//! Unknown `type` strings fail validation. The event set is closed: the
//! platform versions its webhook contract, so an unrecognized discriminant
//! means a contract mismatch the integrator must see, not silently drop.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// The closed set of webhook event types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WebhookEventType {
    /// Payment completed successfully
    #[serde(rename = "payment.succeeded")]
    PaymentSucceeded,
    /// Payment attempt failed
    #[serde(rename = "payment.failed")]
    PaymentFailed,
    /// Payment is being processed
    #[serde(rename = "payment.processing")]
    PaymentProcessing,
    /// Payment was cancelled before completion
    #[serde(rename = "payment.cancelled")]
    PaymentCancelled,

    /// Refund completed successfully
    #[serde(rename = "refund.succeeded")]
    RefundSucceeded,
    /// Refund attempt failed
    #[serde(rename = "refund.failed")]
    RefundFailed,

    /// Dispute opened against a payment
    #[serde(rename = "dispute.opened")]
    DisputeOpened,
    /// Dispute expired without response
    #[serde(rename = "dispute.expired")]
    DisputeExpired,
    /// Dispute accepted by the merchant
    #[serde(rename = "dispute.accepted")]
    DisputeAccepted,
    /// Dispute cancelled
    #[serde(rename = "dispute.cancelled")]
    DisputeCancelled,
    /// Dispute challenged by the merchant
    #[serde(rename = "dispute.challenged")]
    DisputeChallenged,
    /// Dispute resolved in the merchant's favor
    #[serde(rename = "dispute.won")]
    DisputeWon,
    /// Dispute resolved against the merchant
    #[serde(rename = "dispute.lost")]
    DisputeLost,

    /// Subscription became active
    #[serde(rename = "subscription.active")]
    SubscriptionActive,
    /// Subscription renewed for another period
    #[serde(rename = "subscription.renewed")]
    SubscriptionRenewed,
    /// Subscription placed on hold
    #[serde(rename = "subscription.on_hold")]
    SubscriptionOnHold,
    /// Subscription paused by the customer or merchant
    #[serde(rename = "subscription.paused")]
    SubscriptionPaused,
    /// Subscription moved to a different plan
    #[serde(rename = "subscription.plan_changed")]
    SubscriptionPlanChanged,
    /// Subscription cancelled
    #[serde(rename = "subscription.cancelled")]
    SubscriptionCancelled,
    /// Subscription payment failed
    #[serde(rename = "subscription.failed")]
    SubscriptionFailed,
    /// Subscription reached its end without renewal
    #[serde(rename = "subscription.expired")]
    SubscriptionExpired,

    /// License key issued for a completed purchase
    #[serde(rename = "license_key.created")]
    LicenseKeyCreated,
}

impl WebhookEventType {
    /// Every known event type, in wire order
    pub const ALL: [WebhookEventType; 22] = [
        Self::PaymentSucceeded,
        Self::PaymentFailed,
        Self::PaymentProcessing,
        Self::PaymentCancelled,
        Self::RefundSucceeded,
        Self::RefundFailed,
        Self::DisputeOpened,
        Self::DisputeExpired,
        Self::DisputeAccepted,
        Self::DisputeCancelled,
        Self::DisputeChallenged,
        Self::DisputeWon,
        Self::DisputeLost,
        Self::SubscriptionActive,
        Self::SubscriptionRenewed,
        Self::SubscriptionOnHold,
        Self::SubscriptionPaused,
        Self::SubscriptionPlanChanged,
        Self::SubscriptionCancelled,
        Self::SubscriptionFailed,
        Self::SubscriptionExpired,
        Self::LicenseKeyCreated,
    ];

    /// Get the wire string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PaymentSucceeded => "payment.succeeded",
            Self::PaymentFailed => "payment.failed",
            Self::PaymentProcessing => "payment.processing",
            Self::PaymentCancelled => "payment.cancelled",
            Self::RefundSucceeded => "refund.succeeded",
            Self::RefundFailed => "refund.failed",
            Self::DisputeOpened => "dispute.opened",
            Self::DisputeExpired => "dispute.expired",
            Self::DisputeAccepted => "dispute.accepted",
            Self::DisputeCancelled => "dispute.cancelled",
            Self::DisputeChallenged => "dispute.challenged",
            Self::DisputeWon => "dispute.won",
            Self::DisputeLost => "dispute.lost",
            Self::SubscriptionActive => "subscription.active",
            Self::SubscriptionRenewed => "subscription.renewed",
            Self::SubscriptionOnHold => "subscription.on_hold",
            Self::SubscriptionPaused => "subscription.paused",
            Self::SubscriptionPlanChanged => "subscription.plan_changed",
            Self::SubscriptionCancelled => "subscription.cancelled",
            Self::SubscriptionFailed => "subscription.failed",
            Self::SubscriptionExpired => "subscription.expired",
            Self::LicenseKeyCreated => "license_key.created",
        }
    }

    /// The entity family this event type carries in `data`
    pub fn family(&self) -> EventFamily {
        match self {
            Self::PaymentSucceeded
            | Self::PaymentFailed
            | Self::PaymentProcessing
            | Self::PaymentCancelled => EventFamily::Payment,
            Self::RefundSucceeded | Self::RefundFailed => EventFamily::Refund,
            Self::DisputeOpened
            | Self::DisputeExpired
            | Self::DisputeAccepted
            | Self::DisputeCancelled
            | Self::DisputeChallenged
            | Self::DisputeWon
            | Self::DisputeLost => EventFamily::Dispute,
            Self::SubscriptionActive
            | Self::SubscriptionRenewed
            | Self::SubscriptionOnHold
            | Self::SubscriptionPaused
            | Self::SubscriptionPlanChanged
            | Self::SubscriptionCancelled
            | Self::SubscriptionFailed
            | Self::SubscriptionExpired => EventFamily::Subscription,
            Self::LicenseKeyCreated => EventFamily::LicenseKey,
        }
    }
}

impl fmt::Display for WebhookEventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Entity family carried in the `data` object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventFamily {
    /// One-off payment
    Payment,
    /// Recurring subscription
    Subscription,
    /// Refund against a payment
    Refund,
    /// Chargeback dispute
    Dispute,
    /// Software license key
    LicenseKey,
}

impl EventFamily {
    /// The `payload_type` wire string for this family
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Payment => "Payment",
            Self::Subscription => "Subscription",
            Self::Refund => "Refund",
            Self::Dispute => "Dispute",
            Self::LicenseKey => "LicenseKey",
        }
    }
}

impl fmt::Display for EventFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A verified, validated webhook event
///
/// Constructed by parsing signature-verified wire bytes; immutable; discarded
/// after dispatch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookEvent {
    /// Identifier of the business the event belongs to
    pub business_id: String,

    /// Event type discriminant
    #[serde(rename = "type")]
    pub event_type: WebhookEventType,

    /// When the platform emitted the event
    pub timestamp: DateTime<Utc>,

    /// The entity the event describes, tagged by `payload_type`
    pub data: EventData,
}

impl WebhookEvent {
    /// Parse and validate an event from an already-verified JSON value.
    ///
    /// Fails with the serde diagnostic for structurally invalid payloads and
    /// unknown `type` strings, and with a family-mismatch error when
    /// `data.payload_type` disagrees with the family implied by `type`.
    pub fn from_value(value: serde_json::Value) -> Result<Self, ValidationError> {
        let event: Self =
            serde_json::from_value(value).map_err(|e| ValidationError::Schema(e.to_string()))?;
        let expected = event.event_type.family();
        let actual = event.data.family();
        if expected != actual {
            return Err(ValidationError::FamilyMismatch { expected, actual });
        }
        Ok(event)
    }

    /// Parse and validate an event from raw JSON bytes
    pub fn from_slice(bytes: &[u8]) -> Result<Self, ValidationError> {
        let value: serde_json::Value =
            serde_json::from_slice(bytes).map_err(|e| ValidationError::Schema(e.to_string()))?;
        Self::from_value(value)
    }
}

/// Event data, tagged by entity family
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "payload_type")]
pub enum EventData {
    /// Payment entity
    Payment(PaymentData),
    /// Subscription entity
    Subscription(SubscriptionData),
    /// Refund entity
    Refund(RefundData),
    /// Dispute entity
    Dispute(DisputeData),
    /// License key entity
    LicenseKey(LicenseKeyData),
}

impl EventData {
    /// The family named by `payload_type`
    pub fn family(&self) -> EventFamily {
        match self {
            Self::Payment(_) => EventFamily::Payment,
            Self::Subscription(_) => EventFamily::Subscription,
            Self::Refund(_) => EventFamily::Refund,
            Self::Dispute(_) => EventFamily::Dispute,
            Self::LicenseKey(_) => EventFamily::LicenseKey,
        }
    }
}

// =============================================================================
// Shared value objects
// =============================================================================

/// Reference to the customer an entity belongs to
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerRef {
    /// Customer ID
    pub customer_id: String,
    /// Customer email
    pub email: String,
    /// Customer display name
    pub name: String,
}

/// Billing address attached to a payment or subscription
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BillingAddress {
    /// City
    pub city: String,
    /// ISO country code
    pub country: String,
    /// State or province
    pub state: String,
    /// Street address
    pub street: String,
    /// Postal code
    pub zipcode: String,
}

// =============================================================================
// Payment
// =============================================================================

/// Payment entity
///
/// Amounts are integer minor units (cents for most currencies).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentData {
    /// Payment ID
    pub payment_id: String,
    /// Owning business ID
    pub business_id: String,
    /// Customer the payment belongs to
    pub customer: CustomerRef,
    /// Billing address
    pub billing: BillingAddress,
    /// Total charged amount in minor units
    pub total_amount: i64,
    /// ISO currency code
    pub currency: String,
    /// Payment status, if settled
    #[serde(default)]
    pub status: Option<PaymentStatus>,
    /// Payment method kind (card, wallet, ...)
    #[serde(default)]
    pub payment_method: Option<String>,
    /// Last four digits of the card, when paid by card
    #[serde(default)]
    pub card_last_four: Option<String>,
    /// Card network, when paid by card
    #[serde(default)]
    pub card_network: Option<String>,
    /// Subscription this payment renews, if any
    #[serde(default)]
    pub subscription_id: Option<String>,
    /// Payment link the customer used, if any
    #[serde(default)]
    pub payment_link: Option<String>,
    /// Refunds issued against this payment
    #[serde(default)]
    pub refunds: Vec<RefundData>,
    /// Disputes opened against this payment
    #[serde(default)]
    pub disputes: Vec<DisputeData>,
    /// When the payment was created
    pub created_at: DateTime<Utc>,
    /// Integrator-supplied metadata
    #[serde(default)]
    pub metadata: serde_json::Value,
}

/// Payment status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[allow(missing_docs)]
pub enum PaymentStatus {
    Succeeded,
    Failed,
    Cancelled,
    Processing,
    RequiresCustomerAction,
    RequiresPaymentMethod,
    RequiresConfirmation,
    /// Status string this library does not know; new statuses must not fail
    /// event parsing
    #[serde(other)]
    Unknown,
}

// =============================================================================
// Subscription
// =============================================================================

/// Subscription entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubscriptionData {
    /// Subscription ID
    pub subscription_id: String,
    /// Product being subscribed to
    pub product_id: String,
    /// Customer the subscription belongs to
    pub customer: CustomerRef,
    /// Billing address
    pub billing: BillingAddress,
    /// Subscription status
    pub status: SubscriptionStatus,
    /// Number of units subscribed
    #[serde(default = "default_quantity")]
    pub quantity: u32,
    /// Recurring pre-tax charge in minor units
    pub recurring_pre_tax_amount: i64,
    /// ISO currency code
    pub currency: String,
    /// Unit of the billing interval
    pub payment_frequency_interval: BillingInterval,
    /// Number of intervals between charges
    pub payment_frequency_count: u32,
    /// Unit of the overall subscription period
    pub subscription_period_interval: BillingInterval,
    /// Number of period intervals before expiry
    pub subscription_period_count: u32,
    /// Free trial length in days
    #[serde(default)]
    pub trial_period_days: u32,
    /// Next scheduled charge, if the subscription is still billing
    #[serde(default)]
    pub next_billing_date: Option<DateTime<Utc>>,
    /// Whether the subscription ends at the next billing date
    #[serde(default)]
    pub cancel_at_next_billing_date: bool,
    /// When the subscription was created
    pub created_at: DateTime<Utc>,
    /// Integrator-supplied metadata
    #[serde(default)]
    pub metadata: serde_json::Value,
}

fn default_quantity() -> u32 {
    1
}

/// Subscription status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[allow(missing_docs)]
pub enum SubscriptionStatus {
    Pending,
    Active,
    OnHold,
    Paused,
    Cancelled,
    Failed,
    Expired,
    #[serde(other)]
    Unknown,
}

impl SubscriptionStatus {
    /// Check if the subscription should be granted entitlements
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active)
    }

    /// Check if the subscription needs payment attention
    pub fn requires_payment_action(&self) -> bool {
        matches!(self, Self::OnHold | Self::Failed)
    }
}

/// Billing interval unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[allow(missing_docs)]
pub enum BillingInterval {
    Day,
    Week,
    Month,
    Year,
}

// =============================================================================
// Refund
// =============================================================================

/// Refund entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefundData {
    /// Refund ID
    pub refund_id: String,
    /// Payment being refunded
    pub payment_id: String,
    /// Owning business ID
    pub business_id: String,
    /// Refund status
    pub status: RefundStatus,
    /// Refunded amount in minor units; absent for full refunds settled
    /// without an explicit amount
    #[serde(default)]
    pub amount: Option<i64>,
    /// ISO currency code
    #[serde(default)]
    pub currency: Option<String>,
    /// Whether only part of the payment was refunded
    #[serde(default)]
    pub is_partial: bool,
    /// Free-text reason supplied by the merchant
    #[serde(default)]
    pub reason: Option<String>,
    /// When the refund was created
    pub created_at: DateTime<Utc>,
}

/// Refund status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[allow(missing_docs)]
pub enum RefundStatus {
    Succeeded,
    Failed,
    Pending,
    Review,
    #[serde(other)]
    Unknown,
}

// =============================================================================
// Dispute
// =============================================================================

/// Dispute entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisputeData {
    /// Dispute ID
    pub dispute_id: String,
    /// Payment under dispute
    pub payment_id: String,
    /// Owning business ID
    pub business_id: String,
    /// Disputed amount in minor units
    pub amount: i64,
    /// ISO currency code
    pub currency: String,
    /// Stage in the dispute process
    pub dispute_stage: DisputeStage,
    /// Current dispute status
    pub dispute_status: DisputeStatus,
    /// Network-provided remarks, if any
    #[serde(default)]
    pub remarks: Option<String>,
    /// When the dispute was opened
    pub created_at: DateTime<Utc>,
}

/// Stage in the dispute lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[allow(missing_docs)]
pub enum DisputeStage {
    PreDispute,
    Dispute,
    PreArbitration,
}

/// Dispute status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[allow(missing_docs)]
pub enum DisputeStatus {
    DisputeOpened,
    DisputeExpired,
    DisputeAccepted,
    DisputeCancelled,
    DisputeChallenged,
    DisputeWon,
    DisputeLost,
}

// =============================================================================
// License key
// =============================================================================

/// License key entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LicenseKeyData {
    /// License key ID
    pub id: String,
    /// Owning business ID
    pub business_id: String,
    /// Customer the key was issued to
    pub customer_id: String,
    /// Payment that purchased the key
    pub payment_id: String,
    /// Product the key unlocks
    pub product_id: String,
    /// The license key string itself
    pub key: String,
    /// Key status
    pub status: LicenseKeyStatus,
    /// Maximum allowed activations, if limited
    #[serde(default)]
    pub activations_limit: Option<u32>,
    /// Current number of activated instances
    #[serde(default)]
    pub instances_count: u32,
    /// Expiry, if the key expires
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
    /// When the key was created
    pub created_at: DateTime<Utc>,
}

/// License key status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[allow(missing_docs)]
pub enum LicenseKeyStatus {
    Active,
    Expired,
    Disabled,
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    pub(crate) fn payment_data_fixture() -> serde_json::Value {
        json!({
            "payload_type": "Payment",
            "payment_id": "pay_123",
            "business_id": "biz_123",
            "customer": {
                "customer_id": "cus_123",
                "email": "jo@example.com",
                "name": "Jo Doe"
            },
            "billing": {
                "city": "Berlin",
                "country": "DE",
                "state": "BE",
                "street": "Unter den Linden 1",
                "zipcode": "10117"
            },
            "total_amount": 2499,
            "currency": "EUR",
            "status": "succeeded",
            "created_at": "2026-08-01T10:00:00Z"
        })
    }

    pub(crate) fn subscription_data_fixture() -> serde_json::Value {
        json!({
            "payload_type": "Subscription",
            "subscription_id": "sub_123",
            "product_id": "prod_123",
            "customer": {
                "customer_id": "cus_123",
                "email": "jo@example.com",
                "name": "Jo Doe"
            },
            "billing": {
                "city": "Berlin",
                "country": "DE",
                "state": "BE",
                "street": "Unter den Linden 1",
                "zipcode": "10117"
            },
            "status": "active",
            "recurring_pre_tax_amount": 999,
            "currency": "EUR",
            "payment_frequency_interval": "month",
            "payment_frequency_count": 1,
            "subscription_period_interval": "year",
            "subscription_period_count": 1,
            "created_at": "2026-08-01T10:00:00Z"
        })
    }

    pub(crate) fn refund_data_fixture() -> serde_json::Value {
        json!({
            "payload_type": "Refund",
            "refund_id": "ref_123",
            "payment_id": "pay_123",
            "business_id": "biz_123",
            "status": "succeeded",
            "amount": 2499,
            "currency": "EUR",
            "created_at": "2026-08-01T10:00:00Z"
        })
    }

    pub(crate) fn dispute_data_fixture() -> serde_json::Value {
        json!({
            "payload_type": "Dispute",
            "dispute_id": "dsp_123",
            "payment_id": "pay_123",
            "business_id": "biz_123",
            "amount": 2499,
            "currency": "EUR",
            "dispute_stage": "dispute",
            "dispute_status": "dispute_opened",
            "created_at": "2026-08-01T10:00:00Z"
        })
    }

    pub(crate) fn license_key_data_fixture() -> serde_json::Value {
        json!({
            "payload_type": "LicenseKey",
            "id": "lic_123",
            "business_id": "biz_123",
            "customer_id": "cus_123",
            "payment_id": "pay_123",
            "product_id": "prod_123",
            "key": "ABCD-EFGH-IJKL-MNOP",
            "status": "active",
            "instances_count": 0,
            "created_at": "2026-08-01T10:00:00Z"
        })
    }

    pub(crate) fn data_fixture_for(family: EventFamily) -> serde_json::Value {
        match family {
            EventFamily::Payment => payment_data_fixture(),
            EventFamily::Subscription => subscription_data_fixture(),
            EventFamily::Refund => refund_data_fixture(),
            EventFamily::Dispute => dispute_data_fixture(),
            EventFamily::LicenseKey => license_key_data_fixture(),
        }
    }

    pub(crate) fn event_fixture(event_type: WebhookEventType) -> serde_json::Value {
        json!({
            "business_id": "biz_123",
            "type": event_type.as_str(),
            "timestamp": "2026-08-01T10:00:05Z",
            "data": data_fixture_for(event_type.family())
        })
    }

    #[test]
    fn test_all_has_22_distinct_types() {
        let mut strings: Vec<&str> = WebhookEventType::ALL.iter().map(|t| t.as_str()).collect();
        strings.sort_unstable();
        strings.dedup();
        assert_eq!(strings.len(), 22);
    }

    #[test]
    fn test_every_known_type_round_trips() {
        for event_type in WebhookEventType::ALL {
            let event = WebhookEvent::from_value(event_fixture(event_type))
                .unwrap_or_else(|e| panic!("{event_type} failed to parse: {e}"));
            assert_eq!(event.event_type, event_type);
            assert_eq!(event.data.family(), event_type.family());
            assert_eq!(event.business_id, "biz_123");
        }
    }

    #[test]
    fn test_type_string_serde_round_trip() {
        for event_type in WebhookEventType::ALL {
            let wire = serde_json::to_value(event_type).unwrap();
            assert_eq!(wire, json!(event_type.as_str()));
            let back: WebhookEventType = serde_json::from_value(wire).unwrap();
            assert_eq!(back, event_type);
        }
    }

    #[test]
    fn test_unknown_type_fails_validation() {
        let payload = json!({
            "business_id": "biz_123",
            "type": "payment.exploded",
            "timestamp": "2026-08-01T10:00:05Z",
            "data": payment_data_fixture()
        });
        let err = WebhookEvent::from_value(payload).unwrap_err();
        assert!(matches!(err, ValidationError::Schema(_)));
    }

    #[test]
    fn test_family_mismatch_fails_validation() {
        let payload = json!({
            "business_id": "biz_123",
            "type": "payment.succeeded",
            "timestamp": "2026-08-01T10:00:05Z",
            "data": refund_data_fixture()
        });
        let err = WebhookEvent::from_value(payload).unwrap_err();
        match err {
            ValidationError::FamilyMismatch { expected, actual } => {
                assert_eq!(expected, EventFamily::Payment);
                assert_eq!(actual, EventFamily::Refund);
            }
            other => panic!("expected family mismatch, got {other}"),
        }
    }

    #[test]
    fn test_missing_required_field_reports_diagnostic() {
        let mut payload = event_fixture(WebhookEventType::RefundSucceeded);
        payload["data"]
            .as_object_mut()
            .unwrap()
            .remove("refund_id");
        let err = WebhookEvent::from_value(payload).unwrap_err();
        assert!(err.to_string().contains("refund_id"), "got: {err}");
    }

    #[test]
    fn test_payment_with_nested_refund_and_dispute() {
        let mut data = payment_data_fixture();
        data["refunds"] = json!([refund_data_fixture()]);
        data["disputes"] = json!([dispute_data_fixture()]);
        let payload = json!({
            "business_id": "biz_123",
            "type": "payment.succeeded",
            "timestamp": "2026-08-01T10:00:05Z",
            "data": data
        });
        let event = WebhookEvent::from_value(payload).unwrap();
        let EventData::Payment(payment) = event.data else {
            panic!("expected payment data");
        };
        assert_eq!(payment.refunds.len(), 1);
        assert_eq!(payment.refunds[0].status, RefundStatus::Succeeded);
        assert_eq!(payment.disputes.len(), 1);
        assert_eq!(
            payment.disputes[0].dispute_status,
            DisputeStatus::DisputeOpened
        );
    }

    #[test]
    fn test_unknown_status_does_not_fail_event() {
        let mut data = payment_data_fixture();
        data["status"] = json!("some_future_status");
        let payload = json!({
            "business_id": "biz_123",
            "type": "payment.succeeded",
            "timestamp": "2026-08-01T10:00:05Z",
            "data": data
        });
        let event = WebhookEvent::from_value(payload).unwrap();
        let EventData::Payment(payment) = event.data else {
            panic!("expected payment data");
        };
        assert_eq!(payment.status, Some(PaymentStatus::Unknown));
    }

    #[test]
    fn test_subscription_status_helpers() {
        assert!(SubscriptionStatus::Active.is_active());
        assert!(!SubscriptionStatus::Paused.is_active());
        assert!(SubscriptionStatus::OnHold.requires_payment_action());
        assert!(!SubscriptionStatus::Active.requires_payment_action());
    }

    #[test]
    fn test_subscription_defaults() {
        let event =
            WebhookEvent::from_value(event_fixture(WebhookEventType::SubscriptionActive)).unwrap();
        let EventData::Subscription(sub) = event.data else {
            panic!("expected subscription data");
        };
        assert_eq!(sub.quantity, 1);
        assert_eq!(sub.trial_period_days, 0);
        assert!(!sub.cancel_at_next_billing_date);
        assert!(sub.next_billing_date.is_none());
    }

    #[test]
    fn test_from_slice_matches_from_value() {
        let payload = event_fixture(WebhookEventType::DisputeWon);
        let bytes = serde_json::to_vec(&payload).unwrap();
        let event = WebhookEvent::from_slice(&bytes).unwrap();
        assert_eq!(event.event_type, WebhookEventType::DisputeWon);
    }
}
