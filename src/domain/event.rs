//! Typed view of the Stripe webhook payloads this service reacts to.
//!
//! Only the fields that drive routing and notifications are decoded. A
//! payload that passes signature verification but does not match this
//! shape is rejected with [`WebhookError::Malformed`].

use {
    super::error::WebhookError,
    super::id::{DiscordUserId, EventId, USER_METADATA_KEY},
    derive_more::Display,
    serde::Deserialize,
    std::collections::HashMap,
};

pub type Metadata = HashMap<String, String>;

#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum EventKind {
    #[display("charge.failed")]
    ChargeFailed,

    #[display("charge.succeeded")]
    ChargeSucceeded,

    #[display("charge.dispute.created")]
    ChargeDisputeCreated,

    #[display("checkout.session.completed")]
    CheckoutSessionCompleted,

    #[display("payment_link.created")]
    PaymentLinkCreated,

    #[display("{_0}")]
    Unknown(String),
}

impl From<&str> for EventKind {
    fn from(s: &str) -> Self {
        match s {
            "charge.failed" => Self::ChargeFailed,
            "charge.succeeded" => Self::ChargeSucceeded,
            "charge.dispute.created" => Self::ChargeDisputeCreated,
            "checkout.session.completed" => Self::CheckoutSessionCompleted,
            "payment_link.created" => Self::PaymentLinkCreated,
            other => Self::Unknown(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChargeOutcome {
    pub network_status: Option<String>,
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChargeFailed {
    pub id: String,
    pub failure_code: Option<String>,
    #[serde(default)]
    pub livemode: bool,
    pub outcome: Option<ChargeOutcome>,
    #[serde(default)]
    pub metadata: Option<Metadata>,
}

impl ChargeFailed {
    pub fn decline_reason(&self) -> Option<&str> {
        self.outcome.as_ref()?.reason.as_deref()
    }

    pub fn user_id(&self) -> Option<&str> {
        metadata_user(self.metadata.as_ref())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CustomerDetails {
    pub email: Option<String>,
    pub name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CheckoutSessionCompleted {
    pub id: String,
    pub payment_status: String,
    #[serde(default)]
    pub livemode: bool,
    #[serde(default)]
    pub metadata: Option<Metadata>,
    pub customer_details: Option<CustomerDetails>,
}

impl CheckoutSessionCompleted {
    pub fn user_id(&self) -> Option<&str> {
        metadata_user(self.metadata.as_ref())
    }

    pub fn customer_email(&self) -> Option<&str> {
        self.customer_details.as_ref()?.email.as_deref()
    }
}

#[derive(Debug, Clone)]
pub enum EventPayload {
    ChargeFailed(ChargeFailed),
    CheckoutSessionCompleted(CheckoutSessionCompleted),
    /// Event types that are only logged.
    Observed(serde_json::Value),
}

#[derive(Debug, Clone)]
pub struct WebhookEvent {
    pub id: EventId,
    pub kind: EventKind,
    pub created: i64,
    pub livemode: bool,
    pub payload: EventPayload,
}

#[derive(Deserialize)]
struct RawEvent {
    id: String,
    #[serde(rename = "type")]
    event_type: String,
    #[serde(default)]
    created: i64,
    #[serde(default)]
    livemode: bool,
    data: RawEventData,
}

#[derive(Deserialize)]
struct RawEventData {
    object: serde_json::Value,
}

impl WebhookEvent {
    /// Decode a verified payload into a typed event.
    pub fn decode(payload: &[u8]) -> Result<Self, WebhookError> {
        let raw: RawEvent = serde_json::from_slice(payload)
            .map_err(|e| WebhookError::Malformed(format!("event envelope: {e}")))?;
        let kind = EventKind::from(raw.event_type.as_str());

        let payload = match kind {
            EventKind::ChargeFailed => EventPayload::ChargeFailed(
                serde_json::from_value(raw.data.object)
                    .map_err(|e| WebhookError::Malformed(format!("{kind} object: {e}")))?,
            ),
            EventKind::CheckoutSessionCompleted => EventPayload::CheckoutSessionCompleted(
                serde_json::from_value(raw.data.object)
                    .map_err(|e| WebhookError::Malformed(format!("{kind} object: {e}")))?,
            ),
            _ => EventPayload::Observed(raw.data.object),
        };

        Ok(Self {
            id: EventId::new(raw.id)?,
            kind,
            created: raw.created,
            livemode: raw.livemode,
            payload,
        })
    }
}

fn metadata_user(metadata: Option<&Metadata>) -> Option<&str> {
    metadata?
        .get(USER_METADATA_KEY)
        .map(String::as_str)
        .filter(|id| !id.is_empty())
}

/// Parses the correlation id, if any, into a [`DiscordUserId`].
pub fn parse_user(raw: Option<&str>) -> Option<DiscordUserId> {
    raw.and_then(|id| id.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_charge_failed() {
        let body = serde_json::json!({
            "id": "evt_1",
            "type": "charge.failed",
            "created": 1_700_000_000,
            "livemode": false,
            "data": { "object": {
                "id": "ch_1",
                "failure_code": "card_declined",
                "livemode": false,
                "outcome": { "network_status": "declined_by_network", "reason": "insufficient_funds" },
                "metadata": { "discordId": "42" }
            }}
        });
        let event = WebhookEvent::decode(body.to_string().as_bytes()).unwrap();
        assert_eq!(event.kind, EventKind::ChargeFailed);
        let EventPayload::ChargeFailed(charge) = event.payload else {
            panic!("expected charge payload");
        };
        assert_eq!(charge.decline_reason(), Some("insufficient_funds"));
        assert_eq!(charge.user_id(), Some("42"));
    }

    #[test]
    fn unknown_types_are_observed() {
        let body = br#"{"id":"evt_2","type":"invoice.paid","data":{"object":{}}}"#;
        let event = WebhookEvent::decode(body).unwrap();
        assert_eq!(event.kind, EventKind::Unknown("invoice.paid".into()));
        assert_eq!(event.kind.to_string(), "invoice.paid");
        assert!(matches!(event.payload, EventPayload::Observed(_)));
    }

    #[test]
    fn checkout_without_payment_status_is_malformed() {
        let body = br#"{"id":"evt_3","type":"checkout.session.completed","data":{"object":{"id":"cs_test_1"}}}"#;
        assert!(matches!(
            WebhookEvent::decode(body),
            Err(WebhookError::Malformed(_))
        ));
    }

    #[test]
    fn null_metadata_has_no_user() {
        let body = br#"{"id":"evt_4","type":"checkout.session.completed","data":{"object":{"id":"cs_test_1","payment_status":"paid","metadata":null}}}"#;
        let event = WebhookEvent::decode(body).unwrap();
        let EventPayload::CheckoutSessionCompleted(session) = event.payload else {
            panic!("expected checkout payload");
        };
        assert_eq!(session.user_id(), None);
    }
}
