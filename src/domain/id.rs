use {
    super::error::{PaymentError, WebhookError},
    derive_more::Display,
    serde::{Deserialize, Serialize},
    std::str::FromStr,
};

/// Metadata key carrying the Discord user id on Stripe objects.
pub const USER_METADATA_KEY: &str = "discordId";

/// Stripe event identifier (`evt_xxx`).
#[derive(Debug, Clone, PartialEq, Eq, Display, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(String);

impl EventId {
    pub fn new(id: impl Into<String>) -> Result<Self, WebhookError> {
        let id = id.into();
        if !id.starts_with("evt_") {
            return Err(WebhookError::Malformed(format!(
                "EventId must start with evt_, got: {id}"
            )));
        }
        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Discord snowflake of the user a checkout belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DiscordUserId(u64);

impl DiscordUserId {
    pub fn new(id: u64) -> Result<Self, PaymentError> {
        if id == 0 {
            return Err(PaymentError::Validation(
                "DiscordUserId cannot be zero".into(),
            ));
        }
        Ok(Self(id))
    }

    pub fn get(&self) -> u64 {
        self.0
    }
}

impl FromStr for DiscordUserId {
    type Err = PaymentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let id = s.trim().parse::<u64>().map_err(|e| {
            PaymentError::Validation(format!("DiscordUserId must be a snowflake, got {s:?}: {e}"))
        })?;
        Self::new(id)
    }
}
