use thiserror::Error;

#[derive(Debug, Error)]
pub enum PaymentError {
    #[error("validation: {0}")]
    Validation(String),

    #[error("provider: {0}")]
    Provider(String),
}

#[derive(Debug, Error)]
pub enum WebhookError {
    #[error("missing Stripe-Signature header")]
    MissingSignature,

    #[error("webhook signature: {0}")]
    InvalidSignature(String),

    #[error("timestamp {timestamp} outside tolerance of {tolerance}s (now {now})")]
    TimestampTolerance {
        timestamp: i64,
        now: i64,
        tolerance: u64,
    },

    #[error("malformed payload: {0}")]
    Malformed(String),
}

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("failed to look up user {user_id}: {reason}")]
    UserLookup { user_id: u64, reason: String },

    #[error("failed to deliver to channel {channel_id}: {reason}")]
    Delivery { channel_id: u64, reason: String },
}

#[derive(Debug, Error)]
pub enum PurchaseError {
    #[error("price {0} not found")]
    PriceUnavailable(String),

    #[error("price {0} has no product")]
    ProductUnavailable(String),

    #[error("checkout session could not be created")]
    CheckoutUnavailable,

    #[error(transparent)]
    Payment(#[from] PaymentError),
}
