use {
    super::error::NotifyError,
    super::id::DiscordUserId,
    std::{future::Future, pin::Pin, sync::Arc},
};

pub type NotifyFuture<'a> = Pin<Box<dyn Future<Output = Result<(), NotifyError>> + Send + 'a>>;

/// Operator callback invoked for every notification that could not be delivered.
pub type NotifyErrorHook = Arc<dyn Fn(&NotifyError) + Send + Sync>;

/// A charge declined for insufficient funds, ready to announce.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclinedCharge {
    pub user_id: DiscordUserId,
    pub charge_id: String,
    pub reason: String,
    pub livemode: bool,
}

/// A paid checkout session, ready to announce.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletedCheckout {
    pub user_id: DiscordUserId,
    pub session_id: String,
    pub customer_email: Option<String>,
    pub livemode: bool,
}

/// Best-effort delivery of payment notifications to chat.
///
/// Delivery is not guaranteed: callers log failures and move on, nothing
/// is retried.
pub trait Notifier: Send + Sync {
    fn card_declined(&self, charge: &DeclinedCharge) -> NotifyFuture<'_>;

    fn checkout_completed(&self, checkout: &CompletedCheckout) -> NotifyFuture<'_>;
}
