use crate::domain::{
    error::NotifyError,
    event::{EventKind, EventPayload, WebhookEvent, parse_user},
    notify::{CompletedCheckout, DeclinedCharge, NotifyErrorHook, Notifier},
};

pub const DECLINED_FAILURE_CODE: &str = "card_declined";
pub const INSUFFICIENT_FUNDS_REASON: &str = "insufficient_funds";
pub const PAID_STATUS: &str = "paid";

/// What a verified event should cause.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    CardDeclined(DeclinedCharge),
    CheckoutCompleted(CompletedCheckout),
    /// Known type, no effect beyond logging.
    Observed(EventKind),
    /// Matched a notifying type but failed one of its conditions.
    Skipped {
        kind: EventKind,
        reason: &'static str,
    },
    Unhandled(EventKind),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    Notified,
    NotificationFailed,
    Ignored,
}

pub fn route(event: &WebhookEvent) -> Route {
    match &event.payload {
        EventPayload::ChargeFailed(charge) => {
            if charge.failure_code.as_deref() != Some(DECLINED_FAILURE_CODE) {
                return skipped(&event.kind, "failure code is not card_declined");
            }
            if charge.decline_reason() != Some(INSUFFICIENT_FUNDS_REASON) {
                return skipped(&event.kind, "decline reason is not insufficient_funds");
            }
            let Some(user_id) = parse_user(charge.user_id()) else {
                return skipped(&event.kind, "metadata has no valid discordId");
            };
            Route::CardDeclined(DeclinedCharge {
                user_id,
                charge_id: charge.id.clone(),
                reason: INSUFFICIENT_FUNDS_REASON.to_string(),
                livemode: charge.livemode,
            })
        }
        EventPayload::CheckoutSessionCompleted(session) => {
            if session.payment_status != PAID_STATUS {
                return skipped(&event.kind, "payment status is not paid");
            }
            let Some(user_id) = parse_user(session.user_id()) else {
                return skipped(&event.kind, "metadata has no valid discordId");
            };
            Route::CheckoutCompleted(CompletedCheckout {
                user_id,
                session_id: session.id.clone(),
                customer_email: session.customer_email().map(str::to_string),
                livemode: session.livemode,
            })
        }
        EventPayload::Observed(_) => match event.kind {
            EventKind::Unknown(_) => Route::Unhandled(event.kind.clone()),
            _ => Route::Observed(event.kind.clone()),
        },
    }
}

fn skipped(kind: &EventKind, reason: &'static str) -> Route {
    Route::Skipped {
        kind: kind.clone(),
        reason,
    }
}

/// Route the event and run its effect. Notification failures are logged and
/// handed to `on_error`; they never surface to the caller.
pub async fn dispatch(
    notifier: &dyn Notifier,
    on_error: Option<&NotifyErrorHook>,
    event: &WebhookEvent,
) -> DispatchOutcome {
    let result = match route(event) {
        Route::CardDeclined(charge) => {
            tracing::info!(user_id = %charge.user_id, charge_id = %charge.charge_id, "card declined, notifying");
            notifier.card_declined(&charge).await
        }
        Route::CheckoutCompleted(checkout) => {
            tracing::info!(user_id = %checkout.user_id, session_id = %checkout.session_id, "checkout completed, notifying");
            notifier.checkout_completed(&checkout).await
        }
        Route::Observed(kind) => {
            tracing::info!(event_type = %kind, "event observed");
            return DispatchOutcome::Ignored;
        }
        Route::Skipped { kind, reason } => {
            tracing::info!(event_type = %kind, reason, "event skipped");
            return DispatchOutcome::Ignored;
        }
        Route::Unhandled(kind) => {
            tracing::info!(event_type = %kind, "unhandled event");
            return DispatchOutcome::Ignored;
        }
    };

    match result {
        Ok(()) => DispatchOutcome::Notified,
        Err(e) => {
            report(on_error, &e);
            DispatchOutcome::NotificationFailed
        }
    }
}

fn report(on_error: Option<&NotifyErrorHook>, error: &NotifyError) {
    tracing::warn!(error = %error, "notification not delivered");
    if let Some(hook) = on_error {
        hook(error);
    }
}
