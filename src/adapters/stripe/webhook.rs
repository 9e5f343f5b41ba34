use {
    crate::{
        AppState,
        adapters::{api_errors::ApiError, stripe::signature::construct_event},
        domain::error::WebhookError,
        services::webhook_dispatch::dispatch,
    },
    axum::{
        body::Bytes,
        extract::State,
        http::{HeaderMap, StatusCode},
    },
    std::sync::Arc,
    tracing::Instrument,
};

#[tracing::instrument(
    name = "webhook",
    skip_all,
    fields(event_id = tracing::field::Empty, event_type = tracing::field::Empty)
)]
pub async fn wh_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<StatusCode, ApiError> {
    let sig = headers
        .get("Stripe-Signature")
        .ok_or(WebhookError::MissingSignature)?
        .to_str()
        .map_err(|e| WebhookError::InvalidSignature(format!("header encoding: {e}")))?;

    let event = construct_event(&body, sig, &state.stripe_webhook_secret)?;

    tracing::Span::current()
        .record("event_id", tracing::field::display(&event.id))
        .record("event_type", tracing::field::display(&event.kind));

    // Delivery is detached from the response.
    let notifier = Arc::clone(&state.notifier);
    let on_error = state.on_notify_error.clone();
    tokio::spawn(
        async move {
            let outcome = dispatch(notifier.as_ref(), on_error.as_ref(), &event).await;
            tracing::debug!(?outcome, livemode = event.livemode, "webhook dispatched");
        }
        .in_current_span(),
    );

    Ok(StatusCode::OK)
}
