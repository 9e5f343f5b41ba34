pub mod adapters;
pub mod config;
pub mod domain;
pub mod services;

use {
    axum::{
        Router,
        extract::DefaultBodyLimit,
        http::StatusCode,
        routing::{get, post},
    },
    domain::notify::{Notifier, NotifyErrorHook},
    std::{sync::Arc, time::Duration},
    tower_http::timeout::TimeoutLayer,
};

#[derive(Clone)]
pub struct AppState {
    pub stripe_webhook_secret: Arc<str>,
    pub notifier: Arc<dyn Notifier>,
    pub on_notify_error: Option<NotifyErrorHook>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(|| async { "ok" }))
        .route("/webhook", post(adapters::stripe::webhook::wh_handler))
        .layer(DefaultBodyLimit::max(64 * 1024)) // Stripe events are typically <20 KB
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(10),
        ))
        .with_state(state)
}
