use crate::domain::error::WebhookError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

/// Newtype so the webhook error can implement axum's `IntoResponse`.
pub struct ApiError(pub WebhookError);

impl From<WebhookError> for ApiError {
    fn from(err: WebhookError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (error_code, message) = match &self.0 {
            WebhookError::MissingSignature => {
                tracing::warn!("webhook rejected: missing signature");
                return StatusCode::UNAUTHORIZED.into_response();
            }
            WebhookError::InvalidSignature(_) | WebhookError::TimestampTolerance { .. } => {
                tracing::warn!(error = %self.0, "webhook rejected");
                ("webhook_error", "invalid webhook signature")
            }
            WebhookError::Malformed(_) => {
                tracing::warn!(error = %self.0, "webhook rejected");
                ("malformed_event", "event payload could not be decoded")
            }
        };

        let body = serde_json::json!({
            "error_code": error_code,
            "message": message,
        });

        (StatusCode::BAD_REQUEST, Json(body)).into_response()
    }
}
