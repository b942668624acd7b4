use {
    crate::domain::error::ReconcileError,
    axum::{
        Json,
        http::StatusCode,
        response::{IntoResponse, Response},
    },
};

/// Newtype over the domain error so the HTTP mapping lives in the adapter
/// layer. The body matches the webhook response contract:
/// `{"success": false, "error": …}`.
pub struct ApiError(pub ReconcileError);

impl From<ReconcileError> for ApiError {
    fn from(err: ReconcileError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error) = match &self.0 {
            ReconcileError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ReconcileError::Provider(msg) => {
                tracing::error!("provider error: {msg}");
                (
                    StatusCode::BAD_GATEWAY,
                    "payment provider unavailable".to_string(),
                )
            }
            // Stock errors are handled per-variant inside the reconciler;
            // one escaping to here is an internal fault.
            ReconcileError::InsufficientStock { .. }
            | ReconcileError::VariantNotFound(_)
            | ReconcileError::Database(_)
            | ReconcileError::Serialization(_) => {
                tracing::error!("internal error: {}", self.0);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        };

        let body = serde_json::json!({
            "success": false,
            "error": error,
        });

        (status, Json(body)).into_response()
    }
}
