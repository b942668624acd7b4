use {
    crate::{
        AppState,
        adapters::api_errors::ApiError,
        domain::{notification::Notification, order::ReconcileOutcome},
    },
    axum::{Json, extract::State},
    chrono::Utc,
    serde::Serialize,
};

#[derive(Debug, Serialize)]
pub struct WebhookResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(rename = "ordersCreated", skip_serializing_if = "Option::is_none")]
    pub orders_created: Option<usize>,
}

impl WebhookResponse {
    fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            orders_created: None,
        }
    }
}

impl From<ReconcileOutcome> for WebhookResponse {
    fn from(outcome: ReconcileOutcome) -> Self {
        match outcome {
            ReconcileOutcome::NotPayment { topic } => {
                Self::ok(format!("not a payment notification: {topic}"))
            }
            ReconcileOutcome::Test => Self::ok("test notification acknowledged"),
            ReconcileOutcome::PaymentNotFound => {
                Self::ok("payment not found, nothing to reconcile")
            }
            ReconcileOutcome::NotApproved { status } => {
                Self::ok(format!("payment not approved: {status}"))
            }
            ReconcileOutcome::Duplicate => Self {
                success: true,
                message: Some("payment already processed".into()),
                orders_created: Some(0),
            },
            ReconcileOutcome::Processed { orders_created } => Self {
                success: true,
                message: None,
                orders_created: Some(orders_created),
            },
        }
    }
}

#[tracing::instrument(
    name = "webhook",
    skip_all,
    fields(kind = tracing::field::Empty, resource_id = tracing::field::Empty)
)]
pub async fn webhook_handler(
    State(state): State<AppState>,
    Json(body): Json<serde_json::Value>,
) -> Result<Json<WebhookResponse>, ApiError> {
    let Some(notification) = Notification::parse(&body) else {
        // Housekeeping notifications have shapes we don't know; acknowledge
        // them so the provider stops redelivering.
        tracing::warn!(body = %body, "unrecognized notification shape, acknowledging");
        return Ok(Json(WebhookResponse::ok("unrecognized notification format")));
    };

    tracing::Span::current()
        .record("kind", notification.kind.as_str())
        .record("resource_id", notification.resource_id.as_str());

    let outcome = state.reconciler.reconcile(&notification).await?;
    tracing::info!(?outcome, "notification handled");
    Ok(Json(WebhookResponse::from(outcome)))
}

/// Liveness probe: a GET on the webhook path confirms the endpoint is
/// reachable without touching any state.
pub async fn webhook_probe() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "message": "webhook endpoint is alive",
        "timestamp": Utc::now().to_rfc3339(),
    }))
}
