pub mod adapters;
pub mod domain;
pub mod infra;
pub mod services;

use {
    axum::{
        Router,
        extract::DefaultBodyLimit,
        routing::{get, post},
    },
    domain::provider::PaymentProvider,
    services::reconciler::Reconciler,
    std::{sync::Arc, time::Duration},
    tower::ServiceBuilder,
    tower_http::timeout::TimeoutLayer,
};

#[derive(Clone)]
pub struct AppState {
    pub provider: Arc<dyn PaymentProvider>,
    pub reconciler: Reconciler,
}

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(|| async { "ok" }))
        .route(
            "/webhook",
            post(adapters::webhook::webhook_handler).get(adapters::webhook::webhook_probe),
        )
        .route("/checkout", post(adapters::checkout::checkout_handler))
        .layer(
            ServiceBuilder::new()
                // Notification bodies are small; anything bigger is garbage.
                .layer(DefaultBodyLimit::max(64 * 1024))
                // The provider enforces its own retry envelope on webhook
                // calls; don't hold requests past it.
                .layer(TimeoutLayer::new(Duration::from_secs(25))),
        )
        .with_state(state)
}
