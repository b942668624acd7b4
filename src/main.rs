use {
    shop_sync::{
        AppState,
        adapters::mercadopago::MercadoPagoProvider,
        infra::postgres::{
            order_repo::PgOrderStore, user_repo::PgUserStore, variant_repo::PgVariantStore,
        },
        services::reconciler::Reconciler,
    },
    sqlx::postgres::PgPoolOptions,
    std::{env, sync::Arc, time::Duration},
    tokio::signal,
};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    dotenvy::dotenv().ok();
    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let access_token = env::var("MP_ACCESS_TOKEN").expect("MP_ACCESS_TOKEN must be set");
    let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());

    let pool = PgPoolOptions::new()
        .max_connections(20)
        .acquire_timeout(Duration::from_secs(3))
        .connect(&database_url)
        .await
        .expect("failed to connect to database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("failed to run migrations");

    let provider: Arc<dyn shop_sync::domain::provider::PaymentProvider> =
        Arc::new(MercadoPagoProvider::new(access_token));
    let reconciler = Reconciler::new(
        provider.clone(),
        Arc::new(PgUserStore::new(pool.clone())),
        Arc::new(PgOrderStore::new(pool.clone())),
        Arc::new(PgVariantStore::new(pool)),
    );

    let app = shop_sync::app(AppState {
        provider,
        reconciler,
    });

    let listener = tokio::net::TcpListener::bind(&bind_addr).await.unwrap();
    tracing::info!("listening on {bind_addr}");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .unwrap();
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c().await.expect("failed to listen for ctrl+c");
    };

    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to listen for SIGTERM")
            .recv()
            .await;
    };

    tokio::select! {
        _ = ctrl_c => tracing::info!("received ctrl+c, shutting down"),
        _ = terminate => tracing::info!("received SIGTERM, shutting down"),
    }
}
