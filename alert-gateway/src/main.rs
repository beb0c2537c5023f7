use alert_core::catalog::ProviderCatalog;
use alert_gateway::routes::{self, AppState};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let bind = std::env::var("ALERTDECK_BIND").unwrap_or_else(|_| "0.0.0.0:8080".into());
    let api_token = std::env::var("ALERTDECK_API_TOKEN").ok();
    if api_token.is_none() {
        tracing::warn!("ALERTDECK_API_TOKEN not set, accepting unauthenticated pushes");
    }

    let state = AppState::new(ProviderCatalog::builtin(), api_token);
    let app = routes::router(state);

    let listener = tokio::net::TcpListener::bind(&bind)
        .await
        .expect("bind listener");
    tracing::info!(%bind, "alert-gateway listening");
    axum::serve(listener, app).await.expect("serve");
}
