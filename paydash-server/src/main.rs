//! Paydash Server
//!
//! Backend for the merchant payments dashboard: account confirmation
//! against the external auth service, merchant onboarding state, and the
//! dashboard data endpoints.

use std::sync::Arc;

use anyhow::Result;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use paydash_server::{
    routes, AppState, Config, HttpAuthGateway, HttpRateSource, InMemorySessionStore, SqliteStore,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "paydash_server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration; refuses to start without the external-service
    // credentials
    let config = Config::from_env()?;
    tracing::info!(auth_url = %config.auth_url, "Loaded configuration");

    // Merchant rows are durable; dashboard sessions are ephemeral
    let merchant_store = SqliteStore::open(&config.database_path)?;
    let auth = HttpAuthGateway::new(&config.auth_url, &config.auth_anon_key);
    let rates = HttpRateSource::new(&config.rates_url);

    let state = Arc::new(AppState::new(
        config.clone(),
        merchant_store,
        InMemorySessionStore::new(),
        auth,
        rates,
    ));

    // Create router
    let app = routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("Dashboard API listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
