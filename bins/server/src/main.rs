//! Cashdesk API Server
//!
//! Main entry point for the cash register backend.

use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cashdesk_api::{AppState, create_router, store::InMemoryProvider};
use cashdesk_core::provider::CachedProvider;
use cashdesk_shared::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cashdesk=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = AppConfig::load()?;
    let timezone = config.cash.timezone()?;
    info!(
        currency = %config.cash.currency,
        %timezone,
        opening_balance = %config.cash.opening_balance,
        "Cash register configured"
    );

    // Provider with last-good-answer fallback
    let store = Arc::new(InMemoryProvider::new(timezone, config.cash.opening_balance));
    let provider = CachedProvider::with_config(store, config.cache.capacity, config.cache.ttl_secs);
    info!(
        capacity = config.cache.capacity,
        ttl_secs = config.cache.ttl_secs,
        "Fallback cache configured"
    );

    // Create application state
    let state = AppState::new(Arc::new(provider), config.cash.currency, timezone);

    // Create router
    let app = create_router(state);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
