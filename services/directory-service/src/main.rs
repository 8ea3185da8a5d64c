// Entry point for the VidhiSahayak Directory Service
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod catalog;
mod config;
mod domain;
mod error;
mod handlers;
mod repositories;
mod routes;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "directory_service=debug,shared=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("📇 Starting VidhiSahayak - Directory Service");

    let config = config::AppConfig::from_env()
        .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))?;

    let state = config::AppState::new(config)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to initialize app state: {}", e))?;
    tracing::info!("✅ Application state initialized");

    if state.db.is_none() {
        tracing::warn!(
            "⚠️ No database, lawyer listings use the {} built-in profiles",
            catalog::LAWYERS.len()
        );
    }

    tracing::info!("🌍 Environment: {}", state.config.environment);
    if state.config.is_production() {
        tracing::warn!("🚨 Running in PRODUCTION mode");
    }

    let addr = format!("{}:{}", state.config.host(), state.config.port());
    let app = routes::create_router(state);

    tracing::info!("🎯 Directory Service listening on {}", addr);
    tracing::info!("📚 API Documentation:");
    tracing::info!("   - Swagger UI: http://{}/docs", addr);
    tracing::info!("   - ReDoc: http://{}/redoc", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("👋 Directory Service shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
    tracing::info!("🛑 Received shutdown signal");
}
