// Entry point for the VidhiSahayak Assistant Service
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod domain;
mod error;
mod handlers;
mod prompt;
mod providers;
mod repositories;
mod routes;
mod tts;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "assistant_service=debug,shared=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("⚖️ Starting VidhiSahayak - Assistant Service");

    let config = config::AppConfig::from_env()
        .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))?;

    tracing::info!("🔌 Initializing application state...");
    let state = config::AppState::new(config)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to initialize app state: {}", e))?;
    tracing::info!("✅ Application state initialized");

    let providers = state.providers.status();
    tracing::info!(
        "🤖 {} provider(s) - Gemini: {}, Perplexity: {}, OpenAI: {}",
        state.providers.len(),
        providers.gemini_configured,
        providers.perplexity_configured,
        providers.openai_configured
    );
    if state.providers.is_empty() {
        tracing::warn!("⚠️ No LLM provider configured, chat will answer with the canned reply");
    }
    if !state.tts.is_configured() {
        tracing::warn!("⚠️ GOOGLE_TTS_API_KEY not set, /api/tts will reject requests");
    }

    tracing::info!("🌍 Environment: {}", state.config.environment);
    if state.config.is_production() {
        tracing::warn!("🚨 Running in PRODUCTION mode");
    } else {
        tracing::info!("🧪 Running in DEVELOPMENT mode");
    }

    let addr = format!("{}:{}", state.config.host(), state.config.port());
    let app = routes::create_router(state);

    tracing::info!("🎯 Assistant Service listening on {}", addr);
    tracing::info!("📚 API Documentation:");
    tracing::info!("   - Swagger UI: http://{}/docs", addr);
    tracing::info!("   - ReDoc: http://{}/redoc", addr);
    tracing::info!("   - Health Check: http://{}/health", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("👋 Assistant Service shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
    tracing::info!("🛑 Received shutdown signal");
}
