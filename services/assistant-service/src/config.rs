// Assistant Service configuration and shared application state
use serde::Serialize;
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;

use shared::db::{check_db_health, init_db_pool, run_migrations};
use shared::utils::env::{env_flag, env_list_or, env_opt, env_or, env_parse_or};
use shared::utils::http_client::{build_client, RetryPolicy};
use shared::utils::rate_limit::RateLimiter;

use crate::providers::gemini::{DEFAULT_GEMINI_API_BASE, DEFAULT_GEMINI_MODELS};
use crate::providers::openai_compat::{
    DEFAULT_OPENAI_API_BASE, DEFAULT_OPENAI_MODEL, DEFAULT_PERPLEXITY_API_BASE,
    DEFAULT_PERPLEXITY_MODEL,
};
use crate::providers::ProviderChain;
use crate::repositories::ChatRepository;
use crate::tts::{TtsClient, DEFAULT_TTS_API_BASE};

const DEFAULT_FRONTEND_URL: &str = "http://localhost:3000";

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct HealthCheckResponse {
    pub service: String,
    pub status: String,
    pub version: String,
    pub database: String,
    pub redis: String,
    pub providers: crate::domain::ProvidersStatus,
    pub tts: String,
    pub timestamp: String,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server_host: String,
    pub server_port: u16,
    pub environment: String,
    pub database_url: Option<String>,
    pub run_migrations: bool,
    pub redis_url: Option<String>,
    pub frontend_urls: Vec<String>,
    pub cors_max_age_seconds: u64,

    pub gemini_api_key: Option<String>,
    pub gemini_models: Vec<String>,
    pub gemini_api_base: String,
    pub perplexity_api_key: Option<String>,
    pub perplexity_model: String,
    pub perplexity_api_base: String,
    pub openai_api_key: Option<String>,
    pub openai_model: String,
    pub openai_api_base: String,

    pub llm_temperature: f32,
    pub llm_max_output_tokens: u32,
    pub llm_retry: RetryPolicy,
    pub chat_history_limit: i64,

    pub tts_api_key: Option<String>,
    pub tts_api_base: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server_host: "0.0.0.0".to_string(),
            server_port: 8081,
            environment: "development".to_string(),
            database_url: None,
            run_migrations: false,
            redis_url: None,
            frontend_urls: vec![DEFAULT_FRONTEND_URL.to_string()],
            cors_max_age_seconds: 86400,
            gemini_api_key: None,
            gemini_models: DEFAULT_GEMINI_MODELS.iter().map(|m| m.to_string()).collect(),
            gemini_api_base: DEFAULT_GEMINI_API_BASE.to_string(),
            perplexity_api_key: None,
            perplexity_model: DEFAULT_PERPLEXITY_MODEL.to_string(),
            perplexity_api_base: DEFAULT_PERPLEXITY_API_BASE.to_string(),
            openai_api_key: None,
            openai_model: DEFAULT_OPENAI_MODEL.to_string(),
            openai_api_base: DEFAULT_OPENAI_API_BASE.to_string(),
            llm_temperature: 0.2,
            llm_max_output_tokens: 400,
            llm_retry: RetryPolicy::default(),
            chat_history_limit: 10,
            tts_api_key: None,
            tts_api_base: DEFAULT_TTS_API_BASE.to_string(),
        }
    }
}

impl AppConfig {
    // Load configuration from environment variables; everything but the port has a default
    pub fn from_env() -> Result<Self, String> {
        let defaults = Self::default();

        let retries = env_parse_or("LLM_RATE_LIMIT_RETRIES", defaults.llm_retry.max_retries)?;
        let backoff_ms = env_parse_or("LLM_RATE_LIMIT_BACKOFF_MS", 2000u64)?;

        let llm_temperature = env_parse_or("LLM_TEMPERATURE", defaults.llm_temperature)?;
        if !(0.0..=2.0).contains(&llm_temperature) {
            return Err(format!("LLM_TEMPERATURE must be between 0 and 2, got {}", llm_temperature));
        }

        let chat_history_limit = env_parse_or("CHAT_HISTORY_LIMIT", defaults.chat_history_limit)?;
        if chat_history_limit < 1 {
            return Err("CHAT_HISTORY_LIMIT must be at least 1".to_string());
        }

        Ok(Self {
            server_host: env_or("ASSISTANT_SERVICE_HOST", &defaults.server_host),
            server_port: env_parse_or("ASSISTANT_SERVICE_PORT", defaults.server_port)?,
            environment: env_or("RUST_ENV", &defaults.environment),
            database_url: env_opt("DATABASE_URL"),
            run_migrations: env_flag("RUN_MIGRATIONS"),
            redis_url: env_opt("REDIS_URL"),
            frontend_urls: env_list_or("FRONTEND_URL", &[DEFAULT_FRONTEND_URL]),
            cors_max_age_seconds: env_parse_or("CORS_MAX_AGE_SECONDS", defaults.cors_max_age_seconds)?,
            gemini_api_key: env_opt("GEMINI_API_KEY"),
            gemini_models: env_list_or("GEMINI_MODELS", DEFAULT_GEMINI_MODELS),
            gemini_api_base: env_or("GEMINI_API_BASE", DEFAULT_GEMINI_API_BASE),
            perplexity_api_key: env_opt("PERPLEXITY_API_KEY"),
            perplexity_model: env_or("PERPLEXITY_MODEL", DEFAULT_PERPLEXITY_MODEL),
            perplexity_api_base: env_or("PERPLEXITY_API_BASE", DEFAULT_PERPLEXITY_API_BASE),
            openai_api_key: env_opt("OPENAI_API_KEY"),
            openai_model: env_or("OPENAI_MODEL", DEFAULT_OPENAI_MODEL),
            openai_api_base: env_or("OPENAI_API_BASE", DEFAULT_OPENAI_API_BASE),
            llm_temperature,
            llm_max_output_tokens: env_parse_or("LLM_MAX_OUTPUT_TOKENS", defaults.llm_max_output_tokens)?,
            llm_retry: RetryPolicy::new(retries, Duration::from_millis(backoff_ms)),
            chat_history_limit,
            tts_api_key: env_opt("GOOGLE_TTS_API_KEY"),
            tts_api_base: env_or("GOOGLE_TTS_API_BASE", DEFAULT_TTS_API_BASE),
        })
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn host(&self) -> &str {
        &self.server_host
    }

    pub fn port(&self) -> u16 {
        self.server_port
    }
}

#[derive(Clone)]
pub struct AppState {
    pub db: Option<PgPool>,
    pub config: AppConfig,
    pub providers: Arc<ProviderChain>,
    pub chat_repo: Option<ChatRepository>,
    pub tts: TtsClient,
    pub rate_limiter: Option<Arc<RateLimiter>>,
}

impl axum::extract::FromRef<AppState> for AppConfig {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}

impl AppState {
    // Database and Redis are optional; without them chat runs stateless and unthrottled
    pub async fn new(config: AppConfig) -> Result<Self, String> {
        let db = match &config.database_url {
            Some(url) => match init_db_pool(url, "assistant-service").await {
                Ok(pool) => Some(pool),
                Err(e) => {
                    tracing::warn!("⚠️ Database unavailable, chat history disabled: {}", e);
                    None
                }
            },
            None => {
                tracing::warn!("⚠️ DATABASE_URL not set, chat history disabled");
                None
            }
        };

        if let (Some(pool), true) = (&db, config.run_migrations) {
            run_migrations(pool)
                .await
                .map_err(|e| format!("Failed to run migrations: {}", e))?;
        }

        let http_client = build_client(Duration::from_secs(30)).map_err(|e| e.to_string())?;
        let providers = ProviderChain::from_config(&config, &http_client);

        let rate_limiter = match &config.redis_url {
            Some(url) => match RateLimiter::new(url) {
                Ok(limiter) => {
                    tracing::info!("✅ Redis rate limiter initialized");
                    Some(Arc::new(limiter))
                }
                Err(e) => {
                    tracing::warn!("⚠️ Rate limiting disabled: {}", e);
                    None
                }
            },
            None => {
                tracing::warn!("⚠️ REDIS_URL not set, rate limiting disabled");
                None
            }
        };

        Ok(Self::from_parts(config, db, providers, http_client, rate_limiter))
    }

    pub fn from_parts(
        config: AppConfig,
        db: Option<PgPool>,
        providers: ProviderChain,
        http_client: reqwest::Client,
        rate_limiter: Option<Arc<RateLimiter>>,
    ) -> Self {
        let chat_repo = db.clone().map(ChatRepository::new);
        let tts = TtsClient::new(
            http_client,
            config.tts_api_key.clone(),
            config.tts_api_base.clone(),
            config.llm_retry.clone(),
        );

        Self {
            db,
            config,
            providers: Arc::new(providers),
            chat_repo,
            tts,
            rate_limiter,
        }
    }

    pub async fn health_check(&self) -> HealthCheckResponse {
        let database = match &self.db {
            Some(pool) if check_db_health(pool).await => "connected",
            Some(_) => "disconnected",
            None => "not_configured",
        };

        let redis = match &self.rate_limiter {
            Some(limiter) if limiter.ping().await => "connected",
            Some(_) => "disconnected",
            None => "not_configured",
        };

        let status = if database == "disconnected" || redis == "disconnected" {
            "degraded"
        } else {
            "healthy"
        };

        HealthCheckResponse {
            service: "assistant-service".to_string(),
            status: status.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            database: database.to_string(),
            redis: redis.to_string(),
            providers: self.providers.status(),
            tts: if self.tts.is_configured() { "configured" } else { "not_configured" }.to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.gemini_models[0], "gemini-1.5-flash-latest");
        assert_eq!(config.llm_retry, RetryPolicy::new(2, Duration::from_millis(2000)));
        assert_eq!(config.chat_history_limit, 10);
        assert_eq!(config.frontend_urls, vec!["http://localhost:3000".to_string()]);
        assert!(!config.is_production());
    }

    #[tokio::test]
    async fn test_health_without_dependencies() {
        let state = AppState::from_parts(
            AppConfig::default(),
            None,
            ProviderChain::new(Vec::new()),
            reqwest::Client::new(),
            None,
        );

        let health = state.health_check().await;
        assert_eq!(health.status, "healthy");
        assert_eq!(health.database, "not_configured");
        assert_eq!(health.redis, "not_configured");
        assert_eq!(health.tts, "not_configured");
        assert!(!health.providers.gemini_configured);
    }
}
