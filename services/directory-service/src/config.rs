// Directory Service configuration and shared application state
use serde::Serialize;
use sqlx::PgPool;
use std::sync::Arc;

use shared::db::{check_db_health, init_db_pool, run_migrations};
use shared::utils::env::{env_flag, env_list_or, env_opt, env_or, env_parse_or};
use shared::utils::rate_limit::RateLimiter;

const DEFAULT_FRONTEND_URL: &str = "http://localhost:3000";

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct HealthCheckResponse {
    pub service: String,
    pub status: String,
    pub version: String,
    pub database: String,
    pub redis: String,
    /// "database" or "builtin", whichever serves lawyer listings
    pub lawyer_source: String,
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
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server_host: "0.0.0.0".to_string(),
            server_port: 8082,
            environment: "development".to_string(),
            database_url: None,
            run_migrations: false,
            redis_url: None,
            frontend_urls: vec![DEFAULT_FRONTEND_URL.to_string()],
            cors_max_age_seconds: 86400,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, String> {
        let defaults = Self::default();

        Ok(Self {
            server_host: env_or("DIRECTORY_SERVICE_HOST", &defaults.server_host),
            server_port: env_parse_or("DIRECTORY_SERVICE_PORT", defaults.server_port)?,
            environment: env_or("RUST_ENV", &defaults.environment),
            database_url: env_opt("DATABASE_URL"),
            run_migrations: env_flag("RUN_MIGRATIONS"),
            redis_url: env_opt("REDIS_URL"),
            frontend_urls: env_list_or("FRONTEND_URL", &[DEFAULT_FRONTEND_URL]),
            cors_max_age_seconds: env_parse_or("CORS_MAX_AGE_SECONDS", defaults.cors_max_age_seconds)?,
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
    pub rate_limiter: Option<Arc<RateLimiter>>,
}

impl AppState {
    // Without a database every listing comes from the built-in catalog
    pub async fn new(config: AppConfig) -> Result<Self, String> {
        let db = match &config.database_url {
            Some(url) => match init_db_pool(url, "directory-service").await {
                Ok(pool) => Some(pool),
                Err(e) => {
                    tracing::warn!("⚠️ Database unavailable, serving built-in lawyers: {}", e);
                    None
                }
            },
            None => {
                tracing::warn!("⚠️ DATABASE_URL not set, serving built-in lawyers");
                None
            }
        };

        if let (Some(pool), true) = (&db, config.run_migrations) {
            run_migrations(pool)
                .await
                .map_err(|e| format!("Failed to run migrations: {}", e))?;
        }

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

        Ok(Self::from_parts(config, db, rate_limiter))
    }

    pub fn from_parts(
        config: AppConfig,
        db: Option<PgPool>,
        rate_limiter: Option<Arc<RateLimiter>>,
    ) -> Self {
        Self {
            db,
            config,
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
            service: "directory-service".to_string(),
            status: status.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            database: database.to_string(),
            redis: redis.to_string(),
            lawyer_source: if database == "connected" { "database" } else { "builtin" }.to_string(),
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
        assert_eq!(config.port(), 8082);
        assert_eq!(config.cors_max_age_seconds, 86400);
        assert!(config.database_url.is_none());
        assert!(!config.is_production());
    }

    #[tokio::test]
    async fn test_health_without_dependencies() {
        let state = AppState::from_parts(AppConfig::default(), None, None);
        let health = state.health_check().await;
        assert_eq!(health.service, "directory-service");
        assert_eq!(health.status, "healthy");
        assert_eq!(health.lawyer_source, "builtin");
    }
}
