// Redis-based sliding window rate limiting shared by all services

use axum::{
    extract::{Request, State},
    http::{HeaderValue, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use redis::{AsyncCommands, Client};
use std::sync::Arc;
use thiserror::Error;

use crate::utils::{
    env::env_parse_or,
    jwt::validate_token,
    token_extraction::{bearer_from_headers, extract_client_ip},
};

// Paths that call paid upstream APIs get their own, tighter budget
const AI_PATHS: &[&str] = &["/api/chat", "/api/tts"];

// Exact match: history reads under /api/chat/sessions use the regular budget
fn is_ai_path(path: &str) -> bool {
    let path = path.strip_suffix('/').unwrap_or(path);
    AI_PATHS.contains(&path)
}

// Rate limit configuration from environment variables
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    pub anonymous_requests_per_hour: u32,
    pub user_requests_per_hour: u32,
    pub ai_requests_per_hour: u32,
    pub window_seconds: u64,
}

impl RateLimitConfig {
    pub fn from_env() -> Result<Self, RateLimitError> {
        let anonymous = env_parse_or("RATE_LIMIT_ANONYMOUS_REQUESTS", 100u32)
            .map_err(|_| RateLimitError::Configuration)?;
        let user = env_parse_or("RATE_LIMIT_USER_REQUESTS", 300u32)
            .map_err(|_| RateLimitError::Configuration)?;
        let ai = env_parse_or("RATE_LIMIT_AI_REQUESTS", 60u32)
            .map_err(|_| RateLimitError::Configuration)?;

        if anonymous == 0 || user == 0 || ai == 0 {
            return Err(RateLimitError::Configuration);
        }

        if ai > 500 {
            tracing::warn!("AI endpoint rate limit very high: {}", ai);
        }

        Ok(Self {
            anonymous_requests_per_hour: anonymous,
            user_requests_per_hour: user,
            ai_requests_per_hour: ai,
            window_seconds: 3600,
        })
    }

    // Budget for a caller role on a path
    pub fn max_requests(&self, role: &str, path: &str) -> u32 {
        if is_ai_path(path) {
            // signed-in users get double the AI budget
            return match role {
                "user" => self.ai_requests_per_hour.saturating_mul(2),
                _ => self.ai_requests_per_hour,
            };
        }

        match role {
            "user" => self.user_requests_per_hour,
            _ => self.anonymous_requests_per_hour,
        }
    }
}

#[derive(Clone)]
pub struct RateLimiter {
    redis_client: Client,
    config: RateLimitConfig,
}

impl RateLimiter {
    pub fn new(redis_url: &str) -> Result<Self, RateLimitError> {
        let redis_client =
            Client::open(redis_url.to_string()).map_err(RateLimitError::RedisConnection)?;
        let config = RateLimitConfig::from_env()?;

        Ok(Self {
            redis_client,
            config,
        })
    }

    /// Check rate limit for an identifier, role and path
    pub async fn check_rate_limit(
        &self,
        identifier: &str,
        role: &str,
        path: &str,
    ) -> Result<RateLimitResult, RateLimitError> {
        let mut conn = self
            .redis_client
            .get_multiplexed_async_connection()
            .await
            .map_err(RateLimitError::RedisConnection)?;

        let bucket = if is_ai_path(path) { "ai" } else { "api" };
        let window_key = format!("rate_limit:{}:{}:{}", identifier, role, bucket);
        let now_ms = chrono::Utc::now().timestamp_millis();
        let window_ms = (self.config.window_seconds * 1000) as i64;
        let window_start = now_ms - window_ms;

        let _: () = conn
            .zrembyscore(&window_key, "-inf", window_start)
            .await
            .map_err(RateLimitError::RedisOperation)?;

        let current_count: usize = conn
            .zcard(&window_key)
            .await
            .map_err(RateLimitError::RedisOperation)?;

        let max_requests = self.config.max_requests(role, path);

        // Members must be unique or same-millisecond requests collapse into one
        let member = format!("{}-{}", now_ms, uuid::Uuid::new_v4());
        let _: () = conn
            .zadd(&window_key, member, now_ms)
            .await
            .map_err(RateLimitError::RedisOperation)?;

        let _: () = conn
            .expire(&window_key, self.config.window_seconds as i64)
            .await
            .map_err(RateLimitError::RedisOperation)?;

        let allowed = current_count < max_requests as usize;
        let remaining = if allowed {
            max_requests.saturating_sub(current_count as u32 + 1)
        } else {
            0
        };

        Ok(RateLimitResult {
            allowed,
            current_count: current_count as u32 + 1,
            max_requests,
            remaining,
            reset_time: ((now_ms + window_ms) / 1000) as u64,
        })
    }

    // Cheap connectivity probe for health checks
    pub async fn ping(&self) -> bool {
        match self.redis_client.get_multiplexed_async_connection().await {
            Ok(mut conn) => redis::cmd("PING")
                .query_async::<String>(&mut conn)
                .await
                .is_ok(),
            Err(_) => false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct RateLimitResult {
    pub allowed: bool,
    pub current_count: u32,
    pub max_requests: u32,
    pub remaining: u32,
    pub reset_time: u64,
}

#[derive(Error, Debug)]
pub enum RateLimitError {
    #[error("Redis connection error: {0}")]
    RedisConnection(#[from] redis::RedisError),

    #[error("Redis operation error: {0}")]
    RedisOperation(redis::RedisError),

    #[error("Rate limit configuration error")]
    Configuration,
}

// Axum middleware; a missing limiter or a Redis failure lets the request through
pub async fn rate_limit_middleware(
    State(rate_limiter): State<Option<Arc<RateLimiter>>>,
    request: Request,
    next: Next,
) -> Response {
    let Some(rate_limiter) = rate_limiter else {
        return next.run(request).await;
    };

    let path = request.uri().path().to_string();
    if path == "/health" || path.starts_with("/docs") || path.starts_with("/redoc") || path.starts_with("/api-docs") {
        return next.run(request).await;
    }

    let (identifier, role) = extract_identifier(&request);

    match rate_limiter.check_rate_limit(&identifier, role, &path).await {
        Ok(result) if result.allowed => {
            let mut response = next.run(request).await;
            let headers = response.headers_mut();
            headers.insert("X-RateLimit-Limit", HeaderValue::from(result.max_requests));
            headers.insert("X-RateLimit-Used", HeaderValue::from(result.current_count));
            headers.insert("X-RateLimit-Remaining", HeaderValue::from(result.remaining));
            headers.insert("X-RateLimit-Reset", HeaderValue::from(result.reset_time));
            response
        }
        Ok(_) => {
            tracing::warn!(
                "Rate limit exceeded for identifier: {}, path: {}, role: {}",
                identifier,
                path,
                role
            );

            let body = axum::Json(serde_json::json!({
                "error": "rate_limit",
                "message": "Too many requests. Please try again later."
            }));
            (StatusCode::TOO_MANY_REQUESTS, body).into_response()
        }
        Err(e) => {
            tracing::error!("Rate limiting error: {}", e);
            next.run(request).await
        }
    }
}

// Signed-in users are keyed by user id, everyone else by client IP
fn extract_identifier(request: &Request) -> (String, &'static str) {
    let user = bearer_from_headers(request.headers())
        .and_then(|token| validate_token(&token).ok())
        .and_then(|claims| claims.user_id());

    match user {
        Some(user_id) => (format!("user:{}", user_id), "user"),
        None => (
            format!(
                "ip:{}",
                extract_client_ip(request.headers()).unwrap_or_else(|| "unknown".to_string())
            ),
            "anonymous",
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> RateLimitConfig {
        RateLimitConfig {
            anonymous_requests_per_hour: 100,
            user_requests_per_hour: 300,
            ai_requests_per_hour: 20,
            window_seconds: 3600,
        }
    }

    #[test]
    fn test_ai_paths_use_ai_budget() {
        let cfg = config();
        assert_eq!(cfg.max_requests("anonymous", "/api/chat"), 20);
        assert_eq!(cfg.max_requests("user", "/api/chat"), 40);
        assert_eq!(cfg.max_requests("anonymous", "/api/tts"), 20);
        assert_eq!(cfg.max_requests("anonymous", "/api/chat/"), 20);
    }

    #[test]
    fn test_chat_history_reads_use_regular_budget() {
        let cfg = config();
        assert_eq!(cfg.max_requests("user", "/api/chat/sessions"), 300);
        assert_eq!(
            cfg.max_requests("anonymous", "/api/chat/sessions/5b0c3c2e-4d0a-4a3f-9a61-0b7c9f5e2d11/messages"),
            100
        );
        assert!(!is_ai_path("/api/chatbot"));
    }

    #[test]
    fn test_regular_paths_use_role_budget() {
        let cfg = config();
        assert_eq!(cfg.max_requests("anonymous", "/api/lawyers"), 100);
        assert_eq!(cfg.max_requests("user", "/api/lawyers"), 300);
        assert_eq!(cfg.max_requests("someone-else", "/api/categories"), 100);
    }

    #[test]
    fn test_identifier_falls_back_to_ip() {
        let request = Request::builder()
            .uri("/api/lawyers")
            .header("x-forwarded-for", "203.0.113.9")
            .body(axum::body::Body::empty())
            .unwrap();
        let (identifier, role) = extract_identifier(&request);
        assert_eq!(identifier, "ip:203.0.113.9");
        assert_eq!(role, "anonymous");
    }
}
