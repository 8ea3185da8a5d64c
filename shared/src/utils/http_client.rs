// Outbound HTTP helpers for third-party APIs (LLM providers, Google TTS)
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HttpClientError {
    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Upstream returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Response parsing error: {0}")]
    ParseError(String),
}

// Fixed-delay retry on 429 responses
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub backoff: Duration,
}

impl RetryPolicy {
    pub fn new(max_retries: u32, backoff: Duration) -> Self {
        Self { max_retries, backoff }
    }

    pub fn none() -> Self {
        Self::new(0, Duration::ZERO)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(2, Duration::from_millis(2000))
    }
}

// Shared client with a sane timeout for slow model endpoints
pub fn build_client(timeout: Duration) -> Result<Client, HttpClientError> {
    Client::builder()
        .timeout(timeout)
        .user_agent(concat!("vidhisahayak/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| HttpClientError::RequestFailed(format!("Failed to create HTTP client: {}", e)))
}

/// Send a request, sleeping and retrying while the upstream answers 429.
///
/// The last response is returned as-is once retries are exhausted, so callers
/// can still inspect a final `429 Too Many Requests`.
pub async fn send_with_retry(
    request: RequestBuilder,
    policy: &RetryPolicy,
) -> Result<Response, HttpClientError> {
    let mut attempt: u32 = 0;

    loop {
        let pending = request
            .try_clone()
            .ok_or_else(|| HttpClientError::RequestFailed("request body cannot be retried".to_string()))?;

        let response = pending
            .send()
            .await
            .map_err(|e| HttpClientError::RequestFailed(e.to_string()))?;

        if response.status() != StatusCode::TOO_MANY_REQUESTS || attempt >= policy.max_retries {
            return Ok(response);
        }

        attempt += 1;
        tracing::warn!(
            "⏳ Upstream rate limited ({}), retry {}/{} in {:?}",
            response.url().host_str().unwrap_or("unknown"),
            attempt,
            policy.max_retries,
            policy.backoff
        );
        tokio::time::sleep(policy.backoff).await;
    }
}

// Parse a JSON body from a successful response, or surface the error body
pub async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, HttpClientError> {
    let status = response.status();

    if status.is_success() {
        response
            .json::<T>()
            .await
            .map_err(|e| HttpClientError::ParseError(e.to_string()))
    } else {
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        Err(HttpClientError::Status {
            status: status.as_u16(),
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{extract::State, http::StatusCode as AxumStatus, routing::post, Json, Router};
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    // Upstream stub that answers 429 for the first `fail_times` calls
    async fn spawn_flaky_upstream(fail_times: u32) -> (String, Arc<AtomicU32>) {
        let calls = Arc::new(AtomicU32::new(0));

        async fn handler(
            State((calls, fail_times)): State<(Arc<AtomicU32>, u32)>,
        ) -> (AxumStatus, Json<serde_json::Value>) {
            let n = calls.fetch_add(1, Ordering::SeqCst);
            if n < fail_times {
                (AxumStatus::TOO_MANY_REQUESTS, Json(serde_json::json!({"error": "slow down"})))
            } else {
                (AxumStatus::OK, Json(serde_json::json!({"ok": true, "call": n + 1})))
            }
        }

        let app = Router::new()
            .route("/echo", post(handler))
            .with_state((calls.clone(), fail_times));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        (format!("http://{}/echo", addr), calls)
    }

    #[tokio::test]
    async fn test_retries_until_success() {
        let (url, calls) = spawn_flaky_upstream(2).await;
        let client = build_client(Duration::from_secs(5)).unwrap();
        let policy = RetryPolicy::new(2, Duration::from_millis(5));

        let response = send_with_retry(client.post(&url).json(&serde_json::json!({})), &policy)
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(calls.load(Ordering::SeqCst), 3);

        let body: serde_json::Value = read_json(response).await.unwrap();
        assert_eq!(body["call"], 3);
    }

    #[tokio::test]
    async fn test_gives_up_after_max_retries() {
        let (url, calls) = spawn_flaky_upstream(10).await;
        let client = build_client(Duration::from_secs(5)).unwrap();
        let policy = RetryPolicy::new(1, Duration::from_millis(5));

        let response = send_with_retry(client.post(&url).json(&serde_json::json!({})), &policy)
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(calls.load(Ordering::SeqCst), 2);

        let err = read_json::<serde_json::Value>(response).await.unwrap_err();
        assert!(matches!(err, HttpClientError::Status { status: 429, .. }));
    }

    #[tokio::test]
    async fn test_no_retry_policy_sends_once() {
        let (url, calls) = spawn_flaky_upstream(1).await;
        let client = build_client(Duration::from_secs(5)).unwrap();

        let response = send_with_retry(client.post(&url).json(&serde_json::json!({})), &RetryPolicy::none())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
