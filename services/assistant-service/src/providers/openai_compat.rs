// Chat-completions client shared by Perplexity and OpenAI
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};

use shared::utils::http_client::{read_json, send_with_retry, RetryPolicy};

use super::{ChatPrompt, ChatProvider, ProviderError, ProviderKind, ProviderReply};

pub const DEFAULT_PERPLEXITY_API_BASE: &str = "https://api.perplexity.ai";
pub const DEFAULT_PERPLEXITY_MODEL: &str = "sonar-small-online";
pub const DEFAULT_OPENAI_API_BASE: &str = "https://api.openai.com";
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-mini";

pub struct OpenAiCompatibleProvider {
    kind: ProviderKind,
    client: Client,
    api_key: String,
    endpoint: String,
    model: String,
    retry: RetryPolicy,
}

impl OpenAiCompatibleProvider {
    pub fn perplexity(
        client: Client,
        api_key: impl Into<String>,
        base_url: &str,
        model: impl Into<String>,
        retry: RetryPolicy,
    ) -> Self {
        Self {
            kind: ProviderKind::Perplexity,
            client,
            api_key: api_key.into(),
            endpoint: format!("{}/chat/completions", base_url.trim_end_matches('/')),
            model: model.into(),
            retry,
        }
    }

    pub fn openai(
        client: Client,
        api_key: impl Into<String>,
        base_url: &str,
        model: impl Into<String>,
        retry: RetryPolicy,
    ) -> Self {
        Self {
            kind: ProviderKind::OpenAi,
            client,
            api_key: api_key.into(),
            endpoint: format!("{}/v1/chat/completions", base_url.trim_end_matches('/')),
            model: model.into(),
            retry,
        }
    }

    fn payload(&self, prompt: &ChatPrompt) -> Value {
        let mut messages = vec![json!({ "role": "system", "content": prompt.system })];
        messages.extend(
            prompt
                .turns
                .iter()
                .map(|turn| json!({ "role": turn.role.as_str(), "content": turn.content })),
        );

        json!({
            "model": self.model,
            "messages": messages,
            "max_tokens": prompt.max_output_tokens,
            "temperature": prompt.temperature,
        })
    }
}

fn extract_content(body: &Value) -> Option<String> {
    body.get("choices")
        .and_then(|choices| choices.get(0))
        .and_then(|choice| choice.get("message"))
        .and_then(|msg| msg.get("content"))
        .and_then(|val| val.as_str())
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(str::to_string)
}

#[async_trait]
impl ChatProvider for OpenAiCompatibleProvider {
    fn kind(&self) -> ProviderKind {
        self.kind
    }

    async fn complete(&self, prompt: &ChatPrompt) -> Result<ProviderReply, ProviderError> {
        let request = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&self.payload(prompt));

        let response = send_with_retry(request, &self.retry).await?;
        if response.status() == StatusCode::TOO_MANY_REQUESTS {
            return Err(ProviderError::RateLimited);
        }

        let body: Value = read_json(response).await?;

        let text = extract_content(&body).ok_or(ProviderError::NoContent)?;
        Ok(ProviderReply {
            text,
            model: self.model.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::ChatTurn;
    use axum::{
        extract::State,
        http::{HeaderMap, StatusCode as AxumStatus},
        routing::post,
        Json, Router,
    };
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    type Captured = Arc<Mutex<Vec<(String, Value)>>>;

    async fn fake_completions(
        State(captured): State<Captured>,
        headers: HeaderMap,
        Json(body): Json<Value>,
    ) -> (AxumStatus, Json<Value>) {
        let auth = headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        captured.lock().unwrap().push((auth, body.clone()));

        match body["model"].as_str() {
            Some("silent") => (
                AxumStatus::OK,
                Json(json!({ "choices": [{ "message": { "content": "   " } }] })),
            ),
            Some("down") => (AxumStatus::BAD_GATEWAY, Json(json!({ "error": "upstream down" }))),
            _ => (
                AxumStatus::OK,
                Json(json!({ "choices": [{ "message": { "role": "assistant", "content": " Use e-stamp paper. " } }] })),
            ),
        }
    }

    async fn spawn_upstream() -> (String, Captured) {
        let captured: Captured = Arc::new(Mutex::new(Vec::new()));
        let app = Router::new()
            .route("/chat/completions", post(fake_completions))
            .route("/v1/chat/completions", post(fake_completions))
            .with_state(captured.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        (format!("http://{}", addr), captured)
    }

    fn prompt() -> ChatPrompt {
        ChatPrompt {
            system: "system text".to_string(),
            turns: vec![ChatTurn::user("how to make a rent agreement")],
            temperature: 0.2,
            max_output_tokens: 400,
        }
    }

    fn retry() -> RetryPolicy {
        RetryPolicy::new(0, Duration::from_millis(1))
    }

    #[tokio::test]
    async fn test_perplexity_completion() {
        let (base, captured) = spawn_upstream().await;
        let provider = OpenAiCompatibleProvider::perplexity(Client::new(), "pplx-key", &base, "sonar-small-online", retry());

        let reply = provider.complete(&prompt()).await.unwrap();
        assert_eq!(reply.text, "Use e-stamp paper.");
        assert_eq!(reply.model, "sonar-small-online");
        assert_eq!(provider.kind(), ProviderKind::Perplexity);

        let captured = captured.lock().unwrap();
        let (auth, body) = &captured[0];
        assert_eq!(auth, "Bearer pplx-key");
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][1]["role"], "user");
        assert_eq!(body["max_tokens"], 400);
    }

    #[tokio::test]
    async fn test_openai_uses_v1_path() {
        let (base, captured) = spawn_upstream().await;
        let provider = OpenAiCompatibleProvider::openai(Client::new(), "sk-test", &base, "gpt-4o-mini", retry());

        let reply = provider.complete(&prompt()).await.unwrap();
        assert_eq!(reply.model, "gpt-4o-mini");
        assert_eq!(captured.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_blank_content_is_no_content() {
        let (base, _) = spawn_upstream().await;
        let provider = OpenAiCompatibleProvider::openai(Client::new(), "sk-test", &base, "silent", retry());
        assert!(matches!(provider.complete(&prompt()).await, Err(ProviderError::NoContent)));
    }

    #[tokio::test]
    async fn test_error_status_is_surfaced() {
        let (base, _) = spawn_upstream().await;
        let provider = OpenAiCompatibleProvider::perplexity(Client::new(), "k", &base, "down", retry());
        assert!(matches!(
            provider.complete(&prompt()).await,
            Err(ProviderError::Status { status: 502, .. })
        ));
    }
}
