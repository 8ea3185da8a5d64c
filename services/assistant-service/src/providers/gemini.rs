// Google Gemini generateContent client with model fallback
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};

use shared::utils::http_client::{read_json, send_with_retry, RetryPolicy};

use super::{ChatPrompt, ChatProvider, ProviderError, ProviderKind, ProviderReply};
use crate::domain::ChatRole;

pub const DEFAULT_GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_GEMINI_MODELS: &[&str] = &[
    "gemini-1.5-flash-latest",
    "gemini-1.5-flash",
    "gemini-1.5-pro-latest",
];

pub struct GeminiProvider {
    client: Client,
    api_key: String,
    base_url: String,
    models: Vec<String>,
    retry: RetryPolicy,
}

impl GeminiProvider {
    pub fn new(
        client: Client,
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        models: Vec<String>,
        retry: RetryPolicy,
    ) -> Self {
        Self {
            client,
            api_key: api_key.into(),
            base_url: base_url.into(),
            models,
            retry,
        }
    }

    fn endpoint(&self, model: &str) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            model
        )
    }
}

// Gemini calls the assistant side "model"
fn payload(prompt: &ChatPrompt) -> Value {
    let contents: Vec<Value> = prompt
        .turns
        .iter()
        .map(|turn| {
            let role = match turn.role {
                ChatRole::User => "user",
                ChatRole::Assistant => "model",
            };
            json!({ "role": role, "parts": [{ "text": turn.content }] })
        })
        .collect();

    json!({
        "systemInstruction": { "parts": [{ "text": prompt.system }] },
        "contents": contents,
        "generationConfig": {
            "temperature": prompt.temperature,
            "maxOutputTokens": prompt.max_output_tokens,
        }
    })
}

fn extract_text(body: &Value) -> Option<String> {
    let parts = body
        .get("candidates")
        .and_then(|c| c.get(0))
        .and_then(|cand| cand.get("content"))
        .and_then(|content| content.get("parts"))
        .and_then(|parts| parts.as_array())?;

    let text = parts
        .iter()
        .filter_map(|part| part.get("text").and_then(|t| t.as_str()))
        .collect::<Vec<_>>()
        .join("");
    let text = text.trim();

    (!text.is_empty()).then(|| text.to_string())
}

#[async_trait]
impl ChatProvider for GeminiProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Gemini
    }

    async fn complete(&self, prompt: &ChatPrompt) -> Result<ProviderReply, ProviderError> {
        let body = payload(prompt);

        for model in &self.models {
            let request = self
                .client
                .post(self.endpoint(model))
                .header("x-goog-api-key", &self.api_key)
                .json(&body);

            let response = send_with_retry(request, &self.retry).await?;
            let status = response.status();

            match status {
                // unknown model or no access to it
                StatusCode::NOT_FOUND | StatusCode::FORBIDDEN => {
                    tracing::warn!("Gemini model {} unavailable (HTTP {}), trying next", model, status.as_u16());
                    continue;
                }
                StatusCode::TOO_MANY_REQUESTS => return Err(ProviderError::RateLimited),
                s if !s.is_success() => {
                    let body = response.text().await.unwrap_or_default();
                    return Err(ProviderError::Status {
                        status: s.as_u16(),
                        body,
                    });
                }
                _ => {}
            }

            let data: Value = read_json(response).await?;
            match extract_text(&data) {
                Some(text) => {
                    return Ok(ProviderReply {
                        text,
                        model: model.clone(),
                    })
                }
                None => tracing::debug!("Gemini model {} returned no text", model),
            }
        }

        Err(ProviderError::NoContent)
    }
}
