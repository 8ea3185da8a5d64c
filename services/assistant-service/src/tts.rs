// Google Cloud Text-to-Speech client returning MP3 bytes
use base64::{engine::general_purpose::STANDARD, Engine as _};
use reqwest::Client;
use serde_json::{json, Value};
use thiserror::Error;

use shared::utils::http_client::{read_json, send_with_retry, HttpClientError, RetryPolicy};

pub const DEFAULT_TTS_API_BASE: &str = "https://texttospeech.googleapis.com";

#[derive(Debug, Error)]
pub enum TtsError {
    #[error("GOOGLE_TTS_API_KEY not set")]
    NotConfigured,

    #[error("Google TTS HTTP {status}: {body}")]
    Upstream { status: u16, body: String },

    #[error("No audio content returned")]
    MissingAudio,

    #[error("Invalid audio payload: {0}")]
    Decode(String),

    #[error("Google TTS request failed: {0}")]
    Http(HttpClientError),
}

impl From<HttpClientError> for TtsError {
    fn from(err: HttpClientError) -> Self {
        match err {
            HttpClientError::Status { status, body } => TtsError::Upstream { status, body },
            other => TtsError::Http(other),
        }
    }
}

#[derive(Clone)]
pub struct TtsClient {
    client: Client,
    api_key: Option<String>,
    base_url: String,
    retry: RetryPolicy,
}

impl TtsClient {
    pub fn new(client: Client, api_key: Option<String>, base_url: impl Into<String>, retry: RetryPolicy) -> Self {
        Self {
            client,
            api_key,
            base_url: base_url.into(),
            retry,
        }
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    pub async fn synthesize(
        &self,
        text: &str,
        language_code: &str,
        voice_name: Option<&str>,
    ) -> Result<Vec<u8>, TtsError> {
        let api_key = self.api_key.as_deref().ok_or(TtsError::NotConfigured)?;

        let mut voice = json!({ "languageCode": language_code });
        if let Some(name) = voice_name.filter(|n| !n.trim().is_empty()) {
            voice["name"] = json!(name);
        }

        let body = json!({
            "input": { "text": text },
            "voice": voice,
            "audioConfig": { "audioEncoding": "MP3" },
        });

        let url = format!("{}/v1/text:synthesize", self.base_url.trim_end_matches('/'));
        let request = self.client.post(url).query(&[("key", api_key)]).json(&body);

        let response = send_with_retry(request, &self.retry).await?;
        let data: Value = read_json(response).await?;

        let audio = data
            .get("audioContent")
            .and_then(|v| v.as_str())
            .filter(|s| !s.is_empty())
            .ok_or(TtsError::MissingAudio)?;

        STANDARD
            .decode(audio)
            .map_err(|e| TtsError::Decode(e.to_string()))
    }
}
