// LLM providers behind a common trait, tried in order by ProviderChain
pub mod chain;
pub mod gemini;
pub mod openai_compat;

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

use shared::utils::http_client::HttpClientError;

use crate::domain::ChatRole;

pub use chain::{ChainReply, ProviderChain};
pub use gemini::GeminiProvider;
pub use openai_compat::OpenAiCompatibleProvider;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    Gemini,
    Perplexity,
    OpenAi,
}

impl ProviderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::Gemini => "gemini",
            ProviderKind::Perplexity => "perplexity",
            ProviderKind::OpenAi => "openai",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChatTurn {
    pub role: ChatRole,
    pub content: String,
}

impl ChatTurn {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
        }
    }
}

/// Everything a provider needs for one completion
#[derive(Debug, Clone, PartialEq)]
pub struct ChatPrompt {
    pub system: String,
    /// Oldest first, ending with the current user turn
    pub turns: Vec<ChatTurn>,
    pub temperature: f32,
    pub max_output_tokens: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProviderReply {
    pub text: String,
    pub model: String,
}

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("HTTP error: {0}")]
    Http(HttpClientError),

    #[error("Rate limited by upstream")]
    RateLimited,

    #[error("Upstream returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Unexpected response: {0}")]
    Parse(String),

    #[error("No content returned")]
    NoContent,
}

impl From<HttpClientError> for ProviderError {
    fn from(err: HttpClientError) -> Self {
        match err {
            HttpClientError::Status { status, body } => ProviderError::Status { status, body },
            other => ProviderError::Http(other),
        }
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ChatProvider: Send + Sync {
    fn kind(&self) -> ProviderKind;

    async fn complete(&self, prompt: &ChatPrompt) -> Result<ProviderReply, ProviderError>;
}
