// Ordered provider fallback: the first non-empty reply wins
use reqwest::Client;

use super::{
    gemini::GeminiProvider, openai_compat::OpenAiCompatibleProvider, ChatPrompt, ChatProvider,
    ProviderKind,
};
use crate::config::AppConfig;
use crate::domain::ProvidersStatus;

#[derive(Debug, Clone, PartialEq)]
pub struct ChainReply {
    pub text: String,
    pub provider: ProviderKind,
    pub model: String,
}

pub struct ProviderChain {
    providers: Vec<Box<dyn ChatProvider>>,
}

impl ProviderChain {
    pub fn new(providers: Vec<Box<dyn ChatProvider>>) -> Self {
        Self { providers }
    }

    /// Gemini, then Perplexity, then OpenAI; only providers with a key are added
    pub fn from_config(config: &AppConfig, client: &Client) -> Self {
        let mut providers: Vec<Box<dyn ChatProvider>> = Vec::new();

        if let Some(key) = &config.gemini_api_key {
            providers.push(Box::new(GeminiProvider::new(
                client.clone(),
                key.clone(),
                config.gemini_api_base.clone(),
                config.gemini_models.clone(),
                config.llm_retry.clone(),
            )));
        }

        if let Some(key) = &config.perplexity_api_key {
            providers.push(Box::new(OpenAiCompatibleProvider::perplexity(
                client.clone(),
                key.clone(),
                &config.perplexity_api_base,
                config.perplexity_model.clone(),
                config.llm_retry.clone(),
            )));
        }

        if let Some(key) = &config.openai_api_key {
            providers.push(Box::new(OpenAiCompatibleProvider::openai(
                client.clone(),
                key.clone(),
                &config.openai_api_base,
                config.openai_model.clone(),
                config.llm_retry.clone(),
            )));
        }

        Self::new(providers)
    }

    pub fn is_configured(&self, kind: ProviderKind) -> bool {
        self.providers.iter().any(|p| p.kind() == kind)
    }

    pub fn status(&self) -> ProvidersStatus {
        ProvidersStatus {
            gemini_configured: self.is_configured(ProviderKind::Gemini),
            perplexity_configured: self.is_configured(ProviderKind::Perplexity),
            openai_configured: self.is_configured(ProviderKind::OpenAi),
        }
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    /// Try each provider in turn; None when every provider failed or none is configured
    pub async fn complete(&self, prompt: &ChatPrompt) -> Option<ChainReply> {
        for provider in &self.providers {
            let kind = provider.kind();
            match provider.complete(prompt).await {
                Ok(reply) if !reply.text.trim().is_empty() => {
                    tracing::info!("🤖 Reply from {} ({})", kind.as_str(), reply.model);
                    return Some(ChainReply {
                        text: reply.text,
                        provider: kind,
                        model: reply.model,
                    });
                }
                Ok(_) => tracing::warn!("⚠️ {} returned an empty reply", kind.as_str()),
                Err(e) => tracing::warn!("⚠️ {} failed: {}", kind.as_str(), e),
            }
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::{ChatTurn, MockChatProvider, ProviderError, ProviderReply};

    fn prompt() -> ChatPrompt {
        ChatPrompt {
            system: "system".to_string(),
            turns: vec![ChatTurn::user("affidavit for name change")],
            temperature: 0.2,
            max_output_tokens: 400,
        }
    }

    fn failing(kind: ProviderKind) -> MockChatProvider {
        let mut mock = MockChatProvider::new();
        mock.expect_kind().return_const(kind);
        mock.expect_complete()
            .times(1)
            .returning(|_| Err(ProviderError::RateLimited));
        mock
    }

    fn answering(kind: ProviderKind, text: &'static str, model: &'static str) -> MockChatProvider {
        let mut mock = MockChatProvider::new();
        mock.expect_kind().return_const(kind);
        mock.expect_complete().times(1).returning(move |_| {
            Ok(ProviderReply {
                text: text.to_string(),
                model: model.to_string(),
            })
        });
        mock
    }

    fn unused(kind: ProviderKind) -> MockChatProvider {
        let mut mock = MockChatProvider::new();
        mock.expect_kind().return_const(kind);
        mock.expect_complete().never();
        mock
    }

    #[tokio::test]
    async fn test_first_success_wins() {
        let chain = ProviderChain::new(vec![
            Box::new(answering(ProviderKind::Gemini, "Visit a notary.", "gemini-1.5-flash")),
            Box::new(unused(ProviderKind::Perplexity)),
        ]);

        let reply = chain.complete(&prompt()).await.unwrap();
        assert_eq!(reply.provider, ProviderKind::Gemini);
        assert_eq!(reply.model, "gemini-1.5-flash");
        assert_eq!(reply.text, "Visit a notary.");
    }

    #[tokio::test]
    async fn test_falls_through_failures_and_empty_replies() {
        let chain = ProviderChain::new(vec![
            Box::new(failing(ProviderKind::Gemini)),
            Box::new(answering(ProviderKind::Perplexity, "   ", "sonar-small-online")),
            Box::new(answering(ProviderKind::OpenAi, "Draft it on stamp paper.", "gpt-4o-mini")),
        ]);

        let reply = chain.complete(&prompt()).await.unwrap();
        assert_eq!(reply.provider, ProviderKind::OpenAi);
        assert_eq!(reply.model, "gpt-4o-mini");
    }

    #[tokio::test]
    async fn test_all_failed() {
        let chain = ProviderChain::new(vec![
            Box::new(failing(ProviderKind::Gemini)),
            Box::new(failing(ProviderKind::OpenAi)),
        ]);
        assert!(chain.complete(&prompt()).await.is_none());
    }

    #[tokio::test]
    async fn test_empty_chain() {
        let chain = ProviderChain::new(Vec::new());
        assert!(chain.is_empty());
        assert!(chain.complete(&prompt()).await.is_none());
        assert_eq!(
            chain.status(),
            ProvidersStatus {
                gemini_configured: false,
                perplexity_configured: false,
                openai_configured: false,
            }
        );
    }

    #[test]
    fn test_from_config_respects_keys_and_order() {
        let config = AppConfig {
            perplexity_api_key: Some("pplx".to_string()),
            openai_api_key: Some("sk".to_string()),
            ..AppConfig::default()
        };
        let chain = ProviderChain::from_config(&config, &Client::new());

        assert_eq!(chain.len(), 2);
        let status = chain.status();
        assert!(!status.gemini_configured);
        assert!(status.perplexity_configured);
        assert!(status.openai_configured);
    }
}
