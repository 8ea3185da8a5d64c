// Chat sessions, stored messages and the chat API contract
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

impl ChatRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChatRole::User => "user",
            ChatRole::Assistant => "assistant",
        }
    }

    // Rows are constrained to these two values; anything else reads as user text
    pub fn from_db(value: &str) -> Self {
        match value {
            "assistant" => ChatRole::Assistant,
            _ => ChatRole::User,
        }
    }
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChatSession {
    pub id: Uuid,
    pub user_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ChatSession {
    /// Anonymous sessions are open to anyone holding the id
    pub fn is_accessible_by(&self, user_id: Option<Uuid>) -> bool {
        match self.user_id {
            Some(owner) => user_id == Some(owner),
            None => true,
        }
    }
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub id: i64,
    pub session_id: Uuid,
    pub role: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    #[serde(default)]
    pub message: String,
    pub session_id: Option<String>,
    /// Language picker value; "auto" or absent means detect
    pub lang: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProvidersStatus {
    pub gemini_configured: bool,
    pub perplexity_configured: bool,
    pub openai_configured: bool,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChatResponse {
    pub reply: String,
    pub session_id: Option<Uuid>,
    pub detected_lang: String,
    pub matched_category: Option<String>,
    pub providers: ProvidersStatus,
    /// "gemini", "perplexity", "openai" or "none"
    pub provider_used: String,
    pub model_used: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct HistoryQuery {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl HistoryQuery {
    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(50).clamp(1, 100)
    }

    pub fn offset(&self) -> i64 {
        self.offset.unwrap_or(0).max(0)
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SessionMessagesResponse {
    pub session_id: Uuid,
    pub messages: Vec<ChatMessage>,
    pub limit: i64,
    pub offset: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SessionListResponse {
    pub sessions: Vec<ChatSession>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LanguageOption {
    pub code: String,
    pub label: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LanguagesResponse {
    pub languages: Vec<LanguageOption>,
    pub default_lang: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(owner: Option<Uuid>) -> ChatSession {
        ChatSession {
            id: Uuid::new_v4(),
            user_id: owner,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_session_access() {
        let owner = Uuid::new_v4();
        assert!(session(None).is_accessible_by(None));
        assert!(session(None).is_accessible_by(Some(owner)));
        assert!(session(Some(owner)).is_accessible_by(Some(owner)));
        assert!(!session(Some(owner)).is_accessible_by(None));
        assert!(!session(Some(owner)).is_accessible_by(Some(Uuid::new_v4())));
    }

    #[test]
    fn test_chat_request_is_camel_case() {
        let req: ChatRequest = serde_json::from_str(
            r#"{"message":"hi","sessionId":"b0f7c6a2-0a65-4a8e-9a53-2b1c1d0e9f11","lang":"te-IN"}"#,
        )
        .unwrap();
        assert_eq!(req.lang.as_deref(), Some("te-IN"));
        assert!(req.session_id.is_some());

        let empty: ChatRequest = serde_json::from_str("{}").unwrap();
        assert!(empty.message.is_empty());
    }

    #[test]
    fn test_history_query_bounds() {
        let q = HistoryQuery { limit: Some(1000), offset: Some(-5) };
        assert_eq!(q.limit(), 100);
        assert_eq!(q.offset(), 0);

        let q = HistoryQuery { limit: None, offset: None };
        assert_eq!(q.limit(), 50);
    }

    #[test]
    fn test_role_strings() {
        assert_eq!(ChatRole::from_db("assistant"), ChatRole::Assistant);
        assert_eq!(ChatRole::from_db("user").as_str(), "user");
    }
}
