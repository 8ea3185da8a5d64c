// Chat handlers: the AI pipeline and stored history
use axum::{
    extract::{Path, Query, State},
    response::Json,
};
use uuid::Uuid;

use shared::legal::{match_category, resolve_language};
use shared::utils::auth_middleware::{AuthUser, MaybeAuthUser};
use shared::utils::validation::{is_valid_chat_message, MAX_CHAT_MESSAGE_CHARS};

use crate::{
    config::AppState,
    domain::{
        ChatRequest, ChatResponse, ChatRole, ChatSession, HistoryQuery, SessionListResponse,
        SessionMessagesResponse,
    },
    error::AppError,
    prompt,
    providers::ChatTurn,
    repositories::ChatRepository,
};

const SESSION_LIST_LIMIT: i64 = 50;

// Posting into an owned session requires the owner's token
fn claim_session(session: &ChatSession, user_id: Option<Uuid>) -> Result<Uuid, AppError> {
    if session.is_accessible_by(user_id) {
        Ok(session.id)
    } else {
        Err(AppError::forbidden("This chat session belongs to another user"))
    }
}

// Reading an owned session: anonymous callers get 401, other users 403
fn check_read_access(session: &ChatSession, user_id: Option<Uuid>) -> Result<(), AppError> {
    if session.is_accessible_by(user_id) {
        return Ok(());
    }

    Err(match user_id {
        None => AppError::unauthorized("Sign in to read this chat session"),
        Some(_) => AppError::forbidden("This chat session belongs to another user"),
    })
}

// Reuse the caller's session when it exists, otherwise open a new one.
// Storage failures degrade to a stateless reply; only ownership errors are returned.
async fn resolve_session(
    repo: &ChatRepository,
    requested: Option<&str>,
    user_id: Option<Uuid>,
) -> Result<Option<Uuid>, AppError> {
    if let Some(id) = requested.and_then(|raw| Uuid::parse_str(raw.trim()).ok()) {
        match repo.find_session(id).await {
            Ok(Some(session)) => return claim_session(&session, user_id).map(Some),
            Ok(None) => tracing::debug!("Session {} not found, starting a new one", id),
            Err(e) => {
                tracing::warn!("⚠️ Session lookup failed, continuing without history: {}", e);
                return Ok(None);
            }
        }
    }

    match repo.create_session(user_id).await {
        Ok(session) => Ok(Some(session.id)),
        Err(e) => {
            tracing::warn!("⚠️ Could not create chat session: {}", e);
            Ok(None)
        }
    }
}

// Store the user turn and return the recent conversation, oldest first
async fn load_history(repo: &ChatRepository, session_id: Uuid, text: &str, limit: i64) -> Vec<ChatTurn> {
    if let Err(e) = repo.add_message(session_id, ChatRole::User, text).await {
        tracing::warn!("⚠️ Failed to store user message: {}", e);
    }

    match repo.recent_messages(session_id, limit).await {
        Ok(messages) => messages
            .into_iter()
            .map(|m| ChatTurn {
                role: ChatRole::from_db(&m.role),
                content: m.content,
            })
            .collect(),
        Err(e) => {
            tracing::warn!("⚠️ Failed to load chat history: {}", e);
            Vec::new()
        }
    }
}

/// Ask the legal assistant a question
#[utoipa::path(
    post,
    path = "/api/chat",
    tag = "chat",
    request_body = ChatRequest,
    responses(
        (status = 200, description = "Assistant reply", body = ChatResponse),
        (status = 401, description = "Invalid bearer token"),
        (status = 403, description = "Session belongs to another user"),
        (status = 422, description = "Message empty or too long")
    )
)]
pub async fn chat(
    State(state): State<AppState>,
    auth: MaybeAuthUser,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    let text = request.message.trim().to_string();
    if !is_valid_chat_message(&text) {
        return Err(AppError::validation(format!(
            "message must be between 1 and {} characters",
            MAX_CHAT_MESSAGE_CHARS
        )));
    }

    let user_id = auth.user_id();

    let session_id = match &state.chat_repo {
        Some(repo) => resolve_session(repo, request.session_id.as_deref(), user_id).await?,
        None => None,
    };

    let history = match (&state.chat_repo, session_id) {
        (Some(repo), Some(id)) => load_history(repo, id, &text, state.config.chat_history_limit).await,
        _ => Vec::new(),
    };

    let lang = resolve_language(&text, request.lang.as_deref());
    let matched = match_category(&text);

    let chat_prompt = prompt::build_prompt(
        prompt::build_system_prompt(lang, matched.map(|m| m.category)),
        history,
        &text,
        state.config.llm_temperature,
        state.config.llm_max_output_tokens,
    );

    let (reply, provider_used, model_used) = match state.providers.complete(&chat_prompt).await {
        Some(answer) => (answer.text, answer.provider.as_str(), Some(answer.model)),
        None => (prompt::fallback_reply(&text), "none", None),
    };

    if let (Some(repo), Some(id)) = (&state.chat_repo, session_id) {
        if let Err(e) = repo.add_message(id, ChatRole::Assistant, &reply).await {
            tracing::warn!("⚠️ Failed to store assistant reply: {}", e);
        }
        if let Err(e) = repo.touch_session(id).await {
            tracing::warn!("⚠️ Failed to update session {}: {}", id, e);
        }
    }

    Ok(Json(ChatResponse {
        reply,
        session_id,
        detected_lang: lang.to_string(),
        matched_category: matched.map(|m| m.category.slug.to_string()),
        providers: state.providers.status(),
        provider_used: provider_used.to_string(),
        model_used,
    }))
}

/// Messages of one chat session in chronological order
#[utoipa::path(
    get,
    path = "/api/chat/sessions/{session_id}/messages",
    tag = "chat",
    params(
        ("session_id" = Uuid, Path, description = "Chat session id"),
        HistoryQuery
    ),
    responses(
        (status = 200, description = "Session transcript", body = SessionMessagesResponse),
        (status = 401, description = "Session is owned and no token was sent"),
        (status = 403, description = "Session belongs to another user"),
        (status = 404, description = "Unknown session"),
        (status = 503, description = "Chat history storage not configured")
    )
)]
pub async fn get_session_messages(
    State(state): State<AppState>,
    auth: MaybeAuthUser,
    Path(session_id): Path<Uuid>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<SessionMessagesResponse>, AppError> {
    let repo = state
        .chat_repo
        .as_ref()
        .ok_or_else(|| AppError::unavailable("Chat history storage is not configured"))?;

    let session = repo
        .find_session(session_id)
        .await?
        .ok_or_else(|| AppError::not_found("Chat session not found"))?;

    check_read_access(&session, auth.user_id())?;

    let (limit, offset) = (query.limit(), query.offset());
    let messages = repo.list_messages(session.id, limit, offset).await?;

    Ok(Json(SessionMessagesResponse {
        session_id: session.id,
        messages,
        limit,
        offset,
    }))
}

/// Sessions of the signed-in user, most recently active first
#[utoipa::path(
    get,
    path = "/api/chat/sessions",
    tag = "chat",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Caller's chat sessions", body = SessionListResponse),
        (status = 401, description = "Unauthorized"),
        (status = 503, description = "Chat history storage not configured")
    )
)]
pub async fn list_sessions(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<SessionListResponse>, AppError> {
    let repo = state
        .chat_repo
        .as_ref()
        .ok_or_else(|| AppError::unavailable("Chat history storage is not configured"))?;

    let sessions = repo.list_sessions(user.user_id, SESSION_LIST_LIMIT).await?;
    Ok(Json(SessionListResponse { sessions }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::StatusCode, response::IntoResponse};

    fn session(owner: Option<Uuid>) -> ChatSession {
        let now = chrono::Utc::now();
        ChatSession {
            id: Uuid::new_v4(),
            user_id: owner,
            created_at: now,
            updated_at: now,
        }
    }

    fn status_of(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_claim_session_ownership() {
        let owner = Uuid::new_v4();
        let owned = session(Some(owner));

        assert_eq!(claim_session(&owned, Some(owner)).unwrap(), owned.id);
        assert_eq!(
            status_of(claim_session(&owned, Some(Uuid::new_v4())).unwrap_err()),
            StatusCode::FORBIDDEN
        );
        assert_eq!(status_of(claim_session(&owned, None).unwrap_err()), StatusCode::FORBIDDEN);

        let anonymous = session(None);
        assert_eq!(claim_session(&anonymous, Some(owner)).unwrap(), anonymous.id);
        assert_eq!(claim_session(&anonymous, None).unwrap(), anonymous.id);
    }

    #[test]
    fn test_read_access_statuses() {
        let owner = Uuid::new_v4();
        let owned = session(Some(owner));

        assert!(check_read_access(&owned, Some(owner)).is_ok());
        assert_eq!(
            status_of(check_read_access(&owned, None).unwrap_err()),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            status_of(check_read_access(&owned, Some(Uuid::new_v4())).unwrap_err()),
            StatusCode::FORBIDDEN
        );
        assert!(check_read_access(&session(None), None).is_ok());
    }
}
