use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Json, Response},
};

use shared::legal::DEFAULT_LANG;
use shared::utils::validation::MAX_TTS_TEXT_CHARS;

use crate::{config::AppState, domain::TtsRequest, error::AppError};

/// Convert text to MP3 speech through Google Cloud TTS
#[utoipa::path(
    post,
    path = "/api/tts",
    tag = "tts",
    request_body = TtsRequest,
    responses(
        (status = 200, description = "MP3 audio", content_type = "audio/mpeg", body = Vec<u8>),
        (status = 400, description = "Missing text or TTS not configured"),
        (status = 422, description = "Text too long"),
        (status = 500, description = "Upstream TTS failure")
    )
)]
pub async fn synthesize(
    State(state): State<AppState>,
    Json(request): Json<TtsRequest>,
) -> Result<Response, AppError> {
    let text = request.text.trim();
    if text.is_empty() {
        return Err(AppError::bad_request("Missing text"));
    }
    if text.chars().count() > MAX_TTS_TEXT_CHARS {
        return Err(AppError::validation(format!(
            "text must be at most {} characters",
            MAX_TTS_TEXT_CHARS
        )));
    }

    // the picker's "auto" has no voice of its own
    let lang = request
        .lang
        .as_deref()
        .map(str::trim)
        .filter(|l| !l.is_empty() && *l != "auto")
        .unwrap_or(DEFAULT_LANG);

    let audio = state
        .tts
        .synthesize(text, lang, request.voice_name.as_deref())
        .await?;

    tracing::debug!("🔊 Synthesized {} bytes of {} audio", audio.len(), lang);

    Ok((
        [
            (header::CONTENT_TYPE, "audio/mpeg"),
            (header::CACHE_CONTROL, "no-store"),
        ],
        audio,
    )
        .into_response())
}
