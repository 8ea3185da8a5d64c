use axum::response::Json;

use shared::legal::{DEFAULT_LANG, LANG_OPTIONS};

use crate::domain::{LanguageOption, LanguagesResponse};

/// Languages offered by the chat and speech pickers
#[utoipa::path(
    get,
    path = "/api/languages",
    tag = "chat",
    responses(
        (status = 200, description = "Supported languages", body = LanguagesResponse)
    )
)]
pub async fn list_languages() -> Json<LanguagesResponse> {
    Json(LanguagesResponse {
        languages: LANG_OPTIONS
            .iter()
            .map(|o| LanguageOption {
                code: o.code.to_string(),
                label: o.label.to_string(),
            })
            .collect(),
        default_lang: DEFAULT_LANG.to_string(),
    })
}
