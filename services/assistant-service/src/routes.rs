// API routes for Assistant Service
use axum::{
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_redoc::{Redoc, Servable};
use utoipa_swagger_ui::SwaggerUi;

use shared::utils::http_layers::{cors_layer, security_headers_middleware};
use shared::utils::rate_limit::rate_limit_middleware;

use crate::config::AppState;
use crate::handlers::{chat, health, languages, tts};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "VidhiSahayak Assistant API",
        version = "1.0.0",
        description = "Multilingual legal assistant for India\n\n## Features\n\n- 🤖 Chat with Gemini, Perplexity and OpenAI fallback\n- 🌐 Reply language from picker, explicit request or script\n- 📚 Category guidance injected into prompts\n- 🔊 Text-to-speech through Google Cloud TTS\n- 🗂️ Optional chat history per session",
    ),
    paths(
        chat::chat,
        chat::get_session_messages,
        chat::list_sessions,
        tts::synthesize,
        languages::list_languages,
        health::health_check,
    ),
    components(
        schemas(
            crate::domain::ChatRequest,
            crate::domain::ChatResponse,
            crate::domain::ProvidersStatus,
            crate::domain::ChatSession,
            crate::domain::ChatMessage,
            crate::domain::SessionMessagesResponse,
            crate::domain::SessionListResponse,
            crate::domain::TtsRequest,
            crate::domain::LanguageOption,
            crate::domain::LanguagesResponse,
            crate::config::HealthCheckResponse,
        )
    ),
    tags(
        (name = "chat", description = "AI legal assistant"),
        (name = "tts", description = "Speech synthesis"),
        (name = "health", description = "Service health")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

// Bearer scheme for Supabase access tokens
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}

pub fn create_router(state: AppState) -> Router {
    let openapi = ApiDoc::openapi();
    let cors = cors_layer(&state.config.frontend_urls, state.config.cors_max_age_seconds);

    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", openapi.clone()))
        .merge(Redoc::with_url("/redoc", openapi))
        .with_state(state.clone());

    public_routes
        .nest("/api", build_api_routes(state.clone()))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .layer(axum::middleware::from_fn(security_headers_middleware))
        .layer(axum::middleware::from_fn_with_state(
            state.rate_limiter.clone(),
            rate_limit_middleware,
        ))
}

fn build_api_routes(state: AppState) -> Router {
    Router::new()
        // ===== Assistant =====
        .route("/chat", post(chat::chat))
        .route("/chat/sessions", get(chat::list_sessions))
        .route("/chat/sessions/{session_id}/messages", get(chat::get_session_messages))
        .route("/languages", get(languages::list_languages))

        // ===== Speech =====
        .route("/tts", post(tts::synthesize))

        .with_state(state)
}
