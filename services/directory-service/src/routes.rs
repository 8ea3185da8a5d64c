// API routes for Directory Service
use axum::{
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_redoc::{Redoc, Servable};
use utoipa_swagger_ui::SwaggerUi;

use shared::utils::http_layers::{cors_layer, security_headers_middleware};
use shared::utils::rate_limit::rate_limit_middleware;

use crate::config::AppState;
use crate::handlers::{categories, documents, health, lawyers, search, templates};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "VidhiSahayak Directory API",
        version = "1.0.0",
        description = "Lawyers, legal document categories and draft templates\n\n## Features\n\n- 👩‍⚖️ Verified lawyer directory with practice, location and fee filters\n- 📂 Document categories with preparation guidance\n- 🔎 Combined search over categories and lawyers\n- 📝 Plain-text drafts for common documents",
    ),
    paths(
        lawyers::list_lawyers,
        lawyers::get_lawyer,
        lawyers::lawyer_filters,
        categories::list_categories,
        categories::get_category,
        search::search,
        documents::list_documents,
        documents::get_document,
        documents::get_document_fields,
        documents::render,
        templates::list_templates,
        health::health_check,
    ),
    components(
        schemas(
            crate::domain::Lawyer,
            crate::domain::LawyerListResponse,
            crate::domain::LawyerFilterOptions,
            crate::domain::CategorySummary,
            crate::domain::GuidanceResponse,
            crate::domain::CategoryListResponse,
            crate::domain::CategoryDetailResponse,
            crate::domain::CategorySearchHit,
            crate::domain::SearchResponse,
            crate::domain::DocumentDetails,
            crate::domain::FormField,
            crate::domain::DocumentFieldsResponse,
            crate::domain::RenderRequest,
            crate::domain::RenderedDocument,
            crate::domain::TemplatePreview,
            crate::domain::TemplateListResponse,
            crate::config::HealthCheckResponse,
        )
    ),
    tags(
        (name = "lawyers", description = "Lawyer directory"),
        (name = "categories", description = "Document categories and search"),
        (name = "documents", description = "Document guidance and drafts"),
        (name = "health", description = "Service health")
    )
)]
pub struct ApiDoc;

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
        // ===== Lawyers =====
        .route("/lawyers", get(lawyers::list_lawyers))
        .route("/lawyers/filters", get(lawyers::lawyer_filters))
        .route("/lawyers/{id}", get(lawyers::get_lawyer))

        // ===== Categories =====
        .route("/categories", get(categories::list_categories))
        .route("/categories/{slug}", get(categories::get_category))
        .route("/search", get(search::search))

        // ===== Documents =====
        .route("/documents", get(documents::list_documents))
        .route("/documents/{slug}", get(documents::get_document))
        .route("/documents/{slug}/fields", get(documents::get_document_fields))
        .route("/documents/{slug}/render", post(documents::render))
        .route("/templates", get(templates::list_templates))

        .with_state(state)
}
