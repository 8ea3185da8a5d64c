use axum::response::Json;

use crate::{catalog::template_previews, domain::TemplateListResponse};

/// Template preview images, in display order
#[utoipa::path(
    get,
    path = "/api/templates",
    tag = "documents",
    responses(
        (status = 200, description = "Template previews", body = TemplateListResponse)
    )
)]
pub async fn list_templates() -> Json<TemplateListResponse> {
    Json(TemplateListResponse {
        items: template_previews(),
    })
}
