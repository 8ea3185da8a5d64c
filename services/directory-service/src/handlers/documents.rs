use axum::{extract::Path, response::Json};

use shared::legal::CATEGORIES;
use shared::utils::validation::{is_valid_date, is_valid_slug};

use crate::{
    catalog::{document_details, document_fields, render_document, title_for, RenderInput},
    domain::{
        CategoryListResponse, DocumentDetails, DocumentFieldsResponse, RenderRequest,
        RenderedDocument,
    },
    error::AppError,
};

fn check_slug(slug: &str) -> Result<(), AppError> {
    if is_valid_slug(slug) {
        Ok(())
    } else {
        Err(AppError::bad_request(format!("Invalid document slug '{}'", slug)))
    }
}

/// Document types that can be drafted
#[utoipa::path(
    get,
    path = "/api/documents",
    tag = "documents",
    responses(
        (status = 200, description = "Document types with create hints", body = CategoryListResponse)
    )
)]
pub async fn list_documents() -> Json<CategoryListResponse> {
    Json(CategoryListResponse {
        items: CATEGORIES.iter().map(Into::into).collect(),
    })
}

/// Preparation checklist for a document type
#[utoipa::path(
    get,
    path = "/api/documents/{slug}",
    tag = "documents",
    params(
        ("slug" = String, Path, description = "Document slug")
    ),
    responses(
        (status = 200, description = "Document details", body = DocumentDetails),
        (status = 400, description = "Malformed slug")
    )
)]
pub async fn get_document(Path(slug): Path<String>) -> Result<Json<DocumentDetails>, AppError> {
    check_slug(&slug)?;
    Ok(Json(document_details(&slug)))
}

/// Form fields for drafting a document
#[utoipa::path(
    get,
    path = "/api/documents/{slug}/fields",
    tag = "documents",
    params(
        ("slug" = String, Path, description = "Document slug")
    ),
    responses(
        (status = 200, description = "Form fields", body = DocumentFieldsResponse),
        (status = 400, description = "Malformed slug")
    )
)]
pub async fn get_document_fields(
    Path(slug): Path<String>,
) -> Result<Json<DocumentFieldsResponse>, AppError> {
    check_slug(&slug)?;
    let (common, fields) = document_fields(&slug);

    Ok(Json(DocumentFieldsResponse {
        title: title_for(&slug),
        slug,
        common,
        fields,
    }))
}

/// Fill the plain-text draft for a document
#[utoipa::path(
    post,
    path = "/api/documents/{slug}/render",
    tag = "documents",
    params(
        ("slug" = String, Path, description = "Document slug")
    ),
    request_body = RenderRequest,
    responses(
        (status = 200, description = "Rendered draft", body = RenderedDocument),
        (status = 400, description = "Malformed slug"),
        (status = 422, description = "Date is not YYYY-MM-DD")
    )
)]
pub async fn render(
    Path(slug): Path<String>,
    Json(request): Json<RenderRequest>,
) -> Result<Json<RenderedDocument>, AppError> {
    check_slug(&slug)?;

    if let Some(date) = request.date.as_deref().map(str::trim).filter(|d| !d.is_empty()) {
        if !is_valid_date(date) {
            return Err(AppError::validation(format!("date must be YYYY-MM-DD, got '{}'", date)));
        }
    }

    let today = chrono::Utc::now().format("%Y-%m-%d").to_string();
    let input = RenderInput::new(&request, &today);
    let lines = render_document(&slug, &input);

    tracing::debug!("Rendered {} draft ({} lines)", slug, lines.len());

    Ok(Json(RenderedDocument {
        title: title_for(&slug),
        text: lines.join("\n"),
        slug,
        lines,
    }))
}
