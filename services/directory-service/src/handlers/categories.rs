use axum::{extract::Path, response::Json};

use shared::legal::{find_category, guidance_for, CATEGORIES};

use crate::{
    domain::{CategoryDetailResponse, CategoryListResponse},
    error::AppError,
};

/// All document categories
#[utoipa::path(
    get,
    path = "/api/categories",
    tag = "categories",
    responses(
        (status = 200, description = "Categories in display order", body = CategoryListResponse)
    )
)]
pub async fn list_categories() -> Json<CategoryListResponse> {
    Json(CategoryListResponse {
        items: CATEGORIES.iter().map(Into::into).collect(),
    })
}

/// Category with its guidance checklist
#[utoipa::path(
    get,
    path = "/api/categories/{slug}",
    tag = "categories",
    params(
        ("slug" = String, Path, description = "Category slug")
    ),
    responses(
        (status = 200, description = "Category detail", body = CategoryDetailResponse),
        (status = 404, description = "Unknown category")
    )
)]
pub async fn get_category(Path(slug): Path<String>) -> Result<Json<CategoryDetailResponse>, AppError> {
    let category = find_category(&slug)
        .ok_or_else(|| AppError::not_found(format!("Category '{}' not found", slug)))?;

    Ok(Json(CategoryDetailResponse {
        category: category.into(),
        guidance: guidance_for(category.slug).map(Into::into),
    }))
}
