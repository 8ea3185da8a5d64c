use axum::{
    extract::{Query, State},
    response::Json,
};

use shared::legal::{guidance_for, search_categories};

use crate::{
    config::AppState,
    domain::{CategorySearchHit, LawyerFilter, SearchQuery, SearchResponse},
    handlers::lawyers::load_lawyers,
};

/// Search categories (by name and guidance text) and lawyers at once
#[utoipa::path(
    get,
    path = "/api/search",
    tag = "categories",
    params(SearchQuery),
    responses(
        (status = 200, description = "Matching categories and lawyers", body = SearchResponse)
    )
)]
pub async fn search(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Json<SearchResponse> {
    let q = query.q.trim().to_string();

    let categories = search_categories(&q)
        .into_iter()
        .map(|category| CategorySearchHit::new(category, guidance_for(category.slug)))
        .collect();
    let lawyers = load_lawyers(&state, &LawyerFilter::text(&q)).await;

    Json(SearchResponse {
        query: q,
        categories,
        lawyers,
    })
}
