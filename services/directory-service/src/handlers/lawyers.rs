use axum::{
    extract::{Path, Query, State},
    response::Json,
};
use std::collections::BTreeSet;
use uuid::Uuid;

use crate::{
    catalog::{builtin_lawyers, find_builtin_lawyer, LAWYERS},
    config::AppState,
    domain::{Lawyer, LawyerFilter, LawyerFilterOptions, LawyerListResponse, LawyerQuery},
    error::AppError,
    repositories::lawyer_repo,
};

// Database listing when reachable, built-in list otherwise
pub(crate) async fn load_lawyers(state: &AppState, filter: &LawyerFilter) -> Vec<Lawyer> {
    if let Some(pool) = &state.db {
        match lawyer_repo::find_verified_lawyers(pool, filter).await {
            Ok(rows) => return rows.into_iter().map(Lawyer::from).collect(),
            Err(e) => tracing::warn!("⚠️ Lawyer query failed, using built-in list: {}", e),
        }
    }

    builtin_lawyers(filter)
}

/// List verified lawyers
#[utoipa::path(
    get,
    path = "/api/lawyers",
    tag = "lawyers",
    params(LawyerQuery),
    responses(
        (status = 200, description = "Matching lawyers", body = LawyerListResponse),
        (status = 422, description = "maxFee is not a number")
    )
)]
pub async fn list_lawyers(
    State(state): State<AppState>,
    Query(query): Query<LawyerQuery>,
) -> Result<Json<LawyerListResponse>, AppError> {
    let filter = query.to_filter().map_err(AppError::validation)?;
    tracing::debug!("Lawyer search: {:?}", filter);

    let items = load_lawyers(&state, &filter).await;
    Ok(Json(LawyerListResponse { items }))
}

/// Lawyer profile
#[utoipa::path(
    get,
    path = "/api/lawyers/{id}",
    tag = "lawyers",
    params(
        ("id" = String, Path, description = "Lawyer id")
    ),
    responses(
        (status = 200, description = "Lawyer profile", body = Lawyer),
        (status = 404, description = "Unknown lawyer")
    )
)]
pub async fn get_lawyer(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Lawyer>, AppError> {
    if let (Some(pool), Ok(uuid)) = (&state.db, Uuid::parse_str(&id)) {
        match lawyer_repo::find_verified_lawyer(pool, uuid).await {
            Ok(Some(row)) => return Ok(Json(row.into())),
            Ok(None) => {}
            Err(e) => tracing::warn!("⚠️ Lawyer lookup failed, using built-in list: {}", e),
        }
    }

    find_builtin_lawyer(&id)
        .map(Json)
        .ok_or_else(|| AppError::not_found(format!("Lawyer {} not found", id)))
}

/// Practice areas and locations for the filter dropdowns
#[utoipa::path(
    get,
    path = "/api/lawyers/filters",
    tag = "lawyers",
    responses(
        (status = 200, description = "Filter options", body = LawyerFilterOptions)
    )
)]
pub async fn lawyer_filters(State(state): State<AppState>) -> Json<LawyerFilterOptions> {
    if let Some(pool) = &state.db {
        let practices = lawyer_repo::find_practices(pool).await;
        let locations = lawyer_repo::find_locations(pool).await;

        match (practices, locations) {
            (Ok(practices), Ok(locations)) => {
                return Json(LawyerFilterOptions { practices, locations });
            }
            (Err(e), _) | (_, Err(e)) => {
                tracing::warn!("⚠️ Filter lookup failed, using built-in list: {}", e)
            }
        }
    }

    let practices: BTreeSet<&str> = LAWYERS.iter().flat_map(|l| l.practices.iter().copied()).collect();
    let locations: BTreeSet<&str> = LAWYERS.iter().map(|l| l.location).collect();

    Json(LawyerFilterOptions {
        practices: practices.into_iter().map(str::to_string).collect(),
        locations: locations.into_iter().map(str::to_string).collect(),
    })
}
