use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    domain::{LawyerFilter, LawyerRow},
    error::AppError,
};

const LAWYER_COLUMNS: &str =
    "id, full_name, practices, experience_years, office_location, fee, verification_status";

// ILIKE treats % and _ as wildcards; user text must match literally
fn like_pattern(text: &str) -> String {
    let escaped = text
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}

// Verified lawyers matching the filter, ordered by name
pub async fn find_verified_lawyers(
    pool: &PgPool,
    filter: &LawyerFilter,
) -> Result<Vec<LawyerRow>, AppError> {
    let sql = format!(
        "SELECT {}
         FROM lawyer_profiles
         WHERE verification_status = 'verified'
           AND ($1::text IS NULL OR $1 = ANY(practices))
           AND ($2::text IS NULL OR office_location = $2)
           AND ($3::float8 IS NULL OR fee <= $3)
           AND ($4::text IS NULL OR full_name ILIKE $4 OR office_location ILIKE $4)
         ORDER BY full_name NULLS LAST",
        LAWYER_COLUMNS
    );

    let rows = sqlx::query_as::<_, LawyerRow>(&sql)
        .bind(filter.practice.as_deref())
        .bind(filter.location.as_deref())
        .bind(filter.max_fee)
        .bind(filter.text.as_deref().map(like_pattern))
        .fetch_all(pool)
        .await?;

    Ok(rows)
}

// Single verified lawyer
pub async fn find_verified_lawyer(pool: &PgPool, id: Uuid) -> Result<Option<LawyerRow>, AppError> {
    let sql = format!(
        "SELECT {} FROM lawyer_profiles WHERE id = $1 AND verification_status = 'verified'",
        LAWYER_COLUMNS
    );

    let row = sqlx::query_as::<_, LawyerRow>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(row)
}

// Practice areas across verified lawyers
pub async fn find_practices(pool: &PgPool) -> Result<Vec<String>, AppError> {
    let practices = sqlx::query_scalar(
        "SELECT DISTINCT practice
         FROM lawyer_profiles, unnest(practices) AS practice
         WHERE verification_status = 'verified'
         ORDER BY practice",
    )
    .fetch_all(pool)
    .await?;

    Ok(practices)
}

// Office locations across verified lawyers
pub async fn find_locations(pool: &PgPool) -> Result<Vec<String>, AppError> {
    let locations = sqlx::query_scalar(
        "SELECT DISTINCT office_location
         FROM lawyer_profiles
         WHERE verification_status = 'verified' AND office_location IS NOT NULL
         ORDER BY office_location",
    )
    .fetch_all(pool)
    .await?;

    Ok(locations)
}
