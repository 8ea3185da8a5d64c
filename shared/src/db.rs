// Database pool helpers shared by services talking to Supabase Postgres
use sqlx::{postgres::PgConnectOptions, postgres::PgPoolOptions, PgPool};
use std::str::FromStr;
use std::time::Duration;

// Initialize the connection pool
pub async fn init_db_pool(database_url: &str, service: &str) -> Result<PgPool, sqlx::Error> {
    tracing::info!(
        "🔌 Initializing {} database connection ({})...",
        service,
        mask_connection_string(database_url)
    );

    // Supabase's pooler does not support prepared statement caching
    let options = PgConnectOptions::from_str(database_url)?.statement_cache_capacity(0);

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .min_connections(1)
        .acquire_timeout(Duration::from_secs(10))
        .idle_timeout(Duration::from_secs(300))
        .max_lifetime(Duration::from_secs(1800))
        .test_before_acquire(true)
        .connect_with(options)
        .await?;

    tracing::info!("✅ {} database pool initialized", service);
    Ok(pool)
}

// Health check database connection
pub async fn check_db_health(pool: &PgPool) -> bool {
    sqlx::query("SELECT 1").fetch_optional(pool).await.is_ok()
}

// Apply the bundled schema migrations (local development databases)
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    tracing::info!("📦 Running database migrations...");
    sqlx::migrate!("../migrations").run(pool).await?;
    tracing::info!("✅ Database migrations applied");
    Ok(())
}

// Hide the password part of a connection string before logging it
pub fn mask_connection_string(conn: &str) -> String {
    let Some(scheme_end) = conn.find("://") else {
        return "Invalid Format".to_string();
    };
    let rest = &conn[scheme_end + 3..];

    // the last '@' ends the credentials; passwords may contain '@'
    match (rest.find(':'), rest.rfind('@')) {
        (Some(colon), Some(at)) if colon < at => format!(
            "{}://{}:****{}",
            &conn[..scheme_end],
            &rest[..colon],
            &rest[at..]
        ),
        _ => conn.to_string(),
    }
}
