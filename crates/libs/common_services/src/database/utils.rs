use app_state::constants;
use sqlx::postgres::PgPoolOptions;
use sqlx::{Pool, Postgres};
use std::time::Duration;
use tracing::info;

/// Get a database connection pool, optionally running migrations first.
/// # Errors
///
/// * `PgPool::connect` can return an error if the database connection fails.
/// * `sqlx::migrate` can return an error if migrations fail.
pub async fn get_db_pool(database_url: &str, migrate: bool) -> color_eyre::Result<Pool<Postgres>> {
    let db_settings = &constants().database;
    info!("Connecting to database.");
    let pool = PgPoolOptions::new()
        .max_connections(db_settings.max_connections)
        .min_connections(db_settings.min_connection)
        .max_lifetime(Duration::from_secs(db_settings.max_lifetime))
        .idle_timeout(Duration::from_secs(db_settings.idle_timeout))
        .acquire_timeout(Duration::from_secs(db_settings.acquire_timeout))
        .test_before_acquire(true)
        .connect(database_url)
        .await?;

    if migrate {
        run_migrations(&pool).await?;
    }

    Ok(pool)
}

/// Apply the embedded migrations in `/migrations`.
pub async fn run_migrations(pool: &Pool<Postgres>) -> color_eyre::Result<()> {
    sqlx::migrate!("../../../migrations").run(pool).await?;
    info!("Database migrations are up to date.");
    Ok(())
}
