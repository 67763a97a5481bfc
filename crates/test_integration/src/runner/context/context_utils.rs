use app_state::AppSettings;
use color_eyre::eyre::Result;
use common_services::database::get_db_pool;
use sqlx::{Executor, PgPool};
use std::net::TcpListener;
use tracing::info;
use url::Url;

/// Point the settings at the test database and a free API port.
pub fn create_test_settings(database_name: &str, base_settings: &AppSettings) -> Result<AppSettings> {
    let mut settings = base_settings.clone();

    let port = get_free_port()?;
    settings.api.port = u32::from(port);
    settings.api.public_url = format!("http://127.0.0.1:{port}");

    let mut db_url = Url::parse(&settings.secrets.database_url)?;
    db_url.set_path(&format!("/{database_name}"));
    settings.secrets.database_url = db_url.to_string();

    Ok(settings)
}

/// Recreate `database_name` from scratch and return a migrated pool for it, plus a pool
/// on the `postgres` database for cleanup.
pub async fn create_test_database(
    base_database_url: &str,
    database_name: &str,
) -> Result<(PgPool, PgPool)> {
    let mut management_db_url = Url::parse(base_database_url)?;
    management_db_url.set_path("/postgres");
    let management_pool = get_db_pool(management_db_url.as_str(), false).await?;
    force_drop_db(&management_pool, database_name).await?;

    management_pool
        .execute(format!("CREATE DATABASE \"{database_name}\"").as_str())
        .await?;

    let mut test_db_url = Url::parse(base_database_url)?;
    test_db_url.set_path(&format!("/{database_name}"));
    let main_pool = get_db_pool(test_db_url.as_str(), true).await?;
    info!("Finished database migrations for {}", database_name);

    Ok((main_pool, management_pool))
}

pub async fn force_drop_db(management_pool: &PgPool, db_name: &str) -> Result<()> {
    management_pool
        .execute(format!("DROP DATABASE IF EXISTS \"{db_name}\" WITH (FORCE)").as_str())
        .await?;
    Ok(())
}

pub fn get_free_port() -> Result<u16> {
    let listener = TcpListener::bind("127.0.0.1:0")?;
    Ok(listener.local_addr()?.port())
}
