use api::serve;
use app_state::{CONSTANTS, load_app_settings, load_constants_from_path};
use color_eyre::Result;
use common_services::database::get_db_pool;
use std::path::Path;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let settings = load_app_settings()?;
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| settings.logging.level.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Fail at startup, not on first use, when the constants are broken.
    CONSTANTS
        .set(load_constants_from_path(Path::new("config/settings.yaml"))?)
        .ok();
    let pool = get_db_pool(&settings.secrets.database_url, true).await?;
    serve(pool, settings).await?;

    Ok(())
}
