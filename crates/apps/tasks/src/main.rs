use app_state::{CONSTANTS, load_app_settings, load_constants_from_path};
use clap::Parser;
use color_eyre::Result;
use common_services::database::get_db_pool;
use std::path::Path;
use tasks::task_runner::run_tasks;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Scheduled background work for the dispatch service.
#[derive(Parser)]
#[command(about, version)]
struct Args {
    /// Run every task a single time and exit instead of looping.
    #[clap(long)]
    once: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    color_eyre::install()?;
    let settings = load_app_settings()?;
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| settings.logging.level.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    CONSTANTS
        .set(load_constants_from_path(Path::new("config/settings.yaml"))?)
        .ok();
    let pool = get_db_pool(&settings.secrets.database_url, false).await?;
    run_tasks(pool, settings, args.once).await?;

    Ok(())
}
