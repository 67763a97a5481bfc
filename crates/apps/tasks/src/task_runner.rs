use app_state::AppSettings;
use color_eyre::Result;
use common_services::api::reconciliation::service::run_reconciliation;
use common_services::payment_processor::{PaymentProcessor, StripeClient};
use reqwest::Client;
use sqlx::PgPool;
use std::time::Duration;
use tokio::time;
use tracing::{error, info};

/// Run the periodic reconciliation until the process is stopped.
///
/// A failed run is logged and retried on the next tick.
pub async fn run_tasks(pool: PgPool, settings: AppSettings, once: bool) -> Result<()> {
    let processor = StripeClient::new(
        Client::new(),
        &settings.payment_processor,
        &settings.secrets.payment_processor_key,
    )?;

    if once {
        return reconcile_once(&pool, &processor, &settings).await;
    }

    let period = Duration::from_secs(settings.tasks.reconciliation_interval_hours.max(1) * 60 * 60);
    let mut interval = time::interval(period);
    interval.set_missed_tick_behavior(time::MissedTickBehavior::Delay);
    info!(
        "Reconciling every {} hour(s).",
        settings.tasks.reconciliation_interval_hours.max(1)
    );

    loop {
        // The first tick of `interval` happens immediately.
        interval.tick().await;
        if let Err(e) = reconcile_once(&pool, &processor, &settings).await {
            error!("Scheduled reconciliation failed: {:?}", e);
        }
    }
}

async fn reconcile_once(
    pool: &PgPool,
    processor: &dyn PaymentProcessor,
    settings: &AppSettings,
) -> Result<()> {
    let report = run_reconciliation(pool, processor, &settings.reconciliation).await?;
    info!(
        report_id = report.id,
        discrepancies = report.discrepancy_count,
        "Reconciliation finished."
    );
    Ok(())
}
