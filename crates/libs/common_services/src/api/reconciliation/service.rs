use crate::alert;
use crate::api::reconciliation::compare::reconcile;
use crate::api::reconciliation::error::ReconciliationError;
use crate::api::reconciliation::interfaces::ReportListParams;
use crate::database::payment_store::PaymentStore;
use crate::database::reconciliation_report::ReconciliationReport;
use crate::database::reconciliation_store::{NewReconciliationReport, ReconciliationStore};
use crate::payment_processor::PaymentProcessor;
use app_state::ReconciliationSettings;
use chrono::{DateTime, Duration, SubsecRound, Utc};
use sqlx::PgPool;
use tracing::{info, instrument};

/// The trailing `[start, end)` window ending at `now`, in whole seconds.
///
/// The processor filters on unix seconds, so the local query has to use the same bounds
/// or charges from the sub-second edge show up on one side only.
fn reconciliation_window(now: DateTime<Utc>, window_days: i64) -> (DateTime<Utc>, DateTime<Utc>) {
    let end = now.trunc_subsecs(0);
    (end - Duration::days(window_days), end)
}

/// Compares the trailing window of local payments with the processor's charges and
/// stores the result as a report.
#[instrument(skip_all)]
pub async fn run_reconciliation(
    pool: &PgPool,
    processor: &dyn PaymentProcessor,
    settings: &ReconciliationSettings,
) -> Result<ReconciliationReport, ReconciliationError> {
    let (window_start, window_end) = reconciliation_window(Utc::now(), settings.window_days);
    info!(%window_start, %window_end, "Starting payment reconciliation");

    let local = PaymentStore::list_in_window(pool, window_start, window_end).await?;
    let remote = processor.list_charges(window_start, window_end).await?;
    let outcome = reconcile(&local, &remote, settings.tolerance_cents);

    let report = ReconciliationStore::insert(
        pool,
        &NewReconciliationReport {
            window_start,
            window_end,
            local_count: outcome.local_count as i32,
            processor_count: outcome.processor_count as i32,
            local_total_cents: outcome.local_total_cents,
            processor_total_cents: outcome.processor_total_cents,
            matched_count: outcome.matched_count as i32,
            discrepancies: outcome.discrepancies,
        },
    )
    .await?;

    if report.discrepancy_count > 0 {
        alert!(
            "Reconciliation report {} found {} discrepancies (local {} cents, processor {} cents).",
            report.id,
            report.discrepancy_count,
            report.local_total_cents,
            report.processor_total_cents
        );
    } else {
        info!(
            report_id = report.id,
            matched = report.matched_count,
            "Reconciliation found no discrepancies"
        );
    }
    Ok(report)
}

pub async fn list_reports(
    pool: &PgPool,
    params: &ReportListParams,
) -> Result<Vec<ReconciliationReport>, ReconciliationError> {
    let limit = params.limit.unwrap_or(30).clamp(1, 365);
    Ok(ReconciliationStore::list(pool, limit).await?)
}

pub async fn get_report(
    pool: &PgPool,
    report_id: i64,
) -> Result<ReconciliationReport, ReconciliationError> {
    ReconciliationStore::find_by_id(pool, report_id)
        .await?
        .ok_or_else(|| ReconciliationError::NotFound(format!("report {report_id}")))
}
