use crate::api::dispatch::rating_gate::can_take_another_job;
use crate::api::stats::error::StatsError;
use crate::api::stats::interfaces::{AdminStats, EmployeeStats};
use crate::database::employee_store::EmployeeStore;
use crate::database::job_store::JobStore;
use crate::database::payment_store::PaymentStore;
use crate::database::payout_store::PayoutStore;
use crate::database::reconciliation_store::ReconciliationStore;
use crate::database::user_store::UserStore;
use app_state::DispatchSettings;
use common_types::UserRole;
use sqlx::PgPool;

pub async fn employee_stats(
    pool: &PgPool,
    settings: &DispatchSettings,
    employee_id: i32,
) -> Result<EmployeeStats, StatsError> {
    let employee = EmployeeStore::find_by_user_id(pool, employee_id)
        .await?
        .ok_or_else(|| StatsError::NotFound("employee profile".to_string()))?;

    let (active_jobs, completed_jobs, unpaid_earnings_cents, paid_out_cents) = tokio::try_join!(
        JobStore::count_active_for_employee(pool, employee_id),
        JobStore::count_completed_for_employee(pool, employee_id),
        JobStore::unpaid_earnings_for_employee(pool, employee_id),
        PayoutStore::total_paid_for_employee(pool, employee_id),
    )?;

    Ok(EmployeeStats {
        active_jobs,
        completed_jobs,
        unpaid_earnings_cents,
        paid_out_cents,
        average_rating: employee.average_rating,
        rating_count: employee.rating_count,
        can_claim_more: can_take_another_job(
            active_jobs,
            employee.average_rating,
            settings.multi_job_rating_threshold,
        ),
    })
}

pub async fn admin_stats(pool: &PgPool) -> Result<AdminStats, StatsError> {
    let (jobs_by_status, employee_count, customer_count, pending_payout_cents) = tokio::try_join!(
        JobStore::count_by_status(pool),
        EmployeeStore::count(pool),
        UserStore::count_by_role(pool, UserRole::Customer),
        PayoutStore::total_pending_cents(pool),
    )?;
    let (succeeded_payment_cents, latest_report) = tokio::try_join!(
        PaymentStore::total_succeeded_cents(pool),
        ReconciliationStore::latest(pool),
    )?;

    Ok(AdminStats {
        jobs_by_status,
        employee_count,
        customer_count,
        pending_payout_cents,
        succeeded_payment_cents,
        latest_discrepancy_count: latest_report.map(|report| report.discrepancy_count),
    })
}
