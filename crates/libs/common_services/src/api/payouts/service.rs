use crate::api::payouts::error::PayoutError;
use crate::api::payouts::fees::{PayoutAmounts, payout_amounts, schedule_for};
use crate::api::payouts::interfaces::{EligibleJobsResponse, PayoutQuote, PayoutRequest};
use crate::database::job::Job;
use crate::database::job_store::JobStore;
use crate::database::payout::Payout;
use crate::database::payout_store::PayoutStore;
use app_state::PayoutSettings;
use common_types::PayoutStatus;
use sqlx::{Executor, PgPool, Postgres};
use std::collections::HashSet;
use tracing::{info, instrument};

/// Checks that every selected job exists, belongs to the employee, is completed and
/// has not been paid out. Returns the gross earnings of the selection.
pub fn validate_selection(
    job_ids: &[i64],
    jobs: &[Job],
    employee_id: i32,
) -> Result<i64, PayoutError> {
    if job_ids.is_empty() {
        return Err(PayoutError::InvalidSelection(
            "Select at least one job.".to_string(),
        ));
    }
    let mut seen = HashSet::with_capacity(job_ids.len());
    if let Some(duplicate) = job_ids.iter().find(|id| !seen.insert(**id)) {
        return Err(PayoutError::InvalidSelection(format!(
            "Job {duplicate} was selected more than once."
        )));
    }

    let offenders: Vec<String> = job_ids
        .iter()
        .filter(|id| {
            !jobs
                .iter()
                .any(|job| job.id == **id && job.is_payable_to(employee_id))
        })
        .map(ToString::to_string)
        .collect();
    if !offenders.is_empty() {
        return Err(PayoutError::InvalidSelection(format!(
            "These jobs are not eligible for payout: {}",
            offenders.join(", ")
        )));
    }

    Ok(jobs
        .iter()
        .filter(|job| seen.contains(&job.id))
        .map(|job| job.employee_earnings_cents)
        .sum())
}

async fn compute_quote(
    executor: impl Executor<'_, Database = Postgres>,
    settings: &PayoutSettings,
    employee_id: i32,
    request: &PayoutRequest,
) -> Result<PayoutQuote, PayoutError> {
    let jobs = JobStore::find_by_ids(executor, &request.job_ids).await?;
    let gross_cents = validate_selection(&request.job_ids, &jobs, employee_id)?;
    let PayoutAmounts {
        gross_cents,
        fee_cents,
        net_cents,
    } = payout_amounts(gross_cents, schedule_for(settings, request.rail));
    if net_cents <= 0 {
        return Err(PayoutError::InvalidSelection(format!(
            "Selected earnings of {gross_cents} cents do not cover the {fee_cents} cent fee."
        )));
    }

    Ok(PayoutQuote {
        rail: request.rail,
        job_ids: request.job_ids.clone(),
        gross_cents,
        fee_cents,
        net_cents,
    })
}

pub async fn list_eligible_jobs(
    pool: &PgPool,
    employee_id: i32,
) -> Result<EligibleJobsResponse, PayoutError> {
    let jobs = JobStore::list_unpaid_completed(pool, employee_id).await?;
    let total_earnings_cents = jobs.iter().map(|job| job.employee_earnings_cents).sum();
    Ok(EligibleJobsResponse {
        jobs,
        total_earnings_cents,
    })
}

/// What the payout would look like, without creating it.
#[instrument(skip(pool, settings))]
pub async fn quote_payout(
    pool: &PgPool,
    settings: &PayoutSettings,
    employee_id: i32,
    request: &PayoutRequest,
) -> Result<PayoutQuote, PayoutError> {
    compute_quote(pool, settings, employee_id, request).await
}

/// Creates a pending payout and attaches the selected jobs to it.
///
/// Jobs are attached with a conditional update. If a concurrent request took some of
/// them first, fewer rows are updated than selected and the whole request is rolled back.
#[instrument(skip(pool, settings))]
pub async fn request_payout(
    pool: &PgPool,
    settings: &PayoutSettings,
    employee_id: i32,
    request: &PayoutRequest,
) -> Result<Payout, PayoutError> {
    let mut tx = pool.begin().await?;
    let quote = compute_quote(&mut *tx, settings, employee_id, request).await?;

    let payout = PayoutStore::create(
        &mut *tx,
        employee_id,
        quote.rail,
        quote.gross_cents,
        quote.fee_cents,
        quote.net_cents,
    )
    .await?;
    let attached =
        JobStore::attach_to_payout(&mut *tx, payout.id, employee_id, &quote.job_ids).await?;
    if attached != quote.job_ids.len() as u64 {
        tx.rollback().await?;
        return Err(PayoutError::Conflict(
            "Some of the selected jobs were paid out by another request.".to_string(),
        ));
    }
    tx.commit().await?;

    info!(
        payout_id = payout.id,
        rail = %payout.rail,
        net_cents = payout.net_cents,
        jobs = quote.job_ids.len(),
        "Payout requested"
    );
    Ok(payout)
}

pub async fn list_employee_payouts(
    pool: &PgPool,
    employee_id: i32,
) -> Result<Vec<Payout>, PayoutError> {
    Ok(PayoutStore::list_for_employee(pool, employee_id).await?)
}

pub async fn list_payouts(
    pool: &PgPool,
    status: Option<PayoutStatus>,
) -> Result<Vec<Payout>, PayoutError> {
    Ok(PayoutStore::list(pool, status).await?)
}

/// Marks a pending payout as paid or failed. A failed payout releases its jobs so they
/// can be selected again.
#[instrument(skip(pool))]
pub async fn settle_payout(
    pool: &PgPool,
    payout_id: i64,
    status: PayoutStatus,
) -> Result<Payout, PayoutError> {
    if status == PayoutStatus::Pending {
        return Err(PayoutError::BadRequest(
            "a payout can only be settled as paid or failed".to_string(),
        ));
    }

    let mut tx = pool.begin().await?;
    let Some(payout) = PayoutStore::settle(&mut *tx, payout_id, status).await? else {
        tx.rollback().await?;
        return Err(match PayoutStore::find_by_id(pool, payout_id).await? {
            None => PayoutError::NotFound(format!("payout {payout_id}")),
            Some(_) => PayoutError::Conflict("Payout has already been settled.".to_string()),
        });
    };
    if status == PayoutStatus::Failed {
        let released = JobStore::detach_from_payout(&mut *tx, payout_id).await?;
        info!(payout_id, released, "Released jobs of failed payout");
    }
    tx.commit().await?;

    Ok(payout)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use common_types::{JobStatus, PaymentStatus};

    fn completed_job(id: i64, employee_id: i32, earnings: i64) -> Job {
        let now = Utc::now();
        Job {
            id,
            customer_id: 1,
            employee_id: Some(employee_id),
            status: JobStatus::Completed,
            scheduled_at: now,
            street: "1 Elm St".to_string(),
            city: "Springfield".to_string(),
            state: "MA".to_string(),
            zip: "01101".to_string(),
            latitude: None,
            longitude: None,
            locked: false,
            payment_status: PaymentStatus::Succeeded,
            price_cents: earnings * 2,
            employee_earnings_cents: earnings,
            payout_id: None,
            rating: None,
            claimed_at: Some(now),
            started_at: Some(now),
            completed_at: Some(now),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn sums_valid_selection() {
        let jobs = [completed_job(1, 7, 2_500), completed_job(2, 7, 3_000)];
        assert_eq!(validate_selection(&[1, 2], &jobs, 7).unwrap(), 5_500);
        assert_eq!(validate_selection(&[2], &jobs, 7).unwrap(), 3_000);
    }

    #[test]
    fn rejects_empty_and_duplicate_selection() {
        let jobs = [completed_job(1, 7, 2_500)];
        assert!(matches!(
            validate_selection(&[], &jobs, 7),
            Err(PayoutError::InvalidSelection(_))
        ));
        assert!(matches!(
            validate_selection(&[1, 1], &jobs, 7),
            Err(PayoutError::InvalidSelection(_))
        ));
    }

    #[test]
    fn lists_every_ineligible_job() {
        let mut in_progress = completed_job(2, 7, 1_000);
        in_progress.status = JobStatus::InProgress;
        let mut already_paid = completed_job(3, 7, 1_000);
        already_paid.payout_id = Some(99);
        let someone_elses = completed_job(4, 8, 1_000);
        let jobs = [
            completed_job(1, 7, 1_000),
            in_progress,
            already_paid,
            someone_elses,
        ];

        let Err(PayoutError::InvalidSelection(message)) =
            validate_selection(&[1, 2, 3, 4, 5], &jobs, 7)
        else {
            panic!("expected an invalid selection");
        };
        assert!(message.ends_with("2, 3, 4, 5"), "{message}");
    }
}
