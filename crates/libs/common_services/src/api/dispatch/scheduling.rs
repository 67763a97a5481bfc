use crate::api::dispatch::error::DispatchError;
use crate::api::dispatch::interfaces::{CreateJobRequest, JobListParams};
use crate::api::dispatch::service::status_label;
use crate::database::employee_store::EmployeeStore;
use crate::database::job::{Job, NewJob};
use crate::database::job_store::JobStore;
use crate::database::user_store::UserStore;
use color_eyre::eyre::eyre;
use common_types::{GeoPoint, JobStatus, UserRole};
use sqlx::PgPool;
use tracing::{info, instrument};

const DEFAULT_LIST_LIMIT: i64 = 100;
const MAX_LIST_LIMIT: i64 = 500;

/// Statuses an admin may move a job into by hand. Claiming, starting and completing
/// belong to the assigned employee.
const ADMIN_TARGETS: [JobStatus; 3] = [JobStatus::Scheduled, JobStatus::Paused, JobStatus::Cancelled];

fn validate_new_job(request: &CreateJobRequest) -> Result<(), DispatchError> {
    for (field, value) in [
        ("street", &request.street),
        ("city", &request.city),
        ("state", &request.state),
        ("zip", &request.zip),
    ] {
        if value.trim().is_empty() {
            return Err(DispatchError::BadRequest(format!("{field} must not be empty")));
        }
    }
    GeoPoint::try_from_parts(request.latitude, request.longitude)
        .map_err(|e| DispatchError::BadRequest(e.to_string()))?;
    if request.price_cents < 0 || request.employee_earnings_cents < 0 {
        return Err(DispatchError::BadRequest(
            "amounts must not be negative".to_string(),
        ));
    }
    if request.employee_earnings_cents > request.price_cents {
        return Err(DispatchError::BadRequest(
            "employee earnings cannot exceed the job price".to_string(),
        ));
    }
    Ok(())
}

/// Schedules a new visit for a customer.
#[instrument(skip(pool))]
pub async fn create_job(pool: &PgPool, request: CreateJobRequest) -> Result<Job, DispatchError> {
    validate_new_job(&request)?;
    let customer = UserStore::find_by_id(pool, request.customer_id)
        .await?
        .ok_or_else(|| DispatchError::NotFound(format!("customer {}", request.customer_id)))?;
    if customer.role != UserRole::Customer {
        return Err(DispatchError::BadRequest(format!(
            "user {} is not a customer",
            customer.id
        )));
    }

    let new_job = NewJob {
        customer_id: request.customer_id,
        scheduled_at: request.scheduled_at,
        street: request.street.trim().to_string(),
        city: request.city.trim().to_string(),
        state: request.state.trim().to_string(),
        zip: request.zip.trim().to_string(),
        latitude: request.latitude,
        longitude: request.longitude,
        price_cents: request.price_cents,
        employee_earnings_cents: request.employee_earnings_cents,
    };
    let job = JobStore::create(pool, &new_job).await?;
    info!(job_id = job.id, "Job scheduled");
    Ok(job)
}

pub async fn list_jobs(pool: &PgPool, params: &JobListParams) -> Result<Vec<Job>, DispatchError> {
    let limit = params
        .limit
        .unwrap_or(DEFAULT_LIST_LIMIT)
        .clamp(1, MAX_LIST_LIMIT);
    Ok(JobStore::list(pool, params.status, limit).await?)
}

/// Locked jobs are hidden from the availability list and cannot be claimed.
#[instrument(skip(pool))]
pub async fn set_job_locked(pool: &PgPool, job_id: i64, locked: bool) -> Result<Job, DispatchError> {
    JobStore::set_locked(pool, job_id, locked)
        .await?
        .ok_or_else(|| DispatchError::NotFound(format!("job {job_id}")))
}

/// Cancel, pause or resume a job.
#[instrument(skip(pool))]
pub async fn set_job_status(
    pool: &PgPool,
    job_id: i64,
    target: JobStatus,
) -> Result<Job, DispatchError> {
    if !ADMIN_TARGETS.contains(&target) {
        return Err(DispatchError::BadRequest(format!(
            "jobs cannot be set to {} by an admin",
            status_label(target)
        )));
    }
    let job = JobStore::find_by_id(pool, job_id)
        .await?
        .ok_or_else(|| DispatchError::NotFound(format!("job {job_id}")))?;
    if !job.status.can_transition_to(target) {
        return Err(DispatchError::Conflict(format!(
            "Cannot move a {} job to {}.",
            status_label(job.status),
            status_label(target)
        )));
    }

    let updated = JobStore::transition(pool, job_id, job.status, target)
        .await?
        .ok_or_else(|| {
            DispatchError::Conflict("Job changed while it was being updated.".to_string())
        })?;
    info!(job_id, from = ?job.status, to = ?target, "Job status changed by admin");
    Ok(updated)
}

pub async fn list_customer_jobs(pool: &PgPool, customer_id: i32) -> Result<Vec<Job>, DispatchError> {
    Ok(JobStore::list_for_customer(pool, customer_id).await?)
}

/// Rates a completed job and folds the score into the employee's average.
#[instrument(skip(pool))]
pub async fn rate_job(
    pool: &PgPool,
    customer_id: i32,
    job_id: i64,
    rating: i16,
) -> Result<Job, DispatchError> {
    if !(1..=5).contains(&rating) {
        return Err(DispatchError::BadRequest(
            "rating must be between 1 and 5".to_string(),
        ));
    }

    let mut tx = pool.begin().await?;
    let Some(job) = JobStore::set_rating(&mut *tx, job_id, customer_id, rating).await? else {
        tx.rollback().await?;
        return Err(match JobStore::find_by_id(pool, job_id).await? {
            Some(job) if job.customer_id == customer_id && job.rating.is_some() => {
                DispatchError::Conflict("Job has already been rated.".to_string())
            }
            Some(job) if job.customer_id == customer_id => DispatchError::Conflict(format!(
                "Only completed jobs can be rated, this one is {}.",
                status_label(job.status)
            )),
            // Other customers' jobs are reported as missing.
            _ => DispatchError::NotFound(format!("job {job_id}")),
        });
    };
    let employee_id = job
        .employee_id
        .ok_or_else(|| eyre!("completed job {job_id} has no employee"))?;
    EmployeeStore::record_rating(&mut *tx, employee_id, rating).await?;
    tx.commit().await?;

    info!(job_id, employee_id, rating, "Job rated");
    Ok(job)
}
