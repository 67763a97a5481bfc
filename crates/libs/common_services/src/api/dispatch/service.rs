use crate::api::dispatch::availability::{Origin, closest_jobs};
use crate::api::dispatch::error::DispatchError;
use crate::api::dispatch::interfaces::{AvailableJobsParams, AvailableJobsResponse};
use crate::api::dispatch::rating_gate::can_take_another_job;
use crate::database::employee_store::EmployeeStore;
use crate::database::job::Job;
use crate::database::job_store::JobStore;
use app_state::{DispatchSettings, constants, day_window};
use chrono::Utc;
use common_types::{GeoPoint, JobStatus};
use sqlx::PgPool;
use tracing::{info, instrument};

/// The closest open jobs for today, inside the employee's service areas.
#[instrument(skip(pool, settings))]
pub async fn list_available_jobs(
    pool: &PgPool,
    settings: &DispatchSettings,
    employee_id: i32,
    params: &AvailableJobsParams,
) -> Result<AvailableJobsResponse, DispatchError> {
    let position = GeoPoint::try_from_parts(params.lat, params.lon)
        .map_err(|e| DispatchError::BadRequest(e.to_string()))?;
    let employee = EmployeeStore::find_by_user_id(pool, employee_id)
        .await?
        .ok_or(DispatchError::NotAnEmployee)?;

    let (window_start, window_end) = day_window(constants().timezone, Utc::now());
    let (areas, candidates, active_job_count) = tokio::try_join!(
        EmployeeStore::list_service_areas(pool, employee_id),
        JobStore::list_open_in_window(pool, window_start, window_end),
        JobStore::count_active_for_employee(pool, employee_id),
    )?;

    let origin = Origin {
        point: position,
        zip: areas.first().map(|area| area.zip.as_str()),
    };
    let jobs = closest_jobs(
        candidates,
        &areas,
        origin,
        settings.zip_distance_cap,
        settings.closest_jobs_limit,
    );

    Ok(AvailableJobsResponse {
        jobs,
        active_job_count,
        can_claim_more: can_take_another_job(
            active_job_count,
            employee.average_rating,
            settings.multi_job_rating_threshold,
        ),
    })
}

/// Assigns an open job to the employee.
///
/// The employee row is locked for the duration of the transaction so two claims by the
/// same employee cannot both pass the rating gate. The job itself is taken with a single
/// conditional update, which is what prevents two employees from getting the same job.
#[instrument(skip(pool, settings))]
pub async fn claim_job(
    pool: &PgPool,
    settings: &DispatchSettings,
    employee_id: i32,
    job_id: i64,
) -> Result<Job, DispatchError> {
    let mut tx = pool.begin().await?;

    let employee = EmployeeStore::find_for_update(&mut *tx, employee_id)
        .await?
        .ok_or(DispatchError::NotAnEmployee)?;
    let active = JobStore::count_active_for_employee(&mut *tx, employee_id).await?;
    if !can_take_another_job(
        active,
        employee.average_rating,
        settings.multi_job_rating_threshold,
    ) {
        return Err(DispatchError::RatingTooLow {
            average_rating: employee.average_rating,
            threshold: settings.multi_job_rating_threshold,
        });
    }

    let Some(job) = JobStore::claim(&mut *tx, job_id, employee_id).await? else {
        tx.rollback().await?;
        return Err(explain_unclaimable(pool, job_id).await);
    };
    tx.commit().await?;

    info!(job_id, employee_id, "Job claimed");
    Ok(job)
}

async fn explain_unclaimable(pool: &PgPool, job_id: i64) -> DispatchError {
    match JobStore::find_by_id(pool, job_id).await {
        Ok(None) => DispatchError::NotFound(format!("job {job_id}")),
        Ok(Some(job)) if job.employee_id.is_some() => {
            DispatchError::Conflict("Job has already been claimed.".to_string())
        }
        Ok(Some(job)) if job.locked => DispatchError::Conflict("Job is locked.".to_string()),
        Ok(Some(job)) => DispatchError::Conflict(format!(
            "Job cannot be claimed while {}.",
            status_label(job.status)
        )),
        Err(e) => e.into(),
    }
}

pub async fn list_active_jobs(pool: &PgPool, employee_id: i32) -> Result<Vec<Job>, DispatchError> {
    Ok(JobStore::list_active_for_employee(pool, employee_id).await?)
}

/// Hands a claimed job back so someone else can take it.
#[instrument(skip(pool))]
pub async fn release_job(pool: &PgPool, employee_id: i32, job_id: i64) -> Result<Job, DispatchError> {
    match JobStore::release(pool, job_id, employee_id).await? {
        Some(job) => Ok(job),
        None => Err(explain_failed_step(pool, employee_id, job_id, JobStatus::Claimed).await),
    }
}

#[instrument(skip(pool))]
pub async fn start_job(pool: &PgPool, employee_id: i32, job_id: i64) -> Result<Job, DispatchError> {
    match JobStore::start(pool, job_id, employee_id).await? {
        Some(job) => Ok(job),
        None => Err(explain_failed_step(pool, employee_id, job_id, JobStatus::Claimed).await),
    }
}

#[instrument(skip(pool))]
pub async fn complete_job(
    pool: &PgPool,
    employee_id: i32,
    job_id: i64,
) -> Result<Job, DispatchError> {
    match JobStore::complete(pool, job_id, employee_id).await? {
        Some(job) => {
            info!(job_id, employee_id, "Job completed");
            Ok(job)
        }
        None => Err(explain_failed_step(pool, employee_id, job_id, JobStatus::InProgress).await),
    }
}

async fn explain_failed_step(
    pool: &PgPool,
    employee_id: i32,
    job_id: i64,
    expected: JobStatus,
) -> DispatchError {
    match JobStore::find_by_id(pool, job_id).await {
        Ok(None) => DispatchError::NotFound(format!("job {job_id}")),
        Ok(Some(job)) if job.employee_id != Some(employee_id) => {
            DispatchError::Forbidden("Job is not assigned to you.".to_string())
        }
        Ok(Some(job)) => DispatchError::Conflict(format!(
            "Job is {}, expected it to be {}.",
            status_label(job.status),
            status_label(expected)
        )),
        Err(e) => e.into(),
    }
}

pub(crate) const fn status_label(status: JobStatus) -> &'static str {
    match status {
        JobStatus::Scheduled => "scheduled",
        JobStatus::Claimed => "claimed",
        JobStatus::InProgress => "in progress",
        JobStatus::Completed => "completed",
        JobStatus::Cancelled => "cancelled",
        JobStatus::Paused => "paused",
    }
}
