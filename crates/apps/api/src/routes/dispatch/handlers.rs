use crate::api_state::ApiContext;
use app_state::DispatchSettings;
use axum::extract::{Path, Query, State};
use axum::{Extension, Json};
use common_services::api::dispatch::error::DispatchError;
use common_services::api::dispatch::interfaces::{AvailableJobsParams, AvailableJobsResponse};
use common_services::api::dispatch::service::{
    claim_job, complete_job, list_active_jobs, list_available_jobs, release_job, start_job,
};
use common_services::database::app_user::User;
use common_services::database::job::Job;
use sqlx::PgPool;
use tracing::instrument;

/// The closest open jobs for today.
///
/// Only scheduled, unassigned, unlocked jobs inside the employee's service areas are
/// listed. Distances use the given position when there is one, and otherwise fall
/// back to the zip code of the employee's primary service area.
#[utoipa::path(
    get,
    path = "/employee/jobs/available",
    tag = "Dispatch",
    params(AvailableJobsParams),
    responses(
        (status = 200, description = "Closest available jobs, nearest first.", body = AvailableJobsResponse),
        (status = 404, description = "Caller has no employee profile."),
    ),
    security(("bearer_auth" = []))
)]
#[instrument(skip(pool, dispatch, user), fields(user_id = user.id))]
pub async fn get_available_jobs_handler(
    State(pool): State<PgPool>,
    State(dispatch): State<DispatchSettings>,
    Extension(user): Extension<User>,
    Query(params): Query<AvailableJobsParams>,
) -> Result<Json<AvailableJobsResponse>, DispatchError> {
    let response = list_available_jobs(&pool, &dispatch, user.id, &params).await?;
    Ok(Json(response))
}

/// Claim a job.
///
/// An employee who already holds an active job needs the minimum rating to take
/// another one.
#[utoipa::path(
    post,
    path = "/employee/jobs/{job_id}/claim",
    tag = "Dispatch",
    params(("job_id" = i64, Path, description = "The job to claim.")),
    responses(
        (status = 200, description = "Job claimed.", body = Job),
        (status = 403, description = "Rating too low to hold another job."),
        (status = 404, description = "Job does not exist."),
        (status = 409, description = "Job is already claimed, locked or not scheduled."),
    ),
    security(("bearer_auth" = []))
)]
#[instrument(skip(pool, dispatch, user), fields(user_id = user.id))]
pub async fn claim_job_handler(
    State(pool): State<PgPool>,
    State(dispatch): State<DispatchSettings>,
    Extension(user): Extension<User>,
    Path(job_id): Path<i64>,
) -> Result<Json<Job>, DispatchError> {
    let job = claim_job(&pool, &dispatch, user.id, job_id).await?;
    Ok(Json(job))
}

/// List the caller's claimed and in-progress jobs.
#[utoipa::path(
    get,
    path = "/employee/jobs",
    tag = "Dispatch",
    responses(
        (status = 200, description = "Active jobs of the caller.", body = Vec<Job>),
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_active_jobs_handler(
    State(context): State<ApiContext>,
    Extension(user): Extension<User>,
) -> Result<Json<Vec<Job>>, DispatchError> {
    Ok(Json(list_active_jobs(&context.pool, user.id).await?))
}

/// Give a claimed job back.
#[utoipa::path(
    post,
    path = "/employee/jobs/{job_id}/release",
    tag = "Dispatch",
    params(("job_id" = i64, Path, description = "The job to release.")),
    responses(
        (status = 200, description = "Job is scheduled again.", body = Job),
        (status = 403, description = "Job belongs to someone else."),
        (status = 409, description = "Job is not in the claimed state."),
    ),
    security(("bearer_auth" = []))
)]
pub async fn release_job_handler(
    State(context): State<ApiContext>,
    Extension(user): Extension<User>,
    Path(job_id): Path<i64>,
) -> Result<Json<Job>, DispatchError> {
    Ok(Json(release_job(&context.pool, user.id, job_id).await?))
}

/// Start working on a claimed job.
#[utoipa::path(
    post,
    path = "/employee/jobs/{job_id}/start",
    tag = "Dispatch",
    params(("job_id" = i64, Path, description = "The job to start.")),
    responses(
        (status = 200, description = "Job is in progress.", body = Job),
        (status = 403, description = "Job belongs to someone else."),
        (status = 409, description = "Job is not in the claimed state."),
    ),
    security(("bearer_auth" = []))
)]
pub async fn start_job_handler(
    State(context): State<ApiContext>,
    Extension(user): Extension<User>,
    Path(job_id): Path<i64>,
) -> Result<Json<Job>, DispatchError> {
    Ok(Json(start_job(&context.pool, user.id, job_id).await?))
}

/// Mark an in-progress job as done.
#[utoipa::path(
    post,
    path = "/employee/jobs/{job_id}/complete",
    tag = "Dispatch",
    params(("job_id" = i64, Path, description = "The job to complete.")),
    responses(
        (status = 200, description = "Job is completed.", body = Job),
        (status = 403, description = "Job belongs to someone else."),
        (status = 409, description = "Job is not in progress."),
    ),
    security(("bearer_auth" = []))
)]
pub async fn complete_job_handler(
    State(context): State<ApiContext>,
    Extension(user): Extension<User>,
    Path(job_id): Path<i64>,
) -> Result<Json<Job>, DispatchError> {
    Ok(Json(complete_job(&context.pool, user.id, job_id).await?))
}
