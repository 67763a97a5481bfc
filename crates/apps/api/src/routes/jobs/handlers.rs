use crate::api_state::ApiContext;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use common_services::api::dispatch::error::DispatchError;
use common_services::api::dispatch::interfaces::{
    CreateJobRequest, JobListParams, RateJobRequest, SetJobLockRequest, SetJobStatusRequest,
};
use common_services::api::dispatch::scheduling::{
    create_job, list_customer_jobs, list_jobs, rate_job, set_job_locked, set_job_status,
};
use common_services::database::app_user::User;
use common_services::database::job::Job;

/// Schedule a new job for a customer.
#[utoipa::path(
    post,
    path = "/admin/jobs",
    tag = "Jobs",
    request_body = CreateJobRequest,
    responses(
        (status = 201, description = "Job scheduled.", body = Job),
        (status = 400, description = "Invalid job details."),
        (status = 404, description = "Customer does not exist."),
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_job_handler(
    State(context): State<ApiContext>,
    Json(payload): Json<CreateJobRequest>,
) -> Result<(StatusCode, Json<Job>), DispatchError> {
    let job = create_job(&context.pool, payload).await?;
    Ok((StatusCode::CREATED, Json(job)))
}

/// List jobs, optionally filtered by status.
#[utoipa::path(
    get,
    path = "/admin/jobs",
    tag = "Jobs",
    params(JobListParams),
    responses(
        (status = 200, description = "Jobs, latest schedule first.", body = Vec<Job>),
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_jobs_handler(
    State(context): State<ApiContext>,
    Query(params): Query<JobListParams>,
) -> Result<Json<Vec<Job>>, DispatchError> {
    Ok(Json(list_jobs(&context.pool, &params).await?))
}

/// Lock or unlock a job. Locked jobs cannot be claimed.
#[utoipa::path(
    put,
    path = "/admin/jobs/{job_id}/lock",
    tag = "Jobs",
    params(("job_id" = i64, Path, description = "The job to (un)lock.")),
    request_body = SetJobLockRequest,
    responses(
        (status = 200, description = "Updated job.", body = Job),
        (status = 404, description = "Job does not exist."),
    ),
    security(("bearer_auth" = []))
)]
pub async fn set_job_lock_handler(
    State(context): State<ApiContext>,
    Path(job_id): Path<i64>,
    Json(payload): Json<SetJobLockRequest>,
) -> Result<Json<Job>, DispatchError> {
    Ok(Json(set_job_locked(&context.pool, job_id, payload.locked).await?))
}

/// Cancel, pause or resume a job.
#[utoipa::path(
    post,
    path = "/admin/jobs/{job_id}/status",
    tag = "Jobs",
    params(("job_id" = i64, Path, description = "The job to update.")),
    request_body = SetJobStatusRequest,
    responses(
        (status = 200, description = "Updated job.", body = Job),
        (status = 400, description = "Status cannot be set by an admin."),
        (status = 404, description = "Job does not exist."),
        (status = 409, description = "Transition is not allowed from the current status."),
    ),
    security(("bearer_auth" = []))
)]
pub async fn set_job_status_handler(
    State(context): State<ApiContext>,
    Path(job_id): Path<i64>,
    Json(payload): Json<SetJobStatusRequest>,
) -> Result<Json<Job>, DispatchError> {
    Ok(Json(set_job_status(&context.pool, job_id, payload.status).await?))
}

/// The caller's own jobs.
#[utoipa::path(
    get,
    path = "/customer/jobs",
    tag = "Jobs",
    responses(
        (status = 200, description = "Jobs of the customer.", body = Vec<Job>),
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_customer_jobs_handler(
    State(context): State<ApiContext>,
    Extension(user): Extension<User>,
) -> Result<Json<Vec<Job>>, DispatchError> {
    Ok(Json(list_customer_jobs(&context.pool, user.id).await?))
}

/// Rate a completed job from 1 to 5.
#[utoipa::path(
    post,
    path = "/customer/jobs/{job_id}/rating",
    tag = "Jobs",
    params(("job_id" = i64, Path, description = "The job to rate.")),
    request_body = RateJobRequest,
    responses(
        (status = 200, description = "Rated job.", body = Job),
        (status = 400, description = "Rating out of range."),
        (status = 404, description = "Job does not exist."),
        (status = 409, description = "Job is not completed or was already rated."),
    ),
    security(("bearer_auth" = []))
)]
pub async fn rate_job_handler(
    State(context): State<ApiContext>,
    Extension(user): Extension<User>,
    Path(job_id): Path<i64>,
    Json(payload): Json<RateJobRequest>,
) -> Result<Json<Job>, DispatchError> {
    Ok(Json(rate_job(&context.pool, user.id, job_id, payload.rating).await?))
}
