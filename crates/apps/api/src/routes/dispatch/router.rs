use crate::api_state::ApiContext;
use crate::routes::dispatch::handlers::{
    claim_job_handler, complete_job_handler, get_active_jobs_handler, get_available_jobs_handler,
    release_job_handler, start_job_handler,
};
use axum::{
    Router,
    routing::{get, post},
};

pub fn dispatch_employee_router() -> Router<ApiContext> {
    Router::new()
        .route("/employee/jobs", get(get_active_jobs_handler))
        .route("/employee/jobs/available", get(get_available_jobs_handler))
        .route("/employee/jobs/{job_id}/claim", post(claim_job_handler))
        .route("/employee/jobs/{job_id}/release", post(release_job_handler))
        .route("/employee/jobs/{job_id}/start", post(start_job_handler))
        .route("/employee/jobs/{job_id}/complete", post(complete_job_handler))
}
