use crate::api_state::ApiContext;
use crate::routes::jobs::handlers::{
    create_job_handler, list_customer_jobs_handler, list_jobs_handler, rate_job_handler,
    set_job_lock_handler, set_job_status_handler,
};
use axum::{
    Router,
    routing::{get, post, put},
};

pub fn jobs_admin_router() -> Router<ApiContext> {
    Router::new()
        .route("/admin/jobs", post(create_job_handler).get(list_jobs_handler))
        .route("/admin/jobs/{job_id}/lock", put(set_job_lock_handler))
        .route("/admin/jobs/{job_id}/status", post(set_job_status_handler))
}

pub fn jobs_customer_router() -> Router<ApiContext> {
    Router::new()
        .route("/customer/jobs", get(list_customer_jobs_handler))
        .route("/customer/jobs/{job_id}/rating", post(rate_job_handler))
}
