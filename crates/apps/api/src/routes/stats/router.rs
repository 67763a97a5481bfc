use crate::api_state::ApiContext;
use crate::routes::stats::handlers::{admin_stats_handler, employee_stats_handler};
use axum::{Router, routing::get};

pub fn stats_employee_router() -> Router<ApiContext> {
    Router::new().route("/employee/stats", get(employee_stats_handler))
}

pub fn stats_admin_router() -> Router<ApiContext> {
    Router::new().route("/admin/stats", get(admin_stats_handler))
}
