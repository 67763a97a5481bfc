use crate::api_state::ApiContext;
use crate::routes::reconciliation::handlers::{
    get_report_handler, list_reports_handler, run_reconciliation_handler,
};
use axum::{
    Router,
    routing::{get, post},
};

pub fn reconciliation_admin_router() -> Router<ApiContext> {
    Router::new()
        .route("/admin/reconciliation/run", post(run_reconciliation_handler))
        .route("/admin/reconciliation/reports", get(list_reports_handler))
        .route(
            "/admin/reconciliation/reports/{report_id}",
            get(get_report_handler),
        )
}
