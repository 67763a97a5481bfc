use crate::api_state::ApiContext;
use crate::routes::payouts::handlers::{
    get_eligible_jobs_handler, list_my_payouts_handler, list_payouts_handler,
    quote_payout_handler, request_payout_handler, settle_payout_handler,
};
use axum::{
    Router,
    routing::{get, post},
};

pub fn payouts_employee_router() -> Router<ApiContext> {
    Router::new()
        .route(
            "/employee/payouts",
            get(list_my_payouts_handler).post(request_payout_handler),
        )
        .route("/employee/payouts/eligible", get(get_eligible_jobs_handler))
        .route("/employee/payouts/quote", post(quote_payout_handler))
}

pub fn payouts_admin_router() -> Router<ApiContext> {
    Router::new()
        .route("/admin/payouts", get(list_payouts_handler))
        .route(
            "/admin/payouts/{payout_id}/status",
            post(settle_payout_handler),
        )
}
