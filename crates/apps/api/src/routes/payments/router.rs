use crate::api_state::ApiContext;
use crate::routes::payments::handlers::{list_payments_handler, record_payment_handler};
use axum::{Router, routing::post};

pub fn payments_admin_router() -> Router<ApiContext> {
    Router::new().route(
        "/admin/payments",
        post(record_payment_handler).get(list_payments_handler),
    )
}
