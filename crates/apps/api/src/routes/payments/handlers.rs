use crate::api_state::ApiContext;
use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use common_services::api::payments::error::PaymentError;
use common_services::api::payments::interfaces::{PaymentListParams, RecordPaymentRequest};
use common_services::api::payments::service::{list_payments, record_payment};
use common_services::database::payment::Payment;

/// Record a customer charge made at the payment processor.
#[utoipa::path(
    post,
    path = "/admin/payments",
    tag = "Payments",
    request_body = RecordPaymentRequest,
    responses(
        (status = 201, description = "Payment recorded.", body = Payment),
        (status = 400, description = "Invalid payment."),
        (status = 404, description = "Customer or job does not exist."),
        (status = 409, description = "Charge was already recorded."),
    ),
    security(("bearer_auth" = []))
)]
pub async fn record_payment_handler(
    State(context): State<ApiContext>,
    Json(payload): Json<RecordPaymentRequest>,
) -> Result<(StatusCode, Json<Payment>), PaymentError> {
    let payment = record_payment(&context.pool, &payload).await?;
    Ok((StatusCode::CREATED, Json(payment)))
}

/// Most recent payments first.
#[utoipa::path(
    get,
    path = "/admin/payments",
    tag = "Payments",
    params(PaymentListParams),
    responses(
        (status = 200, description = "Recent payments.", body = Vec<Payment>),
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_payments_handler(
    State(context): State<ApiContext>,
    Query(params): Query<PaymentListParams>,
) -> Result<Json<Vec<Payment>>, PaymentError> {
    Ok(Json(list_payments(&context.pool, &params).await?))
}
