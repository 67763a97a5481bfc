use crate::api_state::ApiContext;
use app_state::PayoutSettings;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use common_services::api::payouts::error::PayoutError;
use common_services::api::payouts::interfaces::{
    EligibleJobsResponse, PayoutListParams, PayoutQuote, PayoutRequest, SettlePayoutRequest,
};
use common_services::api::payouts::service::{
    list_eligible_jobs, list_employee_payouts, list_payouts, quote_payout, request_payout,
    settle_payout,
};
use common_services::database::app_user::User;
use common_services::database::payout::Payout;
use sqlx::PgPool;
use tracing::instrument;

/// Completed jobs that have not been paid out yet.
#[utoipa::path(
    get,
    path = "/employee/payouts/eligible",
    tag = "Payouts",
    responses(
        (status = 200, description = "Eligible jobs and their total earnings.", body = EligibleJobsResponse),
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_eligible_jobs_handler(
    State(context): State<ApiContext>,
    Extension(user): Extension<User>,
) -> Result<Json<EligibleJobsResponse>, PayoutError> {
    Ok(Json(list_eligible_jobs(&context.pool, user.id).await?))
}

/// Preview the fee and net amount of a payout without creating it.
#[utoipa::path(
    post,
    path = "/employee/payouts/quote",
    tag = "Payouts",
    request_body = PayoutRequest,
    responses(
        (status = 200, description = "Payout amounts.", body = PayoutQuote),
        (status = 400, description = "Selection is empty, has duplicates, contains ineligible jobs or does not cover the fee."),
    ),
    security(("bearer_auth" = []))
)]
pub async fn quote_payout_handler(
    State(pool): State<PgPool>,
    State(fees): State<PayoutSettings>,
    Extension(user): Extension<User>,
    Json(payload): Json<PayoutRequest>,
) -> Result<Json<PayoutQuote>, PayoutError> {
    let quote = quote_payout(&pool, &fees, user.id, &payload).await?;
    Ok(Json(quote))
}

/// Request a payout of the selected jobs over the chosen rail.
#[utoipa::path(
    post,
    path = "/employee/payouts",
    tag = "Payouts",
    request_body = PayoutRequest,
    responses(
        (status = 201, description = "Pending payout created.", body = Payout),
        (status = 400, description = "Selection is empty, has duplicates, contains ineligible jobs or does not cover the fee."),
        (status = 409, description = "Some jobs were paid out by a concurrent request."),
    ),
    security(("bearer_auth" = []))
)]
#[instrument(skip(pool, fees, user), fields(user_id = user.id))]
pub async fn request_payout_handler(
    State(pool): State<PgPool>,
    State(fees): State<PayoutSettings>,
    Extension(user): Extension<User>,
    Json(payload): Json<PayoutRequest>,
) -> Result<(StatusCode, Json<Payout>), PayoutError> {
    let payout = request_payout(&pool, &fees, user.id, &payload).await?;
    Ok((StatusCode::CREATED, Json(payout)))
}

/// The caller's payout history.
#[utoipa::path(
    get,
    path = "/employee/payouts",
    tag = "Payouts",
    responses(
        (status = 200, description = "Payouts, newest first.", body = Vec<Payout>),
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_my_payouts_handler(
    State(context): State<ApiContext>,
    Extension(user): Extension<User>,
) -> Result<Json<Vec<Payout>>, PayoutError> {
    Ok(Json(list_employee_payouts(&context.pool, user.id).await?))
}

/// All payouts, optionally filtered by status.
#[utoipa::path(
    get,
    path = "/admin/payouts",
    tag = "Payouts",
    params(PayoutListParams),
    responses(
        (status = 200, description = "Payouts, newest first.", body = Vec<Payout>),
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_payouts_handler(
    State(context): State<ApiContext>,
    Query(params): Query<PayoutListParams>,
) -> Result<Json<Vec<Payout>>, PayoutError> {
    Ok(Json(list_payouts(&context.pool, params.status).await?))
}

/// Mark a pending payout as paid or failed.
///
/// The jobs of a failed payout become eligible again.
#[utoipa::path(
    post,
    path = "/admin/payouts/{payout_id}/status",
    tag = "Payouts",
    params(("payout_id" = i64, Path, description = "The payout to settle.")),
    request_body = SettlePayoutRequest,
    responses(
        (status = 200, description = "Settled payout.", body = Payout),
        (status = 400, description = "Target status is pending."),
        (status = 404, description = "Payout does not exist."),
        (status = 409, description = "Payout was already settled."),
    ),
    security(("bearer_auth" = []))
)]
pub async fn settle_payout_handler(
    State(context): State<ApiContext>,
    Path(payout_id): Path<i64>,
    Json(payload): Json<SettlePayoutRequest>,
) -> Result<Json<Payout>, PayoutError> {
    Ok(Json(settle_payout(&context.pool, payout_id, payload.status).await?))
}
