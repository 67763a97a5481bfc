use crate::api_state::ApiContext;
use axum::Json;
use axum::extract::{Path, Query, State};
use common_services::api::reconciliation::error::ReconciliationError;
use common_services::api::reconciliation::interfaces::ReportListParams;
use common_services::api::reconciliation::service::{
    get_report, list_reports, run_reconciliation,
};
use common_services::database::reconciliation_report::ReconciliationReport;

/// Run a reconciliation now instead of waiting for the scheduled task.
#[utoipa::path(
    post,
    path = "/admin/reconciliation/run",
    tag = "Reconciliation",
    responses(
        (status = 200, description = "The stored report.", body = ReconciliationReport),
        (status = 502, description = "Payment processor could not be reached."),
    ),
    security(("bearer_auth" = []))
)]
pub async fn run_reconciliation_handler(
    State(context): State<ApiContext>,
) -> Result<Json<ReconciliationReport>, ReconciliationError> {
    let report = run_reconciliation(
        &context.pool,
        context.processor.as_ref(),
        &context.settings.reconciliation,
    )
    .await?;
    Ok(Json(report))
}

/// Past reconciliation reports, newest first.
#[utoipa::path(
    get,
    path = "/admin/reconciliation/reports",
    tag = "Reconciliation",
    params(ReportListParams),
    responses(
        (status = 200, description = "Reports.", body = Vec<ReconciliationReport>),
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_reports_handler(
    State(context): State<ApiContext>,
    Query(params): Query<ReportListParams>,
) -> Result<Json<Vec<ReconciliationReport>>, ReconciliationError> {
    Ok(Json(list_reports(&context.pool, &params).await?))
}

#[utoipa::path(
    get,
    path = "/admin/reconciliation/reports/{report_id}",
    tag = "Reconciliation",
    params(("report_id" = i64, Path, description = "The report to fetch.")),
    responses(
        (status = 200, description = "Report with its discrepancies.", body = ReconciliationReport),
        (status = 404, description = "Report does not exist."),
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_report_handler(
    State(context): State<ApiContext>,
    Path(report_id): Path<i64>,
) -> Result<Json<ReconciliationReport>, ReconciliationError> {
    Ok(Json(get_report(&context.pool, report_id).await?))
}
