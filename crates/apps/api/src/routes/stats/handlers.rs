use crate::api_state::ApiContext;
use axum::extract::State;
use axum::{Extension, Json};
use common_services::api::stats::error::StatsError;
use common_services::api::stats::interfaces::{AdminStats, EmployeeStats};
use common_services::api::stats::service::{admin_stats, employee_stats};
use common_services::database::app_user::User;

/// Workload, earnings and rating of the caller.
#[utoipa::path(
    get,
    path = "/employee/stats",
    tag = "Stats",
    responses(
        (status = 200, description = "Employee dashboard numbers.", body = EmployeeStats),
        (status = 404, description = "Caller has no employee profile."),
    ),
    security(("bearer_auth" = []))
)]
pub async fn employee_stats_handler(
    State(context): State<ApiContext>,
    Extension(user): Extension<User>,
) -> Result<Json<EmployeeStats>, StatsError> {
    Ok(Json(
        employee_stats(&context.pool, &context.settings.dispatch, user.id).await?,
    ))
}

/// Business-wide totals.
#[utoipa::path(
    get,
    path = "/admin/stats",
    tag = "Stats",
    responses(
        (status = 200, description = "Admin dashboard numbers.", body = AdminStats),
    ),
    security(("bearer_auth" = []))
)]
pub async fn admin_stats_handler(
    State(context): State<ApiContext>,
) -> Result<Json<AdminStats>, StatsError> {
    Ok(Json(admin_stats(&context.pool).await?))
}
