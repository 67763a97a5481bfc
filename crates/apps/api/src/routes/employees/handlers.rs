use crate::api_state::ApiContext;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use common_services::api::auth::interfaces::CreateUser;
use common_services::api::employees::error::EmployeeError;
use common_services::api::employees::interfaces::CreateServiceAreaRequest;
use common_services::api::employees::service::{
    add_service_area, create_employee, delete_service_area, list_employees, list_service_areas,
};
use common_services::database::app_user::User;
use common_services::database::employee::{EmployeeSummary, ServiceArea};

/// Create an employee account.
#[utoipa::path(
    post,
    path = "/admin/employees",
    tag = "Employees",
    request_body = CreateUser,
    responses(
        (status = 201, description = "Employee created.", body = EmployeeSummary),
        (status = 400, description = "Invalid email, name or password."),
        (status = 409, description = "Email already in use."),
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_employee_handler(
    State(context): State<ApiContext>,
    Json(payload): Json<CreateUser>,
) -> Result<(StatusCode, Json<EmployeeSummary>), EmployeeError> {
    let employee = create_employee(&context.pool, &payload).await?;
    Ok((StatusCode::CREATED, Json(employee)))
}

/// List employees with their rating and current workload.
#[utoipa::path(
    get,
    path = "/admin/employees",
    tag = "Employees",
    responses(
        (status = 200, description = "All employees.", body = Vec<EmployeeSummary>),
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_employees_handler(
    State(context): State<ApiContext>,
) -> Result<Json<Vec<EmployeeSummary>>, EmployeeError> {
    Ok(Json(list_employees(&context.pool).await?))
}

/// The caller's service areas, oldest (primary) first.
#[utoipa::path(
    get,
    path = "/employee/service-areas",
    tag = "Employees",
    responses(
        (status = 200, description = "Service areas.", body = Vec<ServiceArea>),
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_service_areas_handler(
    State(context): State<ApiContext>,
    Extension(user): Extension<User>,
) -> Result<Json<Vec<ServiceArea>>, EmployeeError> {
    Ok(Json(list_service_areas(&context.pool, user.id).await?))
}

/// Add a service area.
#[utoipa::path(
    post,
    path = "/employee/service-areas",
    tag = "Employees",
    request_body = CreateServiceAreaRequest,
    responses(
        (status = 201, description = "Service area added.", body = ServiceArea),
        (status = 400, description = "Invalid zip, radius or centre."),
    ),
    security(("bearer_auth" = []))
)]
pub async fn add_service_area_handler(
    State(context): State<ApiContext>,
    Extension(user): Extension<User>,
    Json(payload): Json<CreateServiceAreaRequest>,
) -> Result<(StatusCode, Json<ServiceArea>), EmployeeError> {
    let area = add_service_area(&context.pool, user.id, &payload).await?;
    Ok((StatusCode::CREATED, Json(area)))
}

/// Remove one of the caller's service areas.
#[utoipa::path(
    delete,
    path = "/employee/service-areas/{area_id}",
    tag = "Employees",
    params(("area_id" = i64, Path, description = "The service area to remove.")),
    responses(
        (status = 204, description = "Service area removed."),
        (status = 404, description = "No such service area for this employee."),
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_service_area_handler(
    State(context): State<ApiContext>,
    Extension(user): Extension<User>,
    Path(area_id): Path<i64>,
) -> Result<StatusCode, EmployeeError> {
    delete_service_area(&context.pool, user.id, area_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
