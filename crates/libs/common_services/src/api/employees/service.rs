use crate::api::auth::interfaces::CreateUser;
use crate::api::auth::service::insert_user;
use crate::api::dispatch::distance::parse_zip;
use crate::api::employees::error::EmployeeError;
use crate::api::employees::interfaces::CreateServiceAreaRequest;
use crate::database::employee::{EmployeeSummary, ServiceArea};
use crate::database::employee_store::EmployeeStore;
use common_types::{GeoPoint, UserRole};
use sqlx::PgPool;
use tracing::{info, instrument};

/// Creates an employee login and its profile in one transaction.
#[instrument(skip(pool, payload), fields(email = %payload.email))]
pub async fn create_employee(
    pool: &PgPool,
    payload: &CreateUser,
) -> Result<EmployeeSummary, EmployeeError> {
    let mut tx = pool.begin().await?;
    let user = insert_user(&mut *tx, payload, UserRole::Employee).await?;
    let employee = EmployeeStore::create(&mut *tx, user.id).await?;
    tx.commit().await?;

    info!(user_id = user.id, "Employee created");
    Ok(EmployeeSummary {
        user_id: user.id,
        name: user.name,
        email: user.email,
        average_rating: employee.average_rating,
        rating_count: employee.rating_count,
        active_job_count: 0,
    })
}

pub async fn list_employees(pool: &PgPool) -> Result<Vec<EmployeeSummary>, EmployeeError> {
    Ok(EmployeeStore::list_summaries(pool).await?)
}

pub async fn list_service_areas(
    pool: &PgPool,
    employee_id: i32,
) -> Result<Vec<ServiceArea>, EmployeeError> {
    Ok(EmployeeStore::list_service_areas(pool, employee_id).await?)
}

fn validate_service_area(request: &CreateServiceAreaRequest) -> Result<(), EmployeeError> {
    if parse_zip(&request.zip).is_none() {
        return Err(EmployeeError::BadRequest(format!(
            "'{}' is not a valid zip code",
            request.zip
        )));
    }
    if !(request.radius_miles.is_finite() && request.radius_miles > 0.0) {
        return Err(EmployeeError::BadRequest(
            "radiusMiles must be greater than zero".to_string(),
        ));
    }
    GeoPoint::try_from_parts(request.latitude, request.longitude)
        .map(|_| ())
        .map_err(|e| EmployeeError::BadRequest(e.to_string()))
}

#[instrument(skip(pool))]
pub async fn add_service_area(
    pool: &PgPool,
    employee_id: i32,
    request: &CreateServiceAreaRequest,
) -> Result<ServiceArea, EmployeeError> {
    validate_service_area(request)?;
    EmployeeStore::find_by_user_id(pool, employee_id)
        .await?
        .ok_or_else(|| EmployeeError::NotFound("employee profile".to_string()))?;

    Ok(EmployeeStore::add_service_area(
        pool,
        employee_id,
        request.zip.trim(),
        request.radius_miles,
        request.latitude,
        request.longitude,
    )
    .await?)
}

#[instrument(skip(pool))]
pub async fn delete_service_area(
    pool: &PgPool,
    employee_id: i32,
    area_id: i64,
) -> Result<(), EmployeeError> {
    let result = EmployeeStore::delete_service_area(pool, employee_id, area_id).await?;
    if result.rows_affected() == 0 {
        return Err(EmployeeError::NotFound(format!("service area {area_id}")));
    }
    Ok(())
}
