use crate::database::DbError;
use crate::database::employee::{Employee, EmployeeSummary, ServiceArea};
use sqlx::postgres::PgQueryResult;
use sqlx::{Executor, Postgres};

const EMPLOYEE_COLUMNS: &str = "user_id, average_rating, rating_sum, rating_count, created_at";
const SERVICE_AREA_COLUMNS: &str =
    "id, employee_id, zip, radius_miles, latitude, longitude, created_at";

pub struct EmployeeStore;

impl EmployeeStore {
    /// Creates the employee profile for an existing user.
    pub async fn create(
        executor: impl Executor<'_, Database = Postgres>,
        user_id: i32,
    ) -> Result<Employee, DbError> {
        let sql = format!("INSERT INTO employee (user_id) VALUES ($1) RETURNING {EMPLOYEE_COLUMNS}");
        Ok(sqlx::query_as::<_, Employee>(&sql)
            .bind(user_id)
            .fetch_one(executor)
            .await?)
    }

    pub async fn find_by_user_id(
        executor: impl Executor<'_, Database = Postgres>,
        user_id: i32,
    ) -> Result<Option<Employee>, DbError> {
        let sql = format!("SELECT {EMPLOYEE_COLUMNS} FROM employee WHERE user_id = $1");
        Ok(sqlx::query_as::<_, Employee>(&sql)
            .bind(user_id)
            .fetch_optional(executor)
            .await?)
    }

    /// Same as `find_by_user_id`, but holds a row lock until the transaction ends.
    /// Serializes concurrent claims made by the same employee.
    pub async fn find_for_update(
        executor: impl Executor<'_, Database = Postgres>,
        user_id: i32,
    ) -> Result<Option<Employee>, DbError> {
        let sql = format!("SELECT {EMPLOYEE_COLUMNS} FROM employee WHERE user_id = $1 FOR UPDATE");
        Ok(sqlx::query_as::<_, Employee>(&sql)
            .bind(user_id)
            .fetch_optional(executor)
            .await?)
    }

    /// Adds a 1-5 rating; `average_rating` is derived from the integer sum and count.
    pub async fn record_rating(
        executor: impl Executor<'_, Database = Postgres>,
        user_id: i32,
        rating: i16,
    ) -> Result<Employee, DbError> {
        let sql = format!(
            r"
            UPDATE employee
            SET rating_sum = rating_sum + $2,
                rating_count = rating_count + 1
            WHERE user_id = $1
            RETURNING {EMPLOYEE_COLUMNS}
            "
        );
        Ok(sqlx::query_as::<_, Employee>(&sql)
            .bind(user_id)
            .bind(i32::from(rating))
            .fetch_one(executor)
            .await?)
    }

    pub async fn count(executor: impl Executor<'_, Database = Postgres>) -> Result<i64, DbError> {
        Ok(sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM employee")
            .fetch_one(executor)
            .await?)
    }

    pub async fn list_summaries(
        executor: impl Executor<'_, Database = Postgres>,
    ) -> Result<Vec<EmployeeSummary>, DbError> {
        Ok(sqlx::query_as::<_, EmployeeSummary>(
            r"
            SELECT
                e.user_id,
                u.name,
                u.email,
                e.average_rating,
                e.rating_count,
                COUNT(j.id) FILTER (WHERE j.status IN ('claimed', 'in_progress')) AS active_job_count
            FROM employee e
            JOIN app_user u ON u.id = e.user_id
            LEFT JOIN job j ON j.employee_id = e.user_id
            GROUP BY e.user_id, u.name, u.email
            ORDER BY u.name
            ",
        )
        .fetch_all(executor)
        .await?)
    }

    //================================================================================
    // Service areas
    //================================================================================

    /// Oldest first; the first entry is the employee's primary area.
    pub async fn list_service_areas(
        executor: impl Executor<'_, Database = Postgres>,
        employee_id: i32,
    ) -> Result<Vec<ServiceArea>, DbError> {
        let sql = format!(
            "SELECT {SERVICE_AREA_COLUMNS} FROM service_area WHERE employee_id = $1 ORDER BY created_at, id"
        );
        Ok(sqlx::query_as::<_, ServiceArea>(&sql)
            .bind(employee_id)
            .fetch_all(executor)
            .await?)
    }

    pub async fn add_service_area(
        executor: impl Executor<'_, Database = Postgres>,
        employee_id: i32,
        zip: &str,
        radius_miles: f64,
        latitude: Option<f64>,
        longitude: Option<f64>,
    ) -> Result<ServiceArea, DbError> {
        let sql = format!(
            r"
            INSERT INTO service_area (employee_id, zip, radius_miles, latitude, longitude)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {SERVICE_AREA_COLUMNS}
            "
        );
        Ok(sqlx::query_as::<_, ServiceArea>(&sql)
            .bind(employee_id)
            .bind(zip)
            .bind(radius_miles)
            .bind(latitude)
            .bind(longitude)
            .fetch_one(executor)
            .await?)
    }

    pub async fn delete_service_area(
        executor: impl Executor<'_, Database = Postgres>,
        employee_id: i32,
        area_id: i64,
    ) -> Result<PgQueryResult, DbError> {
        Ok(
            sqlx::query("DELETE FROM service_area WHERE id = $1 AND employee_id = $2")
                .bind(area_id)
                .bind(employee_id)
                .execute(executor)
                .await?,
        )
    }
}
