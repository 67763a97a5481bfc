use crate::database::DbError;
use crate::database::payout::Payout;
use common_types::{PayoutRail, PayoutStatus};
use sqlx::{Executor, Postgres};

const PAYOUT_COLUMNS: &str =
    "id, employee_id, rail, status, gross_cents, fee_cents, net_cents, created_at, updated_at";

pub struct PayoutStore;

impl PayoutStore {
    pub async fn create(
        executor: impl Executor<'_, Database = Postgres>,
        employee_id: i32,
        rail: PayoutRail,
        gross_cents: i64,
        fee_cents: i64,
        net_cents: i64,
    ) -> Result<Payout, DbError> {
        let sql = format!(
            r"
            INSERT INTO payout (employee_id, rail, gross_cents, fee_cents, net_cents)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {PAYOUT_COLUMNS}
            "
        );
        Ok(sqlx::query_as::<_, Payout>(&sql)
            .bind(employee_id)
            .bind(rail)
            .bind(gross_cents)
            .bind(fee_cents)
            .bind(net_cents)
            .fetch_one(executor)
            .await?)
    }

    pub async fn find_by_id(
        executor: impl Executor<'_, Database = Postgres>,
        payout_id: i64,
    ) -> Result<Option<Payout>, DbError> {
        let sql = format!("SELECT {PAYOUT_COLUMNS} FROM payout WHERE id = $1");
        Ok(sqlx::query_as::<_, Payout>(&sql)
            .bind(payout_id)
            .fetch_optional(executor)
            .await?)
    }

    pub async fn list_for_employee(
        executor: impl Executor<'_, Database = Postgres>,
        employee_id: i32,
    ) -> Result<Vec<Payout>, DbError> {
        let sql = format!(
            "SELECT {PAYOUT_COLUMNS} FROM payout WHERE employee_id = $1 ORDER BY created_at DESC, id DESC"
        );
        Ok(sqlx::query_as::<_, Payout>(&sql)
            .bind(employee_id)
            .fetch_all(executor)
            .await?)
    }

    pub async fn list(
        executor: impl Executor<'_, Database = Postgres>,
        status: Option<PayoutStatus>,
    ) -> Result<Vec<Payout>, DbError> {
        let sql = format!(
            r"
            SELECT {PAYOUT_COLUMNS} FROM payout
            WHERE ($1::payout_status IS NULL OR status = $1)
            ORDER BY created_at DESC, id DESC
            "
        );
        Ok(sqlx::query_as::<_, Payout>(&sql)
            .bind(status)
            .fetch_all(executor)
            .await?)
    }

    /// Settles a pending payout. Returns `None` if it is not pending anymore.
    pub async fn settle(
        executor: impl Executor<'_, Database = Postgres>,
        payout_id: i64,
        status: PayoutStatus,
    ) -> Result<Option<Payout>, DbError> {
        let sql = format!(
            r"
            UPDATE payout SET status = $2, updated_at = now()
            WHERE id = $1 AND status = 'pending'
            RETURNING {PAYOUT_COLUMNS}
            "
        );
        Ok(sqlx::query_as::<_, Payout>(&sql)
            .bind(payout_id)
            .bind(status)
            .fetch_optional(executor)
            .await?)
    }

    /// Sum of net amounts already paid to the employee.
    pub async fn total_paid_for_employee(
        executor: impl Executor<'_, Database = Postgres>,
        employee_id: i32,
    ) -> Result<i64, DbError> {
        Ok(sqlx::query_scalar::<_, i64>(
            "SELECT COALESCE(SUM(net_cents), 0)::BIGINT FROM payout WHERE employee_id = $1 AND status = 'paid'",
        )
        .bind(employee_id)
        .fetch_one(executor)
        .await?)
    }

    pub async fn total_pending_cents(
        executor: impl Executor<'_, Database = Postgres>,
    ) -> Result<i64, DbError> {
        Ok(sqlx::query_scalar::<_, i64>(
            "SELECT COALESCE(SUM(net_cents), 0)::BIGINT FROM payout WHERE status = 'pending'",
        )
        .fetch_one(executor)
        .await?)
    }
}
