use crate::database::DbError;
use crate::database::payment::Payment;
use chrono::{DateTime, Utc};
use common_types::PaymentStatus;
use sqlx::{Executor, Postgres};

const PAYMENT_COLUMNS: &str =
    "id, customer_id, job_id, processor_charge_id, amount_cents, status, created_at";

pub struct PaymentStore;

impl PaymentStore {
    pub async fn create(
        executor: impl Executor<'_, Database = Postgres>,
        customer_id: i32,
        job_id: Option<i64>,
        processor_charge_id: &str,
        amount_cents: i64,
        status: PaymentStatus,
        created_at: Option<DateTime<Utc>>,
    ) -> Result<Payment, DbError> {
        let sql = format!(
            r"
            INSERT INTO payment (customer_id, job_id, processor_charge_id, amount_cents, status, created_at)
            VALUES ($1, $2, $3, $4, $5, COALESCE($6, now()))
            RETURNING {PAYMENT_COLUMNS}
            "
        );
        Ok(sqlx::query_as::<_, Payment>(&sql)
            .bind(customer_id)
            .bind(job_id)
            .bind(processor_charge_id)
            .bind(amount_cents)
            .bind(status)
            .bind(created_at)
            .fetch_one(executor)
            .await?)
    }

    pub async fn list_recent(
        executor: impl Executor<'_, Database = Postgres>,
        limit: i64,
    ) -> Result<Vec<Payment>, DbError> {
        let sql = format!(
            "SELECT {PAYMENT_COLUMNS} FROM payment ORDER BY created_at DESC, id DESC LIMIT $1"
        );
        Ok(sqlx::query_as::<_, Payment>(&sql)
            .bind(limit)
            .fetch_all(executor)
            .await?)
    }

    /// Payments created in `[window_start, window_end)`.
    pub async fn list_in_window(
        executor: impl Executor<'_, Database = Postgres>,
        window_start: DateTime<Utc>,
        window_end: DateTime<Utc>,
    ) -> Result<Vec<Payment>, DbError> {
        let sql = format!(
            r"
            SELECT {PAYMENT_COLUMNS} FROM payment
            WHERE created_at >= $1 AND created_at < $2
            ORDER BY created_at, id
            "
        );
        Ok(sqlx::query_as::<_, Payment>(&sql)
            .bind(window_start)
            .bind(window_end)
            .fetch_all(executor)
            .await?)
    }

    pub async fn total_succeeded_cents(
        executor: impl Executor<'_, Database = Postgres>,
    ) -> Result<i64, DbError> {
        Ok(sqlx::query_scalar::<_, i64>(
            "SELECT COALESCE(SUM(amount_cents), 0)::BIGINT FROM payment WHERE status = 'succeeded'",
        )
        .fetch_one(executor)
        .await?)
    }
}
