use crate::database::DbError;
use crate::database::job::{Job, JobStatusCount, NewJob};
use chrono::{DateTime, Utc};
use common_types::{JobStatus, PaymentStatus};
use sqlx::{Executor, Postgres};

const JOB_COLUMNS: &str = r"
    id, customer_id, employee_id, status, scheduled_at,
    street, city, state, zip, latitude, longitude,
    locked, payment_status, price_cents, employee_earnings_cents, payout_id, rating,
    claimed_at, started_at, completed_at, created_at, updated_at";

pub struct JobStore;

impl JobStore {
    //================================================================================
    // Core Job Management (CRUD)
    //================================================================================

    pub async fn create(
        executor: impl Executor<'_, Database = Postgres>,
        new_job: &NewJob,
    ) -> Result<Job, DbError> {
        let sql = format!(
            r"
            INSERT INTO job (
                customer_id, scheduled_at, street, city, state, zip,
                latitude, longitude, price_cents, employee_earnings_cents
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING {JOB_COLUMNS}
            "
        );
        Ok(sqlx::query_as::<_, Job>(&sql)
            .bind(new_job.customer_id)
            .bind(new_job.scheduled_at)
            .bind(&new_job.street)
            .bind(&new_job.city)
            .bind(&new_job.state)
            .bind(&new_job.zip)
            .bind(new_job.latitude)
            .bind(new_job.longitude)
            .bind(new_job.price_cents)
            .bind(new_job.employee_earnings_cents)
            .fetch_one(executor)
            .await?)
    }

    pub async fn find_by_id(
        executor: impl Executor<'_, Database = Postgres>,
        job_id: i64,
    ) -> Result<Option<Job>, DbError> {
        let sql = format!("SELECT {JOB_COLUMNS} FROM job WHERE id = $1");
        Ok(sqlx::query_as::<_, Job>(&sql)
            .bind(job_id)
            .fetch_optional(executor)
            .await?)
    }

    pub async fn find_by_ids(
        executor: impl Executor<'_, Database = Postgres>,
        job_ids: &[i64],
    ) -> Result<Vec<Job>, DbError> {
        let sql = format!("SELECT {JOB_COLUMNS} FROM job WHERE id = ANY($1) ORDER BY id");
        Ok(sqlx::query_as::<_, Job>(&sql)
            .bind(job_ids)
            .fetch_all(executor)
            .await?)
    }

    /// Lists jobs, newest schedule first, optionally filtered on status.
    pub async fn list(
        executor: impl Executor<'_, Database = Postgres>,
        status: Option<JobStatus>,
        limit: i64,
    ) -> Result<Vec<Job>, DbError> {
        let sql = format!(
            r"
            SELECT {JOB_COLUMNS} FROM job
            WHERE ($1::job_status IS NULL OR status = $1)
            ORDER BY scheduled_at DESC, id DESC
            LIMIT $2
            "
        );
        Ok(sqlx::query_as::<_, Job>(&sql)
            .bind(status)
            .bind(limit)
            .fetch_all(executor)
            .await?)
    }

    pub async fn list_for_customer(
        executor: impl Executor<'_, Database = Postgres>,
        customer_id: i32,
    ) -> Result<Vec<Job>, DbError> {
        let sql = format!(
            "SELECT {JOB_COLUMNS} FROM job WHERE customer_id = $1 ORDER BY scheduled_at DESC, id DESC"
        );
        Ok(sqlx::query_as::<_, Job>(&sql)
            .bind(customer_id)
            .fetch_all(executor)
            .await?)
    }

    //================================================================================
    // Dispatch
    //================================================================================

    /// Unassigned, unlocked, scheduled jobs whose visit falls in `[window_start, window_end)`.
    pub async fn list_open_in_window(
        executor: impl Executor<'_, Database = Postgres>,
        window_start: DateTime<Utc>,
        window_end: DateTime<Utc>,
    ) -> Result<Vec<Job>, DbError> {
        let sql = format!(
            r"
            SELECT {JOB_COLUMNS} FROM job
            WHERE status = 'scheduled'
              AND employee_id IS NULL
              AND NOT locked
              AND scheduled_at >= $1
              AND scheduled_at < $2
            ORDER BY scheduled_at, id
            "
        );
        Ok(sqlx::query_as::<_, Job>(&sql)
            .bind(window_start)
            .bind(window_end)
            .fetch_all(executor)
            .await?)
    }

    pub async fn list_active_for_employee(
        executor: impl Executor<'_, Database = Postgres>,
        employee_id: i32,
    ) -> Result<Vec<Job>, DbError> {
        let sql = format!(
            r"
            SELECT {JOB_COLUMNS} FROM job
            WHERE employee_id = $1 AND status IN ('claimed', 'in_progress')
            ORDER BY scheduled_at, id
            "
        );
        Ok(sqlx::query_as::<_, Job>(&sql)
            .bind(employee_id)
            .fetch_all(executor)
            .await?)
    }

    pub async fn count_active_for_employee(
        executor: impl Executor<'_, Database = Postgres>,
        employee_id: i32,
    ) -> Result<i64, DbError> {
        Ok(sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM job WHERE employee_id = $1 AND status IN ('claimed', 'in_progress')",
        )
        .bind(employee_id)
        .fetch_one(executor)
        .await?)
    }

    pub async fn count_completed_for_employee(
        executor: impl Executor<'_, Database = Postgres>,
        employee_id: i32,
    ) -> Result<i64, DbError> {
        Ok(sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM job WHERE employee_id = $1 AND status = 'completed'",
        )
        .bind(employee_id)
        .fetch_one(executor)
        .await?)
    }

    /// Assigns the job to the employee in a single conditional update.
    ///
    /// Returns `None` when the job is missing, already assigned, locked or not scheduled.
    /// Concurrent callers racing for the same row are serialized by Postgres, so at most
    /// one of them gets a row back.
    pub async fn claim(
        executor: impl Executor<'_, Database = Postgres>,
        job_id: i64,
        employee_id: i32,
    ) -> Result<Option<Job>, DbError> {
        let sql = format!(
            r"
            UPDATE job
            SET employee_id = $2,
                status = 'claimed',
                claimed_at = now(),
                updated_at = now()
            WHERE id = $1
              AND employee_id IS NULL
              AND status = 'scheduled'
              AND NOT locked
            RETURNING {JOB_COLUMNS}
            "
        );
        Ok(sqlx::query_as::<_, Job>(&sql)
            .bind(job_id)
            .bind(employee_id)
            .fetch_optional(executor)
            .await?)
    }

    /// Hands a claimed (not yet started) job back to the pool.
    pub async fn release(
        executor: impl Executor<'_, Database = Postgres>,
        job_id: i64,
        employee_id: i32,
    ) -> Result<Option<Job>, DbError> {
        let sql = format!(
            r"
            UPDATE job
            SET employee_id = NULL,
                status = 'scheduled',
                claimed_at = NULL,
                updated_at = now()
            WHERE id = $1 AND employee_id = $2 AND status = 'claimed'
            RETURNING {JOB_COLUMNS}
            "
        );
        Ok(sqlx::query_as::<_, Job>(&sql)
            .bind(job_id)
            .bind(employee_id)
            .fetch_optional(executor)
            .await?)
    }

    pub async fn start(
        executor: impl Executor<'_, Database = Postgres>,
        job_id: i64,
        employee_id: i32,
    ) -> Result<Option<Job>, DbError> {
        let sql = format!(
            r"
            UPDATE job
            SET status = 'in_progress', started_at = now(), updated_at = now()
            WHERE id = $1 AND employee_id = $2 AND status = 'claimed'
            RETURNING {JOB_COLUMNS}
            "
        );
        Ok(sqlx::query_as::<_, Job>(&sql)
            .bind(job_id)
            .bind(employee_id)
            .fetch_optional(executor)
            .await?)
    }

    pub async fn complete(
        executor: impl Executor<'_, Database = Postgres>,
        job_id: i64,
        employee_id: i32,
    ) -> Result<Option<Job>, DbError> {
        let sql = format!(
            r"
            UPDATE job
            SET status = 'completed', completed_at = now(), updated_at = now()
            WHERE id = $1 AND employee_id = $2 AND status = 'in_progress'
            RETURNING {JOB_COLUMNS}
            "
        );
        Ok(sqlx::query_as::<_, Job>(&sql)
            .bind(job_id)
            .bind(employee_id)
            .fetch_optional(executor)
            .await?)
    }

    //================================================================================
    // Admin
    //================================================================================

    pub async fn set_locked(
        executor: impl Executor<'_, Database = Postgres>,
        job_id: i64,
        locked: bool,
    ) -> Result<Option<Job>, DbError> {
        let sql = format!(
            "UPDATE job SET locked = $2, updated_at = now() WHERE id = $1 RETURNING {JOB_COLUMNS}"
        );
        Ok(sqlx::query_as::<_, Job>(&sql)
            .bind(job_id)
            .bind(locked)
            .fetch_optional(executor)
            .await?)
    }

    /// Moves a job from `from` to `to`, only if it is still in `from`.
    /// Going back to `scheduled` or `paused` also unassigns the employee.
    pub async fn transition(
        executor: impl Executor<'_, Database = Postgres>,
        job_id: i64,
        from: JobStatus,
        to: JobStatus,
    ) -> Result<Option<Job>, DbError> {
        let sql = format!(
            r"
            UPDATE job
            SET status = $3,
                employee_id = CASE WHEN $3::job_status IN ('scheduled', 'paused') THEN NULL ELSE employee_id END,
                claimed_at = CASE WHEN $3::job_status IN ('scheduled', 'paused') THEN NULL ELSE claimed_at END,
                updated_at = now()
            WHERE id = $1 AND status = $2
            RETURNING {JOB_COLUMNS}
            "
        );
        Ok(sqlx::query_as::<_, Job>(&sql)
            .bind(job_id)
            .bind(from)
            .bind(to)
            .fetch_optional(executor)
            .await?)
    }

    pub async fn set_payment_status(
        executor: impl Executor<'_, Database = Postgres>,
        job_id: i64,
        payment_status: PaymentStatus,
    ) -> Result<Option<Job>, DbError> {
        let sql = format!(
            "UPDATE job SET payment_status = $2, updated_at = now() WHERE id = $1 RETURNING {JOB_COLUMNS}"
        );
        Ok(sqlx::query_as::<_, Job>(&sql)
            .bind(job_id)
            .bind(payment_status)
            .fetch_optional(executor)
            .await?)
    }

    pub async fn count_by_status(
        executor: impl Executor<'_, Database = Postgres>,
    ) -> Result<Vec<JobStatusCount>, DbError> {
        Ok(sqlx::query_as::<_, JobStatusCount>(
            "SELECT status, COUNT(*) AS count FROM job GROUP BY status ORDER BY status",
        )
        .fetch_all(executor)
        .await?)
    }

    //================================================================================
    // Ratings
    //================================================================================

    /// Stores the customer's rating on their own completed, unrated job.
    pub async fn set_rating(
        executor: impl Executor<'_, Database = Postgres>,
        job_id: i64,
        customer_id: i32,
        rating: i16,
    ) -> Result<Option<Job>, DbError> {
        let sql = format!(
            r"
            UPDATE job
            SET rating = $3, updated_at = now()
            WHERE id = $1
              AND customer_id = $2
              AND status = 'completed'
              AND rating IS NULL
            RETURNING {JOB_COLUMNS}
            "
        );
        Ok(sqlx::query_as::<_, Job>(&sql)
            .bind(job_id)
            .bind(customer_id)
            .bind(rating)
            .fetch_optional(executor)
            .await?)
    }

    //================================================================================
    // Payouts
    //================================================================================

    /// Completed jobs of this employee that are not part of a payout yet.
    pub async fn list_unpaid_completed(
        executor: impl Executor<'_, Database = Postgres>,
        employee_id: i32,
    ) -> Result<Vec<Job>, DbError> {
        let sql = format!(
            r"
            SELECT {JOB_COLUMNS} FROM job
            WHERE employee_id = $1 AND status = 'completed' AND payout_id IS NULL
            ORDER BY completed_at, id
            "
        );
        Ok(sqlx::query_as::<_, Job>(&sql)
            .bind(employee_id)
            .fetch_all(executor)
            .await?)
    }

    pub async fn unpaid_earnings_for_employee(
        executor: impl Executor<'_, Database = Postgres>,
        employee_id: i32,
    ) -> Result<i64, DbError> {
        Ok(sqlx::query_scalar::<_, i64>(
            r"
            SELECT COALESCE(SUM(employee_earnings_cents), 0)::BIGINT FROM job
            WHERE employee_id = $1 AND status = 'completed' AND payout_id IS NULL
            ",
        )
        .bind(employee_id)
        .fetch_one(executor)
        .await?)
    }

    /// Links the given jobs to a payout. Only rows that are still payable are touched,
    /// so the caller compares the affected count against the selection size.
    pub async fn attach_to_payout(
        executor: impl Executor<'_, Database = Postgres>,
        payout_id: i64,
        employee_id: i32,
        job_ids: &[i64],
    ) -> Result<u64, DbError> {
        let result = sqlx::query(
            r"
            UPDATE job
            SET payout_id = $1, updated_at = now()
            WHERE id = ANY($3)
              AND employee_id = $2
              AND status = 'completed'
              AND payout_id IS NULL
            ",
        )
        .bind(payout_id)
        .bind(employee_id)
        .bind(job_ids)
        .execute(executor)
        .await?;
        Ok(result.rows_affected())
    }

    pub async fn detach_from_payout(
        executor: impl Executor<'_, Database = Postgres>,
        payout_id: i64,
    ) -> Result<u64, DbError> {
        let result =
            sqlx::query("UPDATE job SET payout_id = NULL, updated_at = now() WHERE payout_id = $1")
                .bind(payout_id)
                .execute(executor)
                .await?;
        Ok(result.rows_affected())
    }
}
