use crate::database::DbError;
use crate::database::reconciliation_report::{Discrepancy, ReconciliationReport};
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::{Executor, Postgres};

const REPORT_COLUMNS: &str = r"
    id, window_start, window_end, local_count, processor_count,
    local_total_cents, processor_total_cents, matched_count, discrepancy_count,
    discrepancies, created_at";

/// Everything needed to persist one reconciliation run.
#[derive(Debug, Clone)]
pub struct NewReconciliationReport {
    pub window_start: DateTime<Utc>,
    pub window_end: DateTime<Utc>,
    pub local_count: i32,
    pub processor_count: i32,
    pub local_total_cents: i64,
    pub processor_total_cents: i64,
    pub matched_count: i32,
    pub discrepancies: Vec<Discrepancy>,
}

pub struct ReconciliationStore;

impl ReconciliationStore {
    pub async fn insert(
        executor: impl Executor<'_, Database = Postgres>,
        report: &NewReconciliationReport,
    ) -> Result<ReconciliationReport, DbError> {
        let sql = format!(
            r"
            INSERT INTO reconciliation_report (
                window_start, window_end, local_count, processor_count,
                local_total_cents, processor_total_cents, matched_count,
                discrepancy_count, discrepancies
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING {REPORT_COLUMNS}
            "
        );
        Ok(sqlx::query_as::<_, ReconciliationReport>(&sql)
            .bind(report.window_start)
            .bind(report.window_end)
            .bind(report.local_count)
            .bind(report.processor_count)
            .bind(report.local_total_cents)
            .bind(report.processor_total_cents)
            .bind(report.matched_count)
            .bind(report.discrepancies.len() as i32)
            .bind(Json(&report.discrepancies))
            .fetch_one(executor)
            .await?)
    }

    pub async fn find_by_id(
        executor: impl Executor<'_, Database = Postgres>,
        report_id: i64,
    ) -> Result<Option<ReconciliationReport>, DbError> {
        let sql = format!("SELECT {REPORT_COLUMNS} FROM reconciliation_report WHERE id = $1");
        Ok(sqlx::query_as::<_, ReconciliationReport>(&sql)
            .bind(report_id)
            .fetch_optional(executor)
            .await?)
    }

    pub async fn list(
        executor: impl Executor<'_, Database = Postgres>,
        limit: i64,
    ) -> Result<Vec<ReconciliationReport>, DbError> {
        let sql = format!(
            "SELECT {REPORT_COLUMNS} FROM reconciliation_report ORDER BY created_at DESC, id DESC LIMIT $1"
        );
        Ok(sqlx::query_as::<_, ReconciliationReport>(&sql)
            .bind(limit)
            .fetch_all(executor)
            .await?)
    }

    pub async fn latest(
        executor: impl Executor<'_, Database = Postgres>,
    ) -> Result<Option<ReconciliationReport>, DbError> {
        let sql = format!(
            "SELECT {REPORT_COLUMNS} FROM reconciliation_report ORDER BY created_at DESC, id DESC LIMIT 1"
        );
        Ok(sqlx::query_as::<_, ReconciliationReport>(&sql)
            .fetch_optional(executor)
            .await?)
    }
}
