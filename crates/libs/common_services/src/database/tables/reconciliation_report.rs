use chrono::{DateTime, Utc};
use common_types::PaymentStatus;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use sqlx::types::Json;
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum DiscrepancyKind {
    /// Recorded locally, unknown to the processor.
    MissingAtProcessor,
    /// Known to the processor, never recorded locally.
    MissingLocally,
    AmountMismatch,
    StatusMismatch,
}

/// One charge that does not line up between our records and the processor's.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Discrepancy {
    pub charge_id: String,
    pub kind: DiscrepancyKind,
    pub local_amount_cents: Option<i64>,
    pub processor_amount_cents: Option<i64>,
    pub local_status: Option<PaymentStatus>,
    pub processor_status: Option<PaymentStatus>,
}

/// Corresponds to the 'reconciliation_report' table.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReconciliationReport {
    pub id: i64,
    pub window_start: DateTime<Utc>,
    pub window_end: DateTime<Utc>,
    pub local_count: i32,
    pub processor_count: i32,
    pub local_total_cents: i64,
    pub processor_total_cents: i64,
    pub matched_count: i32,
    pub discrepancy_count: i32,
    #[schema(value_type = Vec<Discrepancy>)]
    pub discrepancies: Json<Vec<Discrepancy>>,
    pub created_at: DateTime<Utc>,
}
