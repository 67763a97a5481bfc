use chrono::{DateTime, Utc};
use common_types::PaymentStatus;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// A customer charge as recorded locally.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub id: i64,
    pub customer_id: i32,
    pub job_id: Option<i64>,
    pub processor_charge_id: String,
    pub amount_cents: i64,
    pub status: PaymentStatus,
    pub created_at: DateTime<Utc>,
}
