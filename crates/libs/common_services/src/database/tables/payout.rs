use chrono::{DateTime, Utc};
use common_types::{PayoutRail, PayoutStatus};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// A batch of completed-job earnings paid out to one employee.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Payout {
    pub id: i64,
    pub employee_id: i32,
    pub rail: PayoutRail,
    pub status: PayoutStatus,
    pub gross_cents: i64,
    pub fee_cents: i64,
    pub net_cents: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
