use chrono::{DateTime, Utc};
use common_types::PaymentStatus;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Deserialize, Serialize, Debug, Clone, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecordPaymentRequest {
    pub customer_id: i32,
    pub job_id: Option<i64>,
    pub processor_charge_id: String,
    pub amount_cents: i64,
    pub status: PaymentStatus,
    /// When the charge was made. Defaults to now.
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Deserialize, Debug, Default, IntoParams)]
pub struct PaymentListParams {
    /// Defaults to 100, capped at 500.
    pub limit: Option<i64>,
}
