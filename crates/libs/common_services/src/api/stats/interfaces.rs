use crate::database::job::JobStatusCount;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Serialize, Deserialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeStats {
    pub active_jobs: i64,
    pub completed_jobs: i64,
    /// Earnings of completed jobs not yet part of a payout.
    pub unpaid_earnings_cents: i64,
    /// Net amount of payouts marked as paid.
    pub paid_out_cents: i64,
    pub average_rating: f64,
    pub rating_count: i32,
    pub can_claim_more: bool,
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdminStats {
    pub jobs_by_status: Vec<JobStatusCount>,
    pub employee_count: i64,
    pub customer_count: i64,
    pub pending_payout_cents: i64,
    pub succeeded_payment_cents: i64,
    /// Discrepancies found by the most recent reconciliation, if any has run.
    pub latest_discrepancy_count: Option<i32>,
}
