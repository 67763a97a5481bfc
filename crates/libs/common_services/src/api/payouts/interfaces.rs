use crate::database::job::Job;
use common_types::{PayoutRail, PayoutStatus};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Deserialize, Serialize, Debug, Clone, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PayoutRequest {
    pub job_ids: Vec<i64>,
    pub rail: PayoutRail,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PayoutQuote {
    pub rail: PayoutRail,
    pub job_ids: Vec<i64>,
    pub gross_cents: i64,
    pub fee_cents: i64,
    pub net_cents: i64,
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EligibleJobsResponse {
    pub jobs: Vec<Job>,
    pub total_earnings_cents: i64,
}

#[derive(Deserialize, Debug, Default, IntoParams)]
pub struct PayoutListParams {
    pub status: Option<PayoutStatus>,
}

#[derive(Deserialize, Serialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SettlePayoutRequest {
    /// `paid` or `failed`.
    pub status: PayoutStatus,
}
