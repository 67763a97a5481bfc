use crate::database::job::Job;
use chrono::{DateTime, Utc};
use common_types::JobStatus;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

// --- Query Parameters ---

/// The employee's current position, when the client knows it.
#[derive(Deserialize, Debug, Default, IntoParams)]
pub struct AvailableJobsParams {
    pub lat: Option<f64>,
    pub lon: Option<f64>,
}

#[derive(Deserialize, Debug, Default, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct JobListParams {
    pub status: Option<JobStatus>,
    /// Defaults to 100, capped at 500.
    pub limit: Option<i64>,
}

// --- Request Payloads ---

#[derive(Deserialize, Serialize, Debug, Clone, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateJobRequest {
    pub customer_id: i32,
    pub scheduled_at: DateTime<Utc>,
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub price_cents: i64,
    pub employee_earnings_cents: i64,
}

#[derive(Deserialize, Serialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SetJobLockRequest {
    pub locked: bool,
}

#[derive(Deserialize, Serialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SetJobStatusRequest {
    pub status: JobStatus,
}

#[derive(Deserialize, Serialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RateJobRequest {
    /// 1 to 5 stars.
    pub rating: i16,
}

// --- Responses ---

/// How a distance was obtained.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub enum DistanceBasis {
    /// Great-circle miles between coordinates.
    Haversine,
    /// Capped numeric difference between zip codes, not miles.
    ZipCode,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct JobDistance {
    pub value: f64,
    pub basis: DistanceBasis,
}

#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AvailableJob {
    pub job: Job,
    pub distance: Option<JobDistance>,
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AvailableJobsResponse {
    pub jobs: Vec<AvailableJob>,
    pub active_job_count: i64,
    pub can_claim_more: bool,
}
