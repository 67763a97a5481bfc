use chrono::{DateTime, Utc};
use common_types::{GeoPoint, JobStatus, PaymentStatus};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Corresponds to the 'job' table: one scheduled cleanup visit.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: i64,
    pub customer_id: i32,
    pub employee_id: Option<i32>,
    pub status: JobStatus,
    pub scheduled_at: DateTime<Utc>,
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub locked: bool,
    pub payment_status: PaymentStatus,
    pub price_cents: i64,
    pub employee_earnings_cents: i64,
    pub payout_id: Option<i64>,
    pub rating: Option<i16>,
    pub claimed_at: Option<DateTime<Utc>>,
    pub started_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Job {
    #[must_use]
    pub const fn location(&self) -> Option<GeoPoint> {
        GeoPoint::from_parts(self.latitude, self.longitude)
    }

    /// Completed by an employee and not yet part of any payout.
    #[must_use]
    pub fn is_payable_to(&self, employee_id: i32) -> bool {
        self.status == JobStatus::Completed
            && self.employee_id == Some(employee_id)
            && self.payout_id.is_none()
    }
}

/// Values needed to schedule a new job.
#[derive(Debug, Clone)]
pub struct NewJob {
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

#[derive(Debug, Serialize, Deserialize, FromRow, Clone, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct JobStatusCount {
    pub status: JobStatus,
    pub count: i64,
}
