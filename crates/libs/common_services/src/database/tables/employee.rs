use chrono::{DateTime, Utc};
use common_types::GeoPoint;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Field-employee profile, keyed by the `app_user` id.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub user_id: i32,
    pub average_rating: f64,
    pub rating_sum: i32,
    pub rating_count: i32,
    pub created_at: DateTime<Utc>,
}

/// Employee profile joined with the account details, for admin listings.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeSummary {
    pub user_id: i32,
    pub name: String,
    pub email: String,
    pub average_rating: f64,
    pub rating_count: i32,
    pub active_job_count: i64,
}

/// A zip code plus radius an employee is willing to work in.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ServiceArea {
    pub id: i64,
    pub employee_id: i32,
    pub zip: String,
    pub radius_miles: f64,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub created_at: DateTime<Utc>,
}

impl ServiceArea {
    #[must_use]
    pub const fn center(&self) -> Option<GeoPoint> {
        GeoPoint::from_parts(self.latitude, self.longitude)
    }
}
