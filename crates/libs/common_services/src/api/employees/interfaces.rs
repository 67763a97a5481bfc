use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Deserialize, Serialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateServiceAreaRequest {
    pub zip: String,
    pub radius_miles: f64,
    /// Optional centre of the area. Without it, membership falls back to the zip proxy.
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}
