use serde::Deserialize;
use utoipa::IntoParams;

#[derive(Deserialize, Debug, Default, IntoParams)]
pub struct ReportListParams {
    /// Defaults to 30, capped at 365.
    pub limit: Option<i64>,
}
