use crate::{AuthConstants, DatabaseConstants, RawSettings};
use chrono_tz::Tz;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConstants {
    /// Timezone that defines the boundaries of "today" for dispatch.
    pub timezone: Tz,
    pub database: DatabaseConstants,
    pub auth: AuthConstants,
}

impl From<RawSettings> for AppConstants {
    fn from(raw: RawSettings) -> Self {
        Self {
            timezone: raw.constants.timezone,
            database: raw.constants.database,
            auth: raw.constants.auth,
        }
    }
}
