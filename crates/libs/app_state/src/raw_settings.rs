use chrono_tz::Tz;
use serde::Deserialize;

/// Mirror of `config/settings.yaml`.
#[derive(Debug, Deserialize, Clone)]
pub struct RawSettings {
    pub logging: LoggingSettings,
    pub api: ApiSettings,
    pub secrets: SecretSettings,
    pub payment_processor: PaymentProcessorSettings,
    pub dispatch: DispatchSettings,
    pub payouts: PayoutSettings,
    pub reconciliation: ReconciliationSettings,
    pub tasks: TaskSettings,
    pub constants: RawConstants,
}

/// Logging configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingSettings {
    pub level: String,
}

/// Configuration for the API server.
#[derive(Debug, Deserialize, Clone)]
pub struct ApiSettings {
    pub host: String,
    pub port: u32,
    pub allowed_origins: Vec<String>,
    pub public_url: String,
    pub rate_limiting: RateLimitingSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RateLimitingSettings {
    pub req_per_second: u64,
    pub burst_size: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SecretSettings {
    pub jwt: String,
    pub database_url: String,
    /// Secret API key used as bearer token against the payment processor.
    pub payment_processor_key: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PaymentProcessorSettings {
    pub base_url: String,
    /// Number of charges requested per page when listing.
    pub page_size: u32,
}

/// Tunables for the job availability and claim logic.
#[derive(Debug, Deserialize, Clone)]
pub struct DispatchSettings {
    /// How many of the closest jobs an employee gets to see.
    pub closest_jobs_limit: usize,
    /// Minimum average rating needed to hold more than one active job.
    pub multi_job_rating_threshold: f64,
    /// Upper bound of the zip-code difference heuristic.
    pub zip_distance_cap: u32,
}

/// Flat + percentage fee for one payout rail.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
pub struct FeeSchedule {
    pub flat_cents: i64,
    /// Percentage of the gross amount, e.g. `1.5` for 1.5%.
    pub percent: f64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PayoutSettings {
    pub stripe_weekly: FeeSchedule,
    pub cash_app_same_day: FeeSchedule,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ReconciliationSettings {
    /// Length of the trailing window that gets compared.
    pub window_days: i64,
    /// Amount differences up to and including this many cents are ignored.
    pub tolerance_cents: i64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct TaskSettings {
    pub reconciliation_interval_hours: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RawConstants {
    pub timezone: Tz,
    pub database: DatabaseConstants,
    pub auth: AuthConstants,
}

/// Database connection pool configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConstants {
    pub max_connections: u32,
    pub min_connection: u32,
    pub max_lifetime: u64,
    pub idle_timeout: u64,
    pub acquire_timeout: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AuthConstants {
    pub access_token_expiry_minutes: i64,
    pub refresh_token_expiry_days: i64,
}
