use app_state::{AppSettings, DispatchSettings, PayoutSettings};
use axum::extract::FromRef;
use common_services::payment_processor::PaymentProcessor;
use sqlx::PgPool;
use std::sync::Arc;

#[derive(Clone)]
pub struct ApiContext {
    pub pool: PgPool,
    pub settings: AppSettings,
    pub processor: Arc<dyn PaymentProcessor>,
}

// Lets handlers and extractors pull out only the part of the state they need.
impl FromRef<ApiContext> for PgPool {
    fn from_ref(state: &ApiContext) -> Self {
        state.pool.clone()
    }
}

impl FromRef<ApiContext> for DispatchSettings {
    fn from_ref(state: &ApiContext) -> Self {
        state.settings.dispatch.clone()
    }
}

impl FromRef<ApiContext> for PayoutSettings {
    fn from_ref(state: &ApiContext) -> Self {
        state.settings.payouts.clone()
    }
}
