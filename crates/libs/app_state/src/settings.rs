use crate::{
    ApiSettings, DispatchSettings, LoggingSettings, PaymentProcessorSettings, PayoutSettings,
    RawSettings, ReconciliationSettings, SecretSettings, TaskSettings,
};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct AppSettings {
    pub logging: LoggingSettings,
    pub api: ApiSettings,
    pub secrets: SecretSettings,
    pub payment_processor: PaymentProcessorSettings,
    pub dispatch: DispatchSettings,
    pub payouts: PayoutSettings,
    pub reconciliation: ReconciliationSettings,
    pub tasks: TaskSettings,
}

impl From<RawSettings> for AppSettings {
    fn from(raw: RawSettings) -> Self {
        Self {
            logging: raw.logging,
            api: raw.api,
            secrets: raw.secrets,
            payment_processor: raw.payment_processor,
            dispatch: raw.dispatch,
            payouts: raw.payouts,
            reconciliation: raw.reconciliation,
            tasks: raw.tasks,
        }
    }
}
