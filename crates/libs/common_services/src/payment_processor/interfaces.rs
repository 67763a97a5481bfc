use crate::payment_processor::ProcessorError;
use chrono::{DateTime, Utc};
use common_types::PaymentStatus;
use serde::{Deserialize, Serialize};

/// A charge as the payment processor reports it, in our vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessorCharge {
    pub charge_id: String,
    pub amount_cents: i64,
    pub status: PaymentStatus,
    pub created_at: DateTime<Utc>,
}

/// Wire shape of a Stripe charge object, reduced to the fields we read.
#[derive(Debug, Deserialize)]
pub struct StripeCharge {
    pub id: String,
    pub amount: i64,
    pub status: String,
    #[serde(default)]
    pub refunded: bool,
    pub created: i64,
}

#[derive(Debug, Deserialize)]
pub struct StripeChargeList {
    pub data: Vec<StripeCharge>,
    pub has_more: bool,
}

impl TryFrom<StripeCharge> for ProcessorCharge {
    type Error = ProcessorError;

    fn try_from(charge: StripeCharge) -> Result<Self, Self::Error> {
        let status = if charge.refunded {
            PaymentStatus::Refunded
        } else {
            match charge.status.as_str() {
                "succeeded" => PaymentStatus::Succeeded,
                "pending" => PaymentStatus::Pending,
                "failed" => PaymentStatus::Failed,
                other => {
                    return Err(ProcessorError::UnexpectedResponse(format!(
                        "charge {} has unknown status '{other}'",
                        charge.id
                    )));
                }
            }
        };
        let created_at = DateTime::from_timestamp(charge.created, 0).ok_or_else(|| {
            ProcessorError::UnexpectedResponse(format!(
                "charge {} has invalid timestamp {}",
                charge.id, charge.created
            ))
        })?;

        Ok(Self {
            charge_id: charge.id,
            amount_cents: charge.amount,
            status,
            created_at,
        })
    }
}
