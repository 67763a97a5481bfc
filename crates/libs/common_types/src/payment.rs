use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

/// Payout delivery mechanism. Maps to the `payout_rail` Postgres enum.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq, Hash, ToSchema)]
#[sqlx(type_name = "payout_rail", rename_all = "snake_case")]
#[serde(rename_all = "camelCase")]
pub enum PayoutRail {
    /// Standard weekly bank transfer.
    StripeWeekly,
    /// Instant transfer through a peer-payment app.
    CashAppSameDay,
}

impl fmt::Display for PayoutRail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StripeWeekly => write!(f, "stripe_weekly"),
            Self::CashAppSameDay => write!(f, "cash_app_same_day"),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq, ToSchema)]
#[sqlx(type_name = "payout_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum PayoutStatus {
    Pending,
    Paid,
    Failed,
}

/// State of a customer charge. Maps to the `payment_status` Postgres enum.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq, Hash, ToSchema)]
#[sqlx(type_name = "payment_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Unpaid,
    Pending,
    Succeeded,
    Failed,
    Refunded,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rail_uses_camel_case_on_the_wire() {
        let rail: PayoutRail = serde_json::from_str("\"cashAppSameDay\"").unwrap();
        assert_eq!(rail, PayoutRail::CashAppSameDay);
        assert_eq!(
            serde_json::to_string(&PayoutRail::StripeWeekly).unwrap(),
            "\"stripeWeekly\""
        );
    }
}
