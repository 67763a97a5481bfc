use app_state::{FeeSchedule, PayoutSettings};
use common_types::PayoutRail;

/// Gross, fee and net for a payout, all in cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PayoutAmounts {
    pub gross_cents: i64,
    pub fee_cents: i64,
    pub net_cents: i64,
}

#[must_use]
pub fn schedule_for(settings: &PayoutSettings, rail: PayoutRail) -> FeeSchedule {
    match rail {
        PayoutRail::StripeWeekly => settings.stripe_weekly,
        PayoutRail::CashAppSameDay => settings.cash_app_same_day,
    }
}

/// `flat + gross * percent / 100`, with the percentage part rounded half away from zero.
///
/// The percentage is converted to basis points first so the rounding happens on
/// integers. `49.995` cents must round to 50, which `f64` cannot promise.
#[must_use]
pub fn fee_cents(gross_cents: i64, schedule: FeeSchedule) -> i64 {
    let basis_points = (schedule.percent * 100.0).round() as i64;
    let scaled = gross_cents * basis_points;
    let percentage = if scaled >= 0 {
        (scaled + 5_000) / 10_000
    } else {
        (scaled - 5_000) / 10_000
    };
    schedule.flat_cents + percentage
}

#[must_use]
pub fn payout_amounts(gross_cents: i64, schedule: FeeSchedule) -> PayoutAmounts {
    let fee_cents = fee_cents(gross_cents, schedule);
    PayoutAmounts {
        gross_cents,
        fee_cents,
        net_cents: gross_cents - fee_cents,
    }
}
