#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::cast_precision_loss,
    clippy::cast_possible_wrap
)]

#[cfg(test)]
pub mod runner;
#[cfg(test)]
pub mod test_constants;
#[cfg(test)]
pub mod test_helpers;

#[cfg(test)]
mod test_runner {
    use crate::runner::context::test_context::TestContext;
    use crate::runner::orchestration_utils::setup_tracing_and_panic_handling;
    use crate::tests::test_auth::{
        test_duplicate_register, test_login, test_logout, test_refresh, test_register_admin,
        test_register_customer, test_role_guard,
    };
    use crate::tests::test_dispatch::{
        test_available_jobs, test_claim_race, test_job_lifecycle, test_locked_job_is_hidden,
        test_rating_exactly_at_threshold, test_rating_gate, test_rating_gate_concurrent_claims,
    };
    use crate::tests::test_payouts::{test_failed_payout_frees_jobs, test_payout_flow};
    use crate::tests::test_reconciliation::{test_duplicate_payment, test_reconciliation_report};
    use crate::tests::test_root::test_health_endpoint;
    use crate::tests::test_stats::{test_admin_stats, test_employee_stats};
    use crate::{execute_suite, run_test};
    use color_eyre::Result;
    use colored::*;
    use std::time::Instant;

    /// Needs a reachable Postgres at the url in `assets/settings.yaml`.
    #[tokio::test]
    #[ignore = "requires a running Postgres instance"]
    async fn integration_suite() -> Result<()> {
        setup_tracing_and_panic_handling();
        let context = TestContext::new().await?;

        execute_suite!(
            &context,
            [
                // -- Root --
                test_health_endpoint,
                // -- Auth --
                test_register_admin,
                test_register_customer,
                test_duplicate_register,
                test_login,
                test_refresh,
                test_logout,
                test_role_guard,
                // -- Dispatch --
                test_available_jobs,
                test_locked_job_is_hidden,
                test_claim_race,
                test_rating_gate,
                test_rating_gate_concurrent_claims,
                test_rating_exactly_at_threshold,
                test_job_lifecycle,
                // -- Payouts --
                test_payout_flow,
                test_failed_payout_frees_jobs,
                // -- Payments & reconciliation --
                test_duplicate_payment,
                test_reconciliation_report,
                // -- Stats --
                test_employee_stats,
                test_admin_stats,
            ]
        );

        Ok(())
    }
}
