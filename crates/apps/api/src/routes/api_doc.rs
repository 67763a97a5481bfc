use crate::routes::{
    auth, dispatch, employees, jobs, payments, payouts, reconciliation, root, stats,
};
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::{Modify, OpenApi};

#[derive(OpenApi)]
#[openapi(
    paths(
        root::handlers::root,
        root::handlers::health_check,
        // Auth handlers
        auth::handlers::login,
        auth::handlers::register,
        auth::handlers::refresh_session,
        auth::handlers::logout,
        auth::handlers::get_me,
        // Dispatch handlers
        dispatch::handlers::get_available_jobs_handler,
        dispatch::handlers::claim_job_handler,
        dispatch::handlers::get_active_jobs_handler,
        dispatch::handlers::release_job_handler,
        dispatch::handlers::start_job_handler,
        dispatch::handlers::complete_job_handler,
        // Job handlers
        jobs::handlers::create_job_handler,
        jobs::handlers::list_jobs_handler,
        jobs::handlers::set_job_lock_handler,
        jobs::handlers::set_job_status_handler,
        jobs::handlers::list_customer_jobs_handler,
        jobs::handlers::rate_job_handler,
        // Employee handlers
        employees::handlers::create_employee_handler,
        employees::handlers::list_employees_handler,
        employees::handlers::list_service_areas_handler,
        employees::handlers::add_service_area_handler,
        employees::handlers::delete_service_area_handler,
        // Payout handlers
        payouts::handlers::get_eligible_jobs_handler,
        payouts::handlers::quote_payout_handler,
        payouts::handlers::request_payout_handler,
        payouts::handlers::list_my_payouts_handler,
        payouts::handlers::list_payouts_handler,
        payouts::handlers::settle_payout_handler,
        // Payment handlers
        payments::handlers::record_payment_handler,
        payments::handlers::list_payments_handler,
        // Reconciliation handlers
        reconciliation::handlers::run_reconciliation_handler,
        reconciliation::handlers::list_reports_handler,
        reconciliation::handlers::get_report_handler,
        // Stats handlers
        stats::handlers::employee_stats_handler,
        stats::handlers::admin_stats_handler,
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Auth", description = "Authentication endpoints"),
        (name = "System", description = "Health check"),
        (name = "Dispatch", description = "Finding, claiming and working through jobs as an employee"),
        (name = "Jobs", description = "Scheduling jobs and rating finished work"),
        (name = "Employees", description = "Employee accounts and service areas"),
        (name = "Payouts", description = "Employee earnings and payout requests"),
        (name = "Payments", description = "Customer charges"),
        (name = "Reconciliation", description = "Comparing recorded payments against the payment processor"),
        (name = "Stats", description = "Dashboard numbers"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }
}
