use crate::runner::context::test_context::TestContext;
use crate::test_helpers::{
    admin_token, create_employee, create_job, expect_json, finish_job, rate_job,
    register_customer,
};
use color_eyre::Result;
use common_services::api::stats::interfaces::{AdminStats, EmployeeStats};
use common_types::{GeoPoint, JobStatus};
use reqwest::StatusCode;

const WATERTOWN: GeoPoint = GeoPoint::new(43.9748, -75.9108);

pub async fn test_employee_stats(context: &TestContext) -> Result<()> {
    // ARRANGE
    let (customer, customer_token) = register_customer(context).await?;
    let (_, employee) = create_employee(context, WATERTOWN, "13601").await?;
    let job = create_job(context, customer.id, WATERTOWN, "13601", 2_500).await?;
    finish_job(context, &employee, job.id).await?;
    rate_job(context, &customer_token, job.id, 5).await?;

    // ACT
    let stats: EmployeeStats = expect_json(
        context
            .http_client
            .get(context.url("/employee/stats"))
            .bearer_auth(&employee)
            .send()
            .await?,
        StatusCode::OK,
    )
    .await?;

    // ASSERT
    assert_eq!(stats.active_jobs, 0);
    assert_eq!(stats.completed_jobs, 1);
    assert_eq!(stats.unpaid_earnings_cents, 2_500);
    assert_eq!(stats.paid_out_cents, 0);
    assert_eq!(stats.rating_count, 1);
    assert!((stats.average_rating - 5.0).abs() < f64::EPSILON);
    assert!(stats.can_claim_more);
    Ok(())
}

pub async fn test_admin_stats(context: &TestContext) -> Result<()> {
    // ARRANGE
    let admin = admin_token(context).await?;

    // ACT
    let stats: AdminStats = expect_json(
        context
            .http_client
            .get(context.url("/admin/stats"))
            .bearer_auth(&admin)
            .send()
            .await?,
        StatusCode::OK,
    )
    .await?;

    // ASSERT
    let completed = stats
        .jobs_by_status
        .iter()
        .find(|c| c.status == JobStatus::Completed)
        .map_or(0, |c| c.count);
    assert!(completed >= 1);
    assert!(stats.employee_count >= 1);
    assert!(stats.customer_count >= 1);
    // Every payout requested so far has been settled.
    assert_eq!(stats.pending_payout_cents, 0);
    assert!(stats.succeeded_payment_cents >= 4_000);
    assert_eq!(stats.latest_discrepancy_count, Some(3));
    Ok(())
}
