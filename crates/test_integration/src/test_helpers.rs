use crate::runner::context::test_context::TestContext;
use crate::test_constants::{ADMIN_EMAIL, PASSWORD};
use chrono::Utc;
use color_eyre::Result;
use color_eyre::eyre::eyre;
use common_services::api::auth::interfaces::{CreateUser, LoginUser, Tokens};
use common_services::api::dispatch::interfaces::{CreateJobRequest, RateJobRequest};
use common_services::api::employees::interfaces::CreateServiceAreaRequest;
use common_services::database::app_user::User;
use common_services::database::employee::EmployeeSummary;
use common_services::database::job::Job;
use common_types::GeoPoint;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use std::sync::atomic::{AtomicU32, Ordering};

static NEXT_USER: AtomicU32 = AtomicU32::new(1);

/// A fresh email address so tests never collide on the unique constraint.
pub fn unique_email(prefix: &str) -> String {
    let n = NEXT_USER.fetch_add(1, Ordering::Relaxed);
    format!("{prefix}{n}@scoop.test")
}

/// Decode a JSON body after checking the status, with the body in the error otherwise.
pub async fn expect_json<T: DeserializeOwned>(
    response: reqwest::Response,
    expected: StatusCode,
) -> Result<T> {
    let status = response.status();
    if status != expected {
        let body = response.text().await.unwrap_or_default();
        return Err(eyre!("expected {expected}, got {status}: {body}"));
    }
    Ok(response.json().await?)
}

pub async fn login_as(context: &TestContext, email: &str) -> Result<String> {
    let response = context
        .http_client
        .post(context.url("/auth/login"))
        .json(&LoginUser {
            email: email.to_owned(),
            password: PASSWORD.to_owned(),
        })
        .send()
        .await?;
    let tokens: Tokens = expect_json(response, StatusCode::OK).await?;
    Ok(tokens.access_token)
}

pub async fn admin_token(context: &TestContext) -> Result<String> {
    login_as(context, ADMIN_EMAIL).await
}

pub async fn register_customer(context: &TestContext) -> Result<(User, String)> {
    let email = unique_email("customer");
    let response = context
        .http_client
        .post(context.url("/auth/register"))
        .json(&CreateUser {
            email: email.clone(),
            name: "Customer".to_owned(),
            password: PASSWORD.to_owned(),
        })
        .send()
        .await?;
    let user: User = expect_json(response, StatusCode::CREATED).await?;
    let token = login_as(context, &email).await?;
    Ok((user, token))
}

/// Create an employee with one service area around `home` and log them in.
pub async fn create_employee(
    context: &TestContext,
    home: GeoPoint,
    zip: &str,
) -> Result<(EmployeeSummary, String)> {
    let admin = admin_token(context).await?;
    let email = unique_email("employee");
    let response = context
        .http_client
        .post(context.url("/admin/employees"))
        .bearer_auth(&admin)
        .json(&CreateUser {
            email: email.clone(),
            name: "Employee".to_owned(),
            password: PASSWORD.to_owned(),
        })
        .send()
        .await?;
    let employee: EmployeeSummary = expect_json(response, StatusCode::CREATED).await?;
    let token = login_as(context, &email).await?;

    let response = context
        .http_client
        .post(context.url("/employee/service-areas"))
        .bearer_auth(&token)
        .json(&CreateServiceAreaRequest {
            zip: zip.to_owned(),
            radius_miles: 10.0,
            latitude: Some(home.lat),
            longitude: Some(home.lon),
        })
        .send()
        .await?;
    if response.status() != StatusCode::CREATED {
        return Err(eyre!("could not add service area: {}", response.status()));
    }

    Ok((employee, token))
}

/// Schedule a job for right now at `location`.
pub async fn create_job(
    context: &TestContext,
    customer_id: i32,
    location: GeoPoint,
    zip: &str,
    earnings_cents: i64,
) -> Result<Job> {
    let admin = admin_token(context).await?;
    let response = context
        .http_client
        .post(context.url("/admin/jobs"))
        .bearer_auth(&admin)
        .json(&CreateJobRequest {
            customer_id,
            scheduled_at: Utc::now(),
            street: "1 Yard Lane".to_owned(),
            city: "Testville".to_owned(),
            state: "NY".to_owned(),
            zip: zip.to_owned(),
            latitude: Some(location.lat),
            longitude: Some(location.lon),
            price_cents: earnings_cents * 2,
            employee_earnings_cents: earnings_cents,
        })
        .send()
        .await?;
    expect_json(response, StatusCode::CREATED).await
}

/// Run a job through claim, start and complete as `token`'s employee.
pub async fn finish_job(context: &TestContext, token: &str, job_id: i64) -> Result<Job> {
    let mut job = None;
    for step in ["claim", "start", "complete"] {
        let response = context
            .http_client
            .post(context.url(&format!("/employee/jobs/{job_id}/{step}")))
            .bearer_auth(token)
            .send()
            .await?;
        job = Some(expect_json::<Job>(response, StatusCode::OK).await?);
    }
    job.ok_or_else(|| eyre!("no steps ran"))
}

pub async fn rate_job(
    context: &TestContext,
    customer_token: &str,
    job_id: i64,
    rating: i16,
) -> Result<Job> {
    let response = context
        .http_client
        .post(context.url(&format!("/customer/jobs/{job_id}/rating")))
        .bearer_auth(customer_token)
        .json(&RateJobRequest { rating })
        .send()
        .await?;
    expect_json(response, StatusCode::OK).await
}
