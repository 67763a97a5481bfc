mod api_doc;
pub mod auth;
pub mod dispatch;
pub mod employees;
pub mod jobs;
pub mod payments;
pub mod payouts;
pub mod reconciliation;
pub mod root;
pub mod stats;

use crate::api_state::ApiContext;
use crate::auth::middlewares::require_role::require_role;
use crate::auth::middlewares::user::ApiUser;
use crate::auth::router::{auth_protected_router, auth_public_router};
use crate::dispatch::router::dispatch_employee_router;
use crate::employees::router::{employees_admin_router, employees_employee_router};
use crate::jobs::router::{jobs_admin_router, jobs_customer_router};
use crate::payments::router::payments_admin_router;
use crate::payouts::router::{payouts_admin_router, payouts_employee_router};
use crate::reconciliation::router::reconciliation_admin_router;
use crate::root::router::root_public_router;
use crate::routes::api_doc::ApiDoc;
use crate::stats::router::{stats_admin_router, stats_employee_router};
use app_state::RateLimitingSettings;
use axum::Router;
use axum::middleware::{from_extractor_with_state, from_fn_with_state};
use color_eyre::Result;
use common_services::database::app_user::UserRole;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

// --- Router Construction ---
pub fn create_router(api_state: ApiContext) -> Result<Router> {
    Ok(Router::new()
        .merge(SwaggerUi::new("/docs").url("/openapi.json", ApiDoc::openapi()))
        .merge(public_routes(&api_state.settings.api.rate_limiting)?)
        .merge(protected_routes(api_state.clone()))
        .merge(admin_routes(api_state.clone()))
        .merge(employee_routes(api_state.clone()))
        .merge(customer_routes(api_state.clone()))
        .with_state(api_state))
}

fn public_routes(rate_limiting: &RateLimitingSettings) -> Result<Router<ApiContext>> {
    Ok(Router::new()
        .merge(auth_public_router(rate_limiting)?)
        .merge(root_public_router()))
}

fn protected_routes(api_state: ApiContext) -> Router<ApiContext> {
    Router::new()
        .merge(auth_protected_router())
        .route_layer(from_extractor_with_state::<ApiUser, ApiContext>(api_state))
}

fn admin_routes(api_state: ApiContext) -> Router<ApiContext> {
    Router::new()
        .merge(jobs_admin_router())
        .merge(employees_admin_router())
        .merge(payouts_admin_router())
        .merge(payments_admin_router())
        .merge(reconciliation_admin_router())
        .merge(stats_admin_router())
        .route_layer(from_fn_with_state(UserRole::Admin, require_role))
        .route_layer(from_extractor_with_state::<ApiUser, ApiContext>(api_state))
}

fn employee_routes(api_state: ApiContext) -> Router<ApiContext> {
    Router::new()
        .merge(dispatch_employee_router())
        .merge(employees_employee_router())
        .merge(payouts_employee_router())
        .merge(stats_employee_router())
        .route_layer(from_fn_with_state(UserRole::Employee, require_role))
        .route_layer(from_extractor_with_state::<ApiUser, ApiContext>(api_state))
}

fn customer_routes(api_state: ApiContext) -> Router<ApiContext> {
    Router::new()
        .merge(jobs_customer_router())
        .route_layer(from_fn_with_state(UserRole::Customer, require_role))
        .route_layer(from_extractor_with_state::<ApiUser, ApiContext>(api_state))
}
