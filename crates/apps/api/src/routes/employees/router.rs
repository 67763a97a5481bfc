use crate::api_state::ApiContext;
use crate::routes::employees::handlers::{
    add_service_area_handler, create_employee_handler, delete_service_area_handler,
    list_employees_handler, list_service_areas_handler,
};
use axum::{
    Router,
    routing::{delete, get, post},
};

pub fn employees_admin_router() -> Router<ApiContext> {
    Router::new().route(
        "/admin/employees",
        post(create_employee_handler).get(list_employees_handler),
    )
}

pub fn employees_employee_router() -> Router<ApiContext> {
    Router::new()
        .route(
            "/employee/service-areas",
            get(list_service_areas_handler).post(add_service_area_handler),
        )
        .route(
            "/employee/service-areas/{area_id}",
            delete(delete_service_area_handler),
        )
}
