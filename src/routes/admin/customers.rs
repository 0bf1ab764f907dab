//! Customer management endpoints

use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;

use crate::error::{ApiError, ApiResult};
use crate::models::{Customer, CustomerStatus};
use crate::response::{Listing, Transition};
use crate::ApiState;

pub fn router() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/", get(list_customers))
        .route("/:id", get(get_customer))
        .route("/:id/suspend", post(suspend_customer))
        .route("/:id/activate", post(activate_customer))
}

/// List customers
#[utoipa::path(
    get,
    path = "/admin/api/customers",
    responses((status = 200, description = "`{customers, total}`")),
    tag = "customers"
)]
pub async fn list_customers(State(state): State<Arc<ApiState>>) -> Listing<Customer> {
    Listing::new("customers", state.registry.customers.list())
}

/// Get customer
#[utoipa::path(
    get,
    path = "/admin/api/customers/{id}",
    params(("id" = String, Path, description = "Customer id")),
    responses(
        (status = 200, description = "Customer", body = Customer),
        (status = 404, description = "Unknown customer")
    ),
    tag = "customers"
)]
pub async fn get_customer(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<Customer>> {
    state
        .registry
        .customers
        .get(&id)
        .map(Json)
        .ok_or(ApiError::NotFound)
}

/// Suspend a customer
#[utoipa::path(
    post,
    path = "/admin/api/customers/{id}/suspend",
    params(("id" = String, Path, description = "Customer id")),
    responses(
        (status = 200, description = "`{success, id, status}`"),
        (status = 404, description = "Unknown customer")
    ),
    tag = "customers"
)]
pub async fn suspend_customer(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<String>,
) -> ApiResult<Transition<CustomerStatus>> {
    set_status(&state, id, CustomerStatus::Suspended)
}

/// Reactivate a customer
#[utoipa::path(
    post,
    path = "/admin/api/customers/{id}/activate",
    params(("id" = String, Path, description = "Customer id")),
    responses(
        (status = 200, description = "`{success, id, status}`"),
        (status = 404, description = "Unknown customer")
    ),
    tag = "customers"
)]
pub async fn activate_customer(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<String>,
) -> ApiResult<Transition<CustomerStatus>> {
    set_status(&state, id, CustomerStatus::Active)
}

fn set_status(
    state: &ApiState,
    id: String,
    status: CustomerStatus,
) -> ApiResult<Transition<CustomerStatus>> {
    state
        .registry
        .customers
        .update(&id, &mut |c| c.status = status)
        .ok_or(ApiError::NotFound)?;
    tracing::info!(customer = %id, ?status, "customer status changed");
    Ok(Transition::new(id, status))
}
