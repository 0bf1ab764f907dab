//! Plan packages

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;
use utoipa::ToSchema;

use crate::error::{ApiError, ApiResult};
use crate::models::{Package, RuleStatus};
use crate::response::{created, Ack, Deleted, Listing};
use crate::store::next_id;
use crate::validation::LenientJson;
use crate::ApiState;

pub fn router() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/", get(list_packages).post(create_package))
        .route("/:id", put(update_package).delete(delete_package))
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct PackageCreate {
    pub name: String,
    pub price: Option<u32>,
    pub traffic: Option<String>,
    pub domains: Option<u32>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct PackageUpdate {
    pub name: Option<String>,
    pub price: Option<u32>,
    pub traffic: Option<String>,
    pub domains: Option<u32>,
    pub status: Option<RuleStatus>,
}

/// List packages
#[utoipa::path(
    get,
    path = "/admin/api/packages",
    responses((status = 200, description = "`{packages, total}`")),
    tag = "packages"
)]
pub async fn list_packages(State(state): State<Arc<ApiState>>) -> Listing<Package> {
    Listing::new("packages", state.registry.packages.list())
}

/// Create package
#[utoipa::path(
    post,
    path = "/admin/api/packages",
    request_body = PackageCreate,
    responses(
        (status = 201, description = "Package created", body = Package),
        (status = 400, description = "Missing name")
    ),
    tag = "packages"
)]
pub async fn create_package(
    State(state): State<Arc<ApiState>>,
    body: LenientJson,
) -> ApiResult<(StatusCode, Json<Package>)> {
    let input: PackageCreate = body.parse(&["name"])?;

    let package = state.registry.packages.create(Package {
        id: next_id("p"),
        name: input.name,
        price: input.price.unwrap_or(0),
        traffic: input.traffic.unwrap_or_else(|| "-".into()),
        domains: input.domains.unwrap_or(1),
        status: RuleStatus::Active,
        users: 0,
    });
    tracing::info!(package = %package.id, "package created");
    Ok(created(package))
}

/// Merge changes into a package
#[utoipa::path(
    put,
    path = "/admin/api/packages/{id}",
    params(("id" = String, Path, description = "Package id")),
    responses(
        (status = 200, description = "`{success, id, ...package}`"),
        (status = 404, description = "Unknown package")
    ),
    tag = "packages"
)]
pub async fn update_package(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<String>,
    body: LenientJson,
) -> ApiResult<Ack<Package>> {
    let packages = &state.registry.packages;
    if packages.get(&id).is_none() {
        return Err(ApiError::NotFound);
    }
    let mut input: PackageUpdate = body.parse(&[])?;

    let package = packages
        .update(&id, &mut |p| {
            if let Some(v) = input.name.take() {
                p.name = v;
            }
            if let Some(v) = input.price {
                p.price = v;
            }
            if let Some(v) = input.traffic.take() {
                p.traffic = v;
            }
            if let Some(v) = input.domains {
                p.domains = v;
            }
            if let Some(v) = input.status {
                p.status = v;
            }
        })
        .ok_or(ApiError::NotFound)?;
    tracing::info!(package = %id, "package updated");
    Ok(Ack::new(package))
}

/// Delete a package
#[utoipa::path(
    delete,
    path = "/admin/api/packages/{id}",
    params(("id" = String, Path, description = "Package id")),
    responses((status = 200, description = "`{success, id}`")),
    tag = "packages"
)]
pub async fn delete_package(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<String>,
) -> Ack<Deleted> {
    state.registry.packages.delete(&id);
    Ack::deleted(id)
}
