//! Edge node endpoints

use axum::{
    extract::{Path, State},
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::error::{ApiError, ApiResult};
use crate::models::{Node, NodeStatus};
use crate::response::{Listing, Transition};
use crate::ApiState;

pub fn router() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/", get(list_nodes))
        .route("/:id/online", post(bring_online))
        .route("/:id/offline", post(take_offline))
}

/// List nodes
#[utoipa::path(
    get,
    path = "/admin/api/nodes",
    responses((status = 200, description = "`{nodes, total}`")),
    tag = "nodes"
)]
pub async fn list_nodes(State(state): State<Arc<ApiState>>) -> Listing<Node> {
    Listing::new("nodes", state.registry.nodes.list())
}

/// Mark a node online
#[utoipa::path(
    post,
    path = "/admin/api/nodes/{id}/online",
    params(("id" = String, Path, description = "Node id")),
    responses(
        (status = 200, description = "`{success, id, status}`"),
        (status = 404, description = "Unknown node")
    ),
    tag = "nodes"
)]
pub async fn bring_online(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<String>,
) -> ApiResult<Transition<NodeStatus>> {
    set_status(&state, id, NodeStatus::Online)
}

/// Take a node offline
#[utoipa::path(
    post,
    path = "/admin/api/nodes/{id}/offline",
    params(("id" = String, Path, description = "Node id")),
    responses(
        (status = 200, description = "`{success, id, status}`"),
        (status = 404, description = "Unknown node")
    ),
    tag = "nodes"
)]
pub async fn take_offline(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<String>,
) -> ApiResult<Transition<NodeStatus>> {
    set_status(&state, id, NodeStatus::Offline)
}

fn set_status(state: &ApiState, id: String, status: NodeStatus) -> ApiResult<Transition<NodeStatus>> {
    state
        .registry
        .nodes
        .update(&id, &mut |n| n.status = status)
        .ok_or(ApiError::NotFound)?;
    tracing::info!(node = %id, ?status, "node status changed");
    Ok(Transition::new(id, status))
}
