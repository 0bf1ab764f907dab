//! Liveness plus a summary of the in-memory stores

use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;

use crate::models::NodeStatus;
use crate::ApiState;

#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    /// `healthy`, or `degraded` when no edge node is online
    pub status: String,
    pub version: String,
    pub timestamp: String,
    pub resources: ResourceCounts,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResourceCounts {
    pub customers: usize,
    pub nodes: usize,
    pub online_nodes: usize,
    pub pending_domains: usize,
}

/// Health check
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is up", body = HealthResponse)
    ),
    tag = "health"
)]
pub async fn health_check(State(state): State<Arc<ApiState>>) -> Json<HealthResponse> {
    let registry = &state.registry;
    let nodes = registry.nodes.list();
    let online_nodes = nodes.iter().filter(|n| n.status == NodeStatus::Online).count();

    let status = if !nodes.is_empty() && online_nodes == 0 {
        "degraded"
    } else {
        "healthy"
    };

    Json(HealthResponse {
        status: status.into(),
        version: state.version.clone(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        resources: ResourceCounts {
            customers: registry.customers.list().len(),
            nodes: nodes.len(),
            online_nodes,
            pending_domains: registry.pending_domains.list().len(),
        },
    })
}
