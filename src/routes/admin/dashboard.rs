//! Back-office headline numbers

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;

use crate::models::{NodeStatus, ReviewStatus, TicketStatus};
use crate::ApiState;

pub fn router() -> Router<Arc<ApiState>> {
    Router::new().route("/stats", get(stats))
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_customers: usize,
    pub total_nodes: usize,
    pub online_nodes: usize,
    /// Sum of node bandwidth in Mbps
    pub total_bandwidth: u64,
    /// Revenue for the current month
    pub total_revenue: u64,
    /// Tickets still open
    pub pending_tickets: usize,
    /// Domains waiting for review
    pub pending_domains: usize,
}

/// Platform totals
#[utoipa::path(
    get,
    path = "/admin/api/stats",
    responses((status = 200, description = "Platform totals", body = DashboardStats)),
    tag = "dashboard"
)]
pub async fn stats(State(state): State<Arc<ApiState>>) -> Json<DashboardStats> {
    let registry = &state.registry;
    let nodes = registry.nodes.list();

    Json(DashboardStats {
        total_customers: registry.customers.list().len(),
        total_nodes: nodes.len(),
        online_nodes: nodes.iter().filter(|n| n.status == NodeStatus::Online).count(),
        total_bandwidth: nodes.iter().map(|n| n.bandwidth).sum(),
        total_revenue: registry.finance.month.revenue,
        pending_tickets: registry.tickets.count_where(&|t| t.status == TicketStatus::Open),
        pending_domains: registry
            .pending_domains
            .count_where(&|d| d.status == ReviewStatus::Pending),
    })
}
