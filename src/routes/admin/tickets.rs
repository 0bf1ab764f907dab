//! Support ticket queue

use axum::{
    extract::{Query, State},
    routing::get,
    Router,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::models::Ticket;
use crate::response::Listing;
use crate::ApiState;

pub fn router() -> Router<Arc<ApiState>> {
    Router::new().route("/", get(list_tickets))
}

#[derive(Debug, Default, Deserialize)]
pub struct TicketFilter {
    pub status: Option<String>,
}

/// Tickets, optionally narrowed to one status
#[utoipa::path(
    get,
    path = "/admin/api/tickets",
    params(
        ("status" = Option<String>, Query, description = "Exact status match")
    ),
    responses((status = 200, description = "`{tickets, total}`")),
    tag = "tickets"
)]
pub async fn list_tickets(
    State(state): State<Arc<ApiState>>,
    Query(filter): Query<TicketFilter>,
) -> Listing<Ticket> {
    let mut tickets = state.registry.tickets.list();
    if let Some(status) = filter.status.as_deref().filter(|s| !s.is_empty()) {
        tickets.retain(|t| t.status.as_str() == status);
    }
    Listing::new("tickets", tickets)
}
