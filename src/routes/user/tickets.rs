//! Ticket submission from the control panel

use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::error::ApiResult;
use crate::models::{Ticket, TicketPriority, TicketStatus};
use crate::response::created;
use crate::store::{next_ticket_id, now_rfc3339};
use crate::validation::LenientJson;
use crate::ApiState;

pub fn router() -> Router<Arc<ApiState>> {
    Router::new().route("/", post(submit_ticket))
}

#[derive(Debug, Deserialize)]
pub struct TicketInput {
    pub subject: String,
    pub content: String,
    pub priority: Option<TicketPriority>,
}

/// Acknowledgment returned to the submitter
#[derive(Debug, Serialize)]
pub struct TicketReceipt {
    pub id: String,
    pub subject: String,
    pub status: TicketStatus,
    pub priority: TicketPriority,
    pub created: String,
}

/// Open a support ticket
#[utoipa::path(
    post,
    path = "/api/tickets",
    responses(
        (status = 201, description = "Ticket receipt"),
        (status = 400, description = "Missing subject or content")
    ),
    tag = "tickets"
)]
pub async fn submit_ticket(
    State(state): State<Arc<ApiState>>,
    body: LenientJson,
) -> ApiResult<(StatusCode, Json<TicketReceipt>)> {
    let input: TicketInput = body.parse(&["subject", "content"])?;

    let ticket = state.registry.tickets.create(Ticket {
        id: next_ticket_id(),
        subject: input.subject,
        content: Some(input.content),
        customer: None,
        priority: input.priority.unwrap_or_default(),
        status: TicketStatus::Open,
        created: now_rfc3339(),
        assigned: None,
    });
    tracing::info!(ticket = %ticket.id, priority = ?ticket.priority, "ticket opened");

    Ok(created(TicketReceipt {
        id: ticket.id,
        subject: ticket.subject,
        status: ticket.status,
        priority: ticket.priority,
        created: ticket.created,
    }))
}
