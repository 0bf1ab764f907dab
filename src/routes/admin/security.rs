//! Security posture and platform blacklist

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::error::ApiResult;
use crate::models::{BlacklistEntry, SecurityEvent, SecurityOverview};
use crate::response::{created, Ack, Listing};
use crate::store::{now_rfc3339, seed};
use crate::validation::LenientJson;
use crate::ApiState;

pub fn router() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/overview", get(overview))
        .route("/events", get(list_events))
        .route("/blacklist", post(add_to_blacklist))
}

#[derive(Debug, Deserialize)]
pub struct BlacklistRequest {
    pub ip: String,
    pub reason: Option<String>,
}

/// Baseline counters plus entries added since start
#[utoipa::path(
    get,
    path = "/admin/api/security/overview",
    responses((status = 200, description = "Security overview")),
    tag = "security"
)]
pub async fn overview(State(state): State<Arc<ApiState>>) -> Json<SecurityOverview> {
    let mut overview = seed::security_overview();
    overview.blacklist_count += state.registry.blacklist.list().len() as u64;
    Json(overview)
}

/// Recent attack events
#[utoipa::path(
    get,
    path = "/admin/api/security/events",
    responses((status = 200, description = "`{events, total}`")),
    tag = "security"
)]
pub async fn list_events() -> Listing<SecurityEvent> {
    Listing::new("events", seed::security_events())
}

/// Block an IP platform-wide
#[utoipa::path(
    post,
    path = "/admin/api/security/blacklist",
    responses(
        (status = 201, description = "`{success, ip, reason, addedAt}`"),
        (status = 400, description = "Missing ip")
    ),
    tag = "security"
)]
pub async fn add_to_blacklist(
    State(state): State<Arc<ApiState>>,
    body: LenientJson,
) -> ApiResult<(StatusCode, Json<Ack<BlacklistEntry>>)> {
    let request: BlacklistRequest = body.parse(&["ip"])?;

    let entry = state.registry.blacklist.upsert(BlacklistEntry {
        ip: request.ip,
        reason: request.reason,
        added_at: now_rfc3339(),
    });
    tracing::info!(ip = %entry.ip, "ip blacklisted");
    Ok(created(Ack::new(entry)))
}
