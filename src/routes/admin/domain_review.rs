//! Domain onboarding review

use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;

use crate::error::{ApiError, ApiResult};
use crate::models::{PendingDomain, ReviewStatus};
use crate::response::{Listing, Transition};
use crate::validation::{require_text, LenientJson};
use crate::ApiState;

pub fn router() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/", get(list_reviews))
        .route("/stats", get(review_stats))
        .route("/:id/approve", post(approve_domain))
        .route("/:id/reject", post(reject_domain))
}

#[derive(Debug, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct ReviewStats {
    pub pending: usize,
    pub reviewing: usize,
    pub approved: usize,
    pub rejected: usize,
    pub total: usize,
}

/// List review queue
#[utoipa::path(
    get,
    path = "/admin/api/domains/review",
    responses((status = 200, description = "`{domains, total}`")),
    tag = "domains"
)]
pub async fn list_reviews(State(state): State<Arc<ApiState>>) -> Listing<PendingDomain> {
    Listing::new("domains", state.registry.pending_domains.list())
}

/// Count by review status
#[utoipa::path(
    get,
    path = "/admin/api/domains/review/stats",
    responses((status = 200, description = "Counts per status", body = ReviewStats)),
    tag = "domains"
)]
pub async fn review_stats(State(state): State<Arc<ApiState>>) -> Json<ReviewStats> {
    let domains = state.registry.pending_domains.list();
    let mut stats = ReviewStats {
        total: domains.len(),
        ..Default::default()
    };
    for d in &domains {
        match d.status {
            ReviewStatus::Pending => stats.pending += 1,
            ReviewStatus::Reviewing => stats.reviewing += 1,
            ReviewStatus::Approved => stats.approved += 1,
            ReviewStatus::Rejected => stats.rejected += 1,
        }
    }
    Json(stats)
}

/// Approve a pending domain
#[utoipa::path(
    post,
    path = "/admin/api/domains/review/{id}/approve",
    params(("id" = String, Path, description = "Review id")),
    responses(
        (status = 200, description = "`{success, id, status}`"),
        (status = 404, description = "Unknown review")
    ),
    tag = "domains"
)]
pub async fn approve_domain(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<String>,
) -> ApiResult<Transition<ReviewStatus>> {
    state
        .registry
        .pending_domains
        .update(&id, &mut |d| {
            d.status = ReviewStatus::Approved;
            d.reason = None;
        })
        .ok_or(ApiError::NotFound)?;
    tracing::info!(review = %id, "domain approved");
    Ok(Transition::new(id, ReviewStatus::Approved))
}

/// Reject with a mandatory reason. The id is checked before the body.
#[utoipa::path(
    post,
    path = "/admin/api/domains/review/{id}/reject",
    params(("id" = String, Path, description = "Review id")),
    responses(
        (status = 200, description = "`{success, id, status, reason}`"),
        (status = 400, description = "Missing reason"),
        (status = 404, description = "Unknown review")
    ),
    tag = "domains"
)]
pub async fn reject_domain(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<String>,
    body: LenientJson,
) -> ApiResult<Transition<ReviewStatus>> {
    let domains = &state.registry.pending_domains;
    if domains.get(&id).is_none() {
        return Err(ApiError::NotFound);
    }
    let reason = require_text(body.value(), "reason")?;

    domains
        .update(&id, &mut |d| {
            d.status = ReviewStatus::Rejected;
            d.reason = Some(reason.clone());
        })
        .ok_or(ApiError::NotFound)?;
    tracing::info!(review = %id, %reason, "domain rejected");
    Ok(Transition::new(id, ReviewStatus::Rejected).with_reason(reason))
}
