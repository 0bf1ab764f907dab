//! Alert rules and alert history

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};
use std::sync::Arc;

use crate::error::{ApiError, ApiResult};
use crate::models::{AlertEvent, AlertOperator, AlertRule};
use crate::response::{created, Ack, Deleted, Listing};
use crate::store::next_id;
use crate::validation::{strip_reserved, LenientJson};
use crate::ApiState;

pub fn router() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/rules", get(list_rules).post(create_rule))
        .route("/rules/:id", delete(delete_rule))
        .route("/rules/:id/toggle", put(toggle_rule))
        .route("/history", get(history))
}

#[derive(Debug, Deserialize)]
pub struct AlertRuleInput {
    pub name: String,
    pub threshold: Number,
    pub metric: Option<String>,
    pub unit: Option<String>,
    pub operator: Option<AlertOperator>,
    pub domain: Option<String>,
    pub channels: Option<Vec<String>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Serialize)]
pub struct AlertToggle {
    pub id: String,
    pub enabled: bool,
}

#[derive(Debug, Default, Deserialize)]
pub struct HistoryFilter {
    pub domain: Option<String>,
}

/// List alert rules
#[utoipa::path(
    get,
    path = "/api/alerts/rules",
    responses((status = 200, description = "`{rules, total}`")),
    tag = "alerts"
)]
pub async fn list_rules(State(state): State<Arc<ApiState>>) -> Listing<AlertRule> {
    Listing::new("rules", state.registry.alert_rules.list())
}

/// New rules start enabled with no triggers. `threshold` may be zero.
#[utoipa::path(
    post,
    path = "/api/alerts/rules",
    responses(
        (status = 201, description = "Created rule"),
        (status = 400, description = "Missing name or threshold")
    ),
    tag = "alerts"
)]
pub async fn create_rule(
    State(state): State<Arc<ApiState>>,
    body: LenientJson,
) -> ApiResult<(StatusCode, Json<AlertRule>)> {
    let nulls = body.explicit_nulls(&["metric", "unit", "operator", "domain"]);
    let mut input: AlertRuleInput = body.parse(&["name", "threshold"])?;
    strip_reserved(&mut input.extra, &["id", "enabled", "triggered"]);
    input.extra.extend(nulls);

    let rule = state.registry.alert_rules.create(AlertRule {
        id: next_id("rule"),
        name: input.name,
        metric: input.metric,
        threshold: input.threshold,
        unit: input.unit,
        operator: input.operator,
        domain: input.domain,
        channels: input.channels.unwrap_or_default(),
        enabled: true,
        triggered: 0,
        extra: input.extra,
    });
    tracing::info!(rule = %rule.id, name = %rule.name, "alert rule created");
    Ok(created(rule))
}

/// Flip a rule on or off
#[utoipa::path(
    put,
    path = "/api/alerts/rules/{id}/toggle",
    params(("id" = String, Path, description = "Rule id")),
    responses(
        (status = 200, description = "`{id, enabled}`"),
        (status = 404, description = "Unknown rule")
    ),
    tag = "alerts"
)]
pub async fn toggle_rule(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<AlertToggle>> {
    let rule = state
        .registry
        .alert_rules
        .update(&id, &mut |r| r.enabled = !r.enabled)
        .ok_or(ApiError::NotFound)?;
    tracing::info!(rule = %id, enabled = rule.enabled, "alert rule toggled");
    Ok(Json(AlertToggle {
        id,
        enabled: rule.enabled,
    }))
}

/// Delete an alert rule
#[utoipa::path(
    delete,
    path = "/api/alerts/rules/{id}",
    params(("id" = String, Path, description = "Rule id")),
    responses((status = 200, description = "`{success, id}`")),
    tag = "alerts"
)]
pub async fn delete_rule(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<String>,
) -> Ack<Deleted> {
    state.registry.alert_rules.delete(&id);
    Ack::deleted(id)
}

/// Fired alerts; `domain` is a substring match.
#[utoipa::path(
    get,
    path = "/api/alerts/history",
    params(
        ("domain" = Option<String>, Query, description = "Substring of the alert domain")
    ),
    responses((status = 200, description = "Fired alerts")),
    tag = "alerts"
)]
pub async fn history(
    State(state): State<Arc<ApiState>>,
    Query(filter): Query<HistoryFilter>,
) -> Json<Vec<AlertEvent>> {
    let mut events = state.registry.alert_history.list();
    if let Some(domain) = filter.domain.as_deref().filter(|d| !d.is_empty()) {
        events.retain(|e| e.domain.contains(domain));
    }
    Json(events)
}
