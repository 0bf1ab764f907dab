//! GSLB scheduling rules and resolver health

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, patch, put},
    Json, Router,
};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use crate::error::{ApiError, ApiResult};
use crate::models::{DnsRule, NodeStatus, RuleStatus};
use crate::response::{created, Ack, Deleted, Listing, Transition};
use crate::store::next_id;
use crate::validation::{check_min, check_range, LenientJson};
use crate::ApiState;

pub fn router() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/dns-rules", get(list_rules).post(create_rule))
        .route("/dns-rules/:id", put(update_rule).delete(delete_rule))
        .route("/dns-rules/:id/toggle", patch(toggle_rule))
        .route("/dns/health", get(resolver_health))
}

/// New rule. Only `name` is required.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DnsRuleCreate {
    pub name: String,
    #[serde(rename = "match")]
    pub match_expr: Option<String>,
    pub node_group: Option<String>,
    pub weight: Option<i64>,
    pub ttl: Option<i64>,
}

/// Partial rule update
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DnsRuleUpdate {
    pub name: Option<String>,
    #[serde(rename = "match")]
    pub match_expr: Option<String>,
    pub node_group: Option<String>,
    pub weight: Option<i64>,
    pub ttl: Option<i64>,
    pub status: Option<RuleStatus>,
}

fn parse_weight(value: i64) -> ApiResult<u32> {
    check_range("weight", value, 0, 100)?;
    Ok(value as u32)
}

fn parse_ttl(value: i64) -> ApiResult<u32> {
    check_min("ttl", value, 1)?;
    u32::try_from(value).map_err(|_| ApiError::invalid("ttl is too large"))
}

/// List rules
#[utoipa::path(
    get,
    path = "/admin/api/dns-rules",
    responses((status = 200, description = "`{rules, total}`")),
    tag = "dns"
)]
pub async fn list_rules(State(state): State<Arc<ApiState>>) -> Listing<DnsRule> {
    Listing::new("rules", state.registry.dns_rules.list())
}

/// Create rule
#[utoipa::path(
    post,
    path = "/admin/api/dns-rules",
    request_body = DnsRuleCreate,
    responses(
        (status = 201, description = "Rule created", body = DnsRule),
        (status = 400, description = "Missing name or value out of bounds")
    ),
    tag = "dns"
)]
pub async fn create_rule(
    State(state): State<Arc<ApiState>>,
    body: LenientJson,
) -> ApiResult<(StatusCode, Json<DnsRule>)> {
    let input: DnsRuleCreate = body.parse(&["name"])?;

    let rule = DnsRule {
        id: next_id("d"),
        name: input.name,
        match_expr: input.match_expr.unwrap_or_default(),
        node_group: input.node_group.unwrap_or_default(),
        weight: input.weight.map(parse_weight).transpose()?.unwrap_or(100),
        ttl: input.ttl.map(parse_ttl).transpose()?.unwrap_or(60),
        status: RuleStatus::Active,
    };

    let rule = state.registry.dns_rules.create(rule);
    tracing::info!(rule = %rule.id, name = %rule.name, "dns rule created");
    Ok(created(rule))
}

/// Update rule
#[utoipa::path(
    put,
    path = "/admin/api/dns-rules/{id}",
    params(("id" = String, Path, description = "Rule id")),
    responses(
        (status = 200, description = "`{success, id, ...rule}`"),
        (status = 400, description = "Out-of-range weight or ttl"),
        (status = 404, description = "Unknown rule")
    ),
    tag = "dns"
)]
pub async fn update_rule(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<String>,
    body: LenientJson,
) -> ApiResult<Ack<DnsRule>> {
    let rules = &state.registry.dns_rules;
    if rules.get(&id).is_none() {
        return Err(ApiError::NotFound);
    }

    let input: DnsRuleUpdate = body.parse(&[])?;
    let weight = input.weight.map(parse_weight).transpose()?;
    let ttl = input.ttl.map(parse_ttl).transpose()?;

    let mut name = input.name;
    let mut match_expr = input.match_expr;
    let mut node_group = input.node_group;
    let rule = rules
        .update(&id, &mut |r| {
            if let Some(v) = name.take() {
                r.name = v;
            }
            if let Some(v) = match_expr.take() {
                r.match_expr = v;
            }
            if let Some(v) = node_group.take() {
                r.node_group = v;
            }
            if let Some(v) = weight {
                r.weight = v;
            }
            if let Some(v) = ttl {
                r.ttl = v;
            }
            if let Some(v) = input.status {
                r.status = v;
            }
        })
        .ok_or(ApiError::NotFound)?;

    tracing::info!(rule = %id, "dns rule updated");
    Ok(Ack::new(rule))
}

/// Flip active/inactive
#[utoipa::path(
    patch,
    path = "/admin/api/dns-rules/{id}/toggle",
    params(("id" = String, Path, description = "Rule id")),
    responses(
        (status = 200, description = "`{success, id, status}`"),
        (status = 404, description = "Unknown rule")
    ),
    tag = "dns"
)]
pub async fn toggle_rule(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<String>,
) -> ApiResult<Transition<RuleStatus>> {
    let rule = state
        .registry
        .dns_rules
        .update(&id, &mut |r| r.status = r.status.toggled())
        .ok_or(ApiError::NotFound)?;
    tracing::info!(rule = %id, status = ?rule.status, "dns rule toggled");
    Ok(Transition::new(id, rule.status))
}

/// Delete a rule
#[utoipa::path(
    delete,
    path = "/admin/api/dns-rules/{id}",
    params(("id" = String, Path, description = "Rule id")),
    responses((status = 200, description = "`{success, id}`")),
    tag = "dns"
)]
pub async fn delete_rule(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<String>,
) -> Ack<Deleted> {
    if state.registry.dns_rules.delete(&id) {
        tracing::info!(rule = %id, "dns rule deleted");
    }
    Ack::deleted(id)
}

// ============ Resolver health ============

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeProbe {
    pub name: String,
    pub status: NodeStatus,
    /// Milliseconds; null for offline nodes
    pub latency: Option<u32>,
    pub last_check: String,
}

#[derive(Debug, Serialize)]
pub struct ResolverHealth {
    pub nodes: Vec<NodeProbe>,
}

/// Probe every node
#[utoipa::path(
    get,
    path = "/admin/api/dns/health",
    responses((status = 200, description = "`{nodes}`")),
    tag = "dns"
)]
pub async fn resolver_health(State(state): State<Arc<ApiState>>) -> Json<ResolverHealth> {
    let mut rng = rand::thread_rng();
    let checked = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true);

    let nodes = state
        .registry
        .nodes
        .list()
        .into_iter()
        .map(|n| NodeProbe {
            latency: (n.status != NodeStatus::Offline).then(|| rng.gen_range(5..=35)),
            name: n.name,
            status: n.status,
            last_check: checked.clone(),
        })
        .collect();

    Json(ResolverHealth { nodes })
}
