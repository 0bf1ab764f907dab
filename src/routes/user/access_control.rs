//! IP and referer access rules

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get},
    Json, Router,
};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::sync::Arc;

use crate::error::ApiResult;
use crate::models::{IpRule, ListKind, RefererRule};
use crate::response::{created, Ack, Deleted, Listing};
use crate::store::{next_id, now_rfc3339};
use crate::validation::{strip_reserved, LenientJson};
use crate::ApiState;

pub fn router() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/ip-rules", get(list_ip_rules).post(create_ip_rule))
        .route("/ip-rules/:id", delete(delete_ip_rule))
        .route("/referer-rules", get(list_referer_rules).post(create_referer_rule))
}

#[derive(Debug, Deserialize)]
pub struct IpRuleInput {
    pub ip: String,
    #[serde(rename = "type")]
    pub kind: ListKind,
    pub domain: Option<String>,
    pub remark: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
pub struct RefererRuleInput {
    #[serde(rename = "type")]
    pub kind: Option<ListKind>,
    pub values: Vec<String>,
    pub domain: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// List IP rules
#[utoipa::path(
    get,
    path = "/api/access-control/ip-rules",
    responses((status = 200, description = "`{rules, total}`")),
    tag = "access-control"
)]
pub async fn list_ip_rules(State(state): State<Arc<ApiState>>) -> Listing<IpRule> {
    Listing::new("rules", state.registry.ip_rules.list())
}

/// Body fields are echoed back; `id` and `created` are assigned here.
#[utoipa::path(
    post,
    path = "/api/access-control/ip-rules",
    responses(
        (status = 201, description = "Created rule"),
        (status = 400, description = "Missing ip or type")
    ),
    tag = "access-control"
)]
pub async fn create_ip_rule(
    State(state): State<Arc<ApiState>>,
    body: LenientJson,
) -> ApiResult<(StatusCode, Json<IpRule>)> {
    let nulls = body.explicit_nulls(&["domain", "remark"]);
    let mut input: IpRuleInput = body.parse(&["ip", "type"])?;
    strip_reserved(&mut input.extra, &["id", "created"]);
    input.extra.extend(nulls);

    let rule = state.registry.ip_rules.create(IpRule {
        id: next_id("rule"),
        ip: input.ip,
        kind: input.kind,
        domain: input.domain,
        remark: input.remark,
        created: now_rfc3339(),
        extra: input.extra,
    });
    tracing::info!(rule = %rule.id, ip = %rule.ip, kind = ?rule.kind, "ip rule created");
    Ok(created(rule))
}

/// Delete an IP rule
#[utoipa::path(
    delete,
    path = "/api/access-control/ip-rules/{id}",
    params(("id" = String, Path, description = "Rule id")),
    responses((status = 200, description = "`{success, id}`")),
    tag = "access-control"
)]
pub async fn delete_ip_rule(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<String>,
) -> Ack<Deleted> {
    state.registry.ip_rules.delete(&id);
    Ack::deleted(id)
}

/// List referer rules
#[utoipa::path(
    get,
    path = "/api/access-control/referer-rules",
    responses((status = 200, description = "`{rules, total}`")),
    tag = "access-control"
)]
pub async fn list_referer_rules(State(state): State<Arc<ApiState>>) -> Listing<RefererRule> {
    Listing::new("rules", state.registry.referer_rules.list())
}

/// Create a referer rule
#[utoipa::path(
    post,
    path = "/api/access-control/referer-rules",
    responses(
        (status = 201, description = "Created rule"),
        (status = 400, description = "Missing values")
    ),
    tag = "access-control"
)]
pub async fn create_referer_rule(
    State(state): State<Arc<ApiState>>,
    body: LenientJson,
) -> ApiResult<(StatusCode, Json<RefererRule>)> {
    let nulls = body.explicit_nulls(&["type", "domain"]);
    let mut input: RefererRuleInput = body.parse(&["values"])?;
    strip_reserved(&mut input.extra, &["id"]);
    input.extra.extend(nulls);

    let rule = state.registry.referer_rules.create(RefererRule {
        id: next_id("ref"),
        kind: input.kind,
        values: input.values,
        domain: input.domain,
        extra: input.extra,
    });
    tracing::info!(rule = %rule.id, "referer rule created");
    Ok(created(rule))
}
