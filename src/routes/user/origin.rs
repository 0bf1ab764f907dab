//! Back-to-origin configuration

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::sync::Arc;

use crate::error::{ApiError, ApiResult};
use crate::models::OriginConfig;
use crate::response::{created, Ack, Listing};
use crate::store::{next_id, now_rfc3339};
use crate::validation::{strip_reserved, LenientJson};
use crate::ApiState;

const RESERVED: [&str; 3] = ["id", "domain", "updated"];
const OPTIONAL: [&str; 4] = ["protocol", "port", "timeout", "followRedirect"];

pub fn router() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/", get(list_configs).post(create_config))
        .route("/:domain", put(update_config))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OriginInput {
    pub domain: String,
    pub origin_url: String,
    pub protocol: Option<String>,
    pub port: Option<u16>,
    pub timeout: Option<u32>,
    pub follow_redirect: Option<bool>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OriginPatch {
    pub origin_url: Option<String>,
    pub protocol: Option<String>,
    pub port: Option<u16>,
    pub timeout: Option<u32>,
    pub follow_redirect: Option<bool>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// List origin configs
#[utoipa::path(
    get,
    path = "/api/origin-config",
    responses((status = 200, description = "`{configs, total}`")),
    tag = "origin"
)]
pub async fn list_configs(State(state): State<Arc<ApiState>>) -> Listing<OriginConfig> {
    Listing::new("configs", state.registry.origin_configs.list())
}

/// Create an origin config
#[utoipa::path(
    post,
    path = "/api/origin-config",
    responses(
        (status = 201, description = "Created config"),
        (status = 400, description = "Missing domain or originUrl")
    ),
    tag = "origin"
)]
pub async fn create_config(
    State(state): State<Arc<ApiState>>,
    body: LenientJson,
) -> ApiResult<(StatusCode, Json<OriginConfig>)> {
    let nulls = body.explicit_nulls(&OPTIONAL);
    let mut input: OriginInput = body.parse(&["domain", "originUrl"])?;
    strip_reserved(&mut input.extra, &RESERVED);
    input.extra.extend(nulls);

    let config = state.registry.origin_configs.create(OriginConfig {
        id: next_id("oc"),
        domain: input.domain,
        origin_url: input.origin_url,
        protocol: input.protocol,
        port: input.port,
        timeout: input.timeout,
        follow_redirect: input.follow_redirect,
        updated: now_rfc3339(),
        extra: input.extra,
    });
    tracing::info!(domain = %config.domain, origin = %config.origin_url, "origin config created");
    Ok(created(config))
}

/// Merge into the config for `domain`
#[utoipa::path(
    put,
    path = "/api/origin-config/{domain}",
    params(("domain" = String, Path, description = "Accelerated domain")),
    responses(
        (status = 200, description = "`{success, domain, ...config}`"),
        (status = 404, description = "Unknown domain")
    ),
    tag = "origin"
)]
pub async fn update_config(
    State(state): State<Arc<ApiState>>,
    Path(domain): Path<String>,
    body: LenientJson,
) -> ApiResult<Ack<OriginConfig>> {
    let configs = &state.registry.origin_configs;
    let existing = configs
        .find_where(&|c| c.domain == domain)
        .ok_or(ApiError::NotFound)?;

    let mut patch: OriginPatch = body.parse(&[])?;
    strip_reserved(&mut patch.extra, &RESERVED);
    let updated = now_rfc3339();

    let config = configs
        .update(&existing.id, &mut |c| {
            if let Some(v) = patch.origin_url.take() {
                c.origin_url = v;
            }
            if let Some(v) = patch.protocol.take() {
                c.protocol = Some(v);
            }
            if patch.port.is_some() {
                c.port = patch.port;
            }
            if patch.timeout.is_some() {
                c.timeout = patch.timeout;
            }
            if patch.follow_redirect.is_some() {
                c.follow_redirect = patch.follow_redirect;
            }
            c.extra.append(&mut patch.extra);
            c.updated = updated.clone();
        })
        .ok_or(ApiError::NotFound)?;

    tracing::info!(%domain, "origin config updated");
    Ok(Ack::new(config))
}
