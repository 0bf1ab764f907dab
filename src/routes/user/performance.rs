//! Edge optimisation switches

use axum::{extract::State, routing::get, Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::error::ApiResult;
use crate::models::{CacheMode, PerformanceConfig};
use crate::response::{Ack, Listing};
use crate::store::now_rfc3339;
use crate::validation::LenientJson;
use crate::ApiState;

pub fn router() -> Router<Arc<ApiState>> {
    Router::new().route("/config", get(list_configs).post(save_config))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceInput {
    pub domain: String,
    pub gzip: Option<bool>,
    pub brotli: Option<bool>,
    pub http2: Option<bool>,
    pub http3: Option<bool>,
    pub webp: Option<bool>,
    pub lazy_load: Option<bool>,
    pub minify_js: Option<bool>,
    pub minify_css: Option<bool>,
    pub cache_mode: Option<CacheMode>,
}

impl PerformanceInput {
    /// Overlay the provided switches on `base`
    fn apply(&self, base: &mut PerformanceConfig) {
        let flags = [
            (self.gzip, &mut base.gzip),
            (self.brotli, &mut base.brotli),
            (self.http2, &mut base.http2),
            (self.http3, &mut base.http3),
            (self.webp, &mut base.webp),
            (self.lazy_load, &mut base.lazy_load),
            (self.minify_js, &mut base.minify_js),
            (self.minify_css, &mut base.minify_css),
        ];
        for (value, slot) in flags {
            if let Some(value) = value {
                *slot = value;
            }
        }
        if let Some(mode) = self.cache_mode {
            base.cache_mode = mode;
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SavedConfig {
    pub domain: String,
    pub updated: String,
    pub config: PerformanceConfig,
}

/// List performance configs
#[utoipa::path(
    get,
    path = "/api/performance/config",
    responses((status = 200, description = "`{configs, total}`")),
    tag = "performance"
)]
pub async fn list_configs(State(state): State<Arc<ApiState>>) -> Listing<PerformanceConfig> {
    Listing::new("configs", state.registry.performance_configs.list())
}

/// Create or replace the config for a domain
#[utoipa::path(
    post,
    path = "/api/performance/config",
    responses(
        (status = 200, description = "`{success, domain, updated, config}`"),
        (status = 400, description = "Missing domain")
    ),
    tag = "performance"
)]
pub async fn save_config(
    State(state): State<Arc<ApiState>>,
    body: LenientJson,
) -> ApiResult<Json<Ack<SavedConfig>>> {
    let input: PerformanceInput = body.parse(&["domain"])?;

    let config = state.registry.performance_configs.upsert_with(
        &input.domain,
        &mut || PerformanceConfig::for_domain(input.domain.clone()),
        &mut |config| input.apply(config),
    );
    tracing::info!(domain = %config.domain, cache_mode = ?config.cache_mode, "performance config saved");

    Ok(Json(Ack::new(SavedConfig {
        domain: config.domain.clone(),
        updated: now_rfc3339(),
        config,
    })))
}
