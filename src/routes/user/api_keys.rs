//! API key management

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::error::ApiResult;
use crate::models::ApiKey;
use crate::response::created;
use crate::store::{next_id, now_rfc3339};
use crate::validation::LenientJson;
use crate::ApiState;

const KEY_PREFIX: &str = "af_";
const VISIBLE_CHARS: usize = 7;

pub fn router() -> Router<Arc<ApiState>> {
    Router::new().route("/", get(list_keys).post(create_key))
}

#[derive(Debug, Deserialize)]
pub struct ApiKeyCreate {
    pub name: String,
    pub permissions: Option<Vec<String>>,
}

#[derive(Debug, Serialize)]
pub struct KeyList {
    pub keys: Vec<ApiKey>,
}

/// Fresh secret: `af_` followed by 32 lowercase hex digits
pub fn generate_key() -> String {
    format!("{}{}", KEY_PREFIX, Uuid::new_v4().simple())
}

/// Keep the first few characters and hide the rest
pub fn mask_key(key: &str) -> String {
    let visible: String = key.chars().take(VISIBLE_CHARS).collect();
    format!("{visible}****")
}

/// Stored keys, masked
#[utoipa::path(
    get,
    path = "/api/apikeys",
    responses((status = 200, description = "`{keys}` with masked secrets")),
    tag = "apikeys"
)]
pub async fn list_keys(State(state): State<Arc<ApiState>>) -> Json<KeyList> {
    let keys = state
        .registry
        .api_keys
        .list()
        .into_iter()
        .map(|mut k| {
            k.key = mask_key(&k.key);
            k
        })
        .collect();
    Json(KeyList { keys })
}

/// The full key is returned once, here.
#[utoipa::path(
    post,
    path = "/api/apikeys",
    responses(
        (status = 201, description = "New key with the full secret"),
        (status = 400, description = "Missing name")
    ),
    tag = "apikeys"
)]
pub async fn create_key(
    State(state): State<Arc<ApiState>>,
    body: LenientJson,
) -> ApiResult<(StatusCode, Json<ApiKey>)> {
    let input: ApiKeyCreate = body.parse(&["name"])?;

    let key = state.registry.api_keys.create(ApiKey {
        id: next_id("key"),
        name: input.name,
        key: generate_key(),
        permissions: input
            .permissions
            .unwrap_or_else(|| vec!["read".into(), "write".into()]),
        created: now_rfc3339(),
        last_used: None,
    });
    tracing::info!(key = %key.id, "api key issued");
    Ok(created(key))
}
