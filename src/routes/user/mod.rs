//! Customer control panel, mounted under `/api`

pub mod access_control;
pub mod alerts;
pub mod api_keys;
pub mod logs;
pub mod origin;
pub mod performance;
pub mod tickets;

use axum::Router;
use std::sync::Arc;

use crate::ApiState;

pub fn router() -> Router<Arc<ApiState>> {
    Router::new()
        .nest("/access-control", access_control::router())
        .nest("/alerts", alerts::router())
        .nest("/apikeys", api_keys::router())
        .nest("/logs", logs::router())
        .nest("/origin-config", origin::router())
        .nest("/tickets", tickets::router())
        .nest("/performance", performance::router())
}
