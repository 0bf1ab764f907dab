//! Operations back-office, mounted under `/admin/api`

pub mod audit_logs;
pub mod customers;
pub mod dashboard;
pub mod dns;
pub mod domain_review;
pub mod finance;
pub mod nodes;
pub mod packages;
pub mod security;
pub mod settings;
pub mod tickets;

use axum::Router;
use std::sync::Arc;

use crate::ApiState;

pub fn router() -> Router<Arc<ApiState>> {
    Router::new()
        .merge(dashboard::router())
        .nest("/customers", customers::router())
        .nest("/nodes", nodes::router())
        .merge(dns::router())
        .nest("/domains/review", domain_review::router())
        .nest("/finance", finance::router())
        .nest("/security", security::router())
        .nest("/packages", packages::router())
        .nest("/tickets", tickets::router())
        .nest("/audit-logs", audit_logs::router())
        .nest("/settings", settings::router())
}
