//! Audit trail query and export

use axum::{
    extract::{Query, State},
    routing::get,
    Router,
};
use chrono::SecondsFormat;
use serde::Deserialize;
use std::sync::Arc;

use crate::models::AuditLogEntry;
use crate::response::{CsvDownload, Listing, Pagination};
use crate::ApiState;

const DEFAULT_LIMIT: usize = 20;
const CSV_HEADER: [&str; 7] = ["id", "operator", "action", "resource", "ip", "createdAt", "detail"];

pub fn router() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/", get(list_audit_logs))
        .route("/export", get(export_audit_logs))
}

/// Query parameters. Page and limit stay raw so bad values fall back to defaults.
#[derive(Debug, Default, Deserialize)]
pub struct AuditQuery {
    pub action: Option<String>,
    pub operator: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
}

/// Filtered, paged audit entries
#[utoipa::path(
    get,
    path = "/admin/api/audit-logs",
    params(
        ("action" = Option<String>, Query, description = "Exact action match"),
        ("operator" = Option<String>, Query, description = "Exact operator match"),
        ("page" = Option<usize>, Query, description = "1-based page"),
        ("limit" = Option<usize>, Query, description = "Page size, default 20")
    ),
    responses((status = 200, description = "`{logs, total, page, limit}`")),
    tag = "audit"
)]
pub async fn list_audit_logs(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<AuditQuery>,
) -> Listing<AuditLogEntry> {
    let mut logs = state.registry.audit_logs.list();
    if let Some(action) = non_empty(&query.action) {
        logs.retain(|l| l.action == action);
    }
    if let Some(operator) = non_empty(&query.operator) {
        logs.retain(|l| l.operator == operator);
    }

    let page = Pagination::from_query(query.page.as_deref(), query.limit.as_deref(), DEFAULT_LIMIT);
    Listing::paged("logs", logs, page)
}

/// Every entry as `audit-logs.csv`
#[utoipa::path(
    get,
    path = "/admin/api/audit-logs/export",
    responses((status = 200, description = "CSV attachment `audit-logs.csv`")),
    tag = "audit"
)]
pub async fn export_audit_logs(State(state): State<Arc<ApiState>>) -> CsvDownload {
    let rows = state.registry.audit_logs.list().into_iter().map(|l| {
        [
            l.id,
            l.operator,
            l.action,
            l.resource,
            l.ip,
            l.created_at.to_rfc3339_opts(SecondsFormat::AutoSi, true),
            l.detail,
        ]
    });
    CsvDownload::new("audit-logs.csv", &CSV_HEADER, rows)
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}
