//! Edge access logs

use axum::{extract::Query, routing::get, Json, Router};
use chrono::{Duration, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::error::{ApiError, ApiResult};
use crate::models::AccessLog;
use crate::response::Pagination;
use crate::store::seed;
use crate::ApiState;

const SAMPLE_SIZE: usize = 100;
const DEFAULT_LIMIT: usize = 50;
const DEFAULT_LOG_DATE: &str = "2026-02-26";
const ARCHIVE_HOST: &str = "https://logs.agentfast.io/cdn";

pub fn router() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/", get(list_logs))
        .route("/download", get(download_link))
}

#[derive(Debug, Default, Deserialize)]
pub struct LogQuery {
    pub domain: Option<String>,
    pub status: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct DownloadQuery {
    pub domain: Option<String>,
    pub date: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct DownloadLink {
    pub download_url: String,
    pub size: String,
    pub expires_at: String,
}

/// Filter the log sample. `domain` matches the host exactly or any part of
/// the URL; a non-numeric `status` matches nothing.
pub fn filter_logs(mut logs: Vec<AccessLog>, domain: Option<&str>, status: Option<&str>) -> Vec<AccessLog> {
    if let Some(domain) = domain.filter(|d| !d.is_empty()) {
        logs.retain(|l| l.domain == domain || l.url.contains(domain));
    }
    if let Some(status) = status.filter(|s| !s.is_empty()) {
        match status.trim().parse::<u16>() {
            Ok(code) => logs.retain(|l| l.status == code),
            Err(_) => logs.clear(),
        }
    }
    logs
}

/// Bare array of log lines
#[utoipa::path(
    get,
    path = "/api/logs",
    params(
        ("domain" = Option<String>, Query, description = "Host or URL substring"),
        ("status" = Option<u16>, Query, description = "HTTP status"),
        ("page" = Option<usize>, Query, description = "1-based page"),
        ("limit" = Option<usize>, Query, description = "Page size, default 50")
    ),
    responses((status = 200, description = "Page of access log lines")),
    tag = "logs"
)]
pub async fn list_logs(Query(query): Query<LogQuery>) -> Json<Vec<AccessLog>> {
    let logs = filter_logs(
        seed::access_logs(SAMPLE_SIZE),
        query.domain.as_deref(),
        query.status.as_deref(),
    );
    let page = Pagination::from_query(query.page.as_deref(), query.limit.as_deref(), DEFAULT_LIMIT);
    Json(page.slice(logs))
}

/// Signed link to a day's archive, valid for an hour
#[utoipa::path(
    get,
    path = "/api/logs/download",
    params(
        ("domain" = String, Query, description = "Accelerated domain"),
        ("date" = Option<String>, Query, description = "Log date (YYYY-MM-DD)")
    ),
    responses(
        (status = 200, description = "`{download_url, size, expires_at}`"),
        (status = 400, description = "Missing domain")
    ),
    tag = "logs"
)]
pub async fn download_link(Query(query): Query<DownloadQuery>) -> ApiResult<Json<DownloadLink>> {
    let domain = query
        .domain
        .filter(|d| !d.is_empty())
        .ok_or_else(|| ApiError::missing("domain"))?;
    let date = query
        .date
        .filter(|d| !d.is_empty())
        .unwrap_or_else(|| DEFAULT_LOG_DATE.into());

    Ok(Json(DownloadLink {
        download_url: format!("{ARCHIVE_HOST}/{domain}/{date}.log.gz"),
        size: "128.4 MB".into(),
        expires_at: (Utc::now() + Duration::hours(1)).to_rfc3339_opts(SecondsFormat::Millis, true),
    }))
}
