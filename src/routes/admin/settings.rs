//! System settings endpoints

use axum::{
    extract::State,
    routing::{get, post, put},
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;

use crate::error::ApiResult;
use crate::settings::{
    PlatformPatch, PlatformSettings, SecurityPatch, SecuritySettings, SmtpPatch, SmtpSettings,
    SystemSettings,
};
use crate::response::Ack;
use crate::validation::LenientJson;
use crate::ApiState;

const DEFAULT_TEST_RECIPIENT: &str = "admin@example.com";

pub fn router() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/", get(get_settings))
        .route("/platform", put(update_platform))
        .route("/smtp", put(update_smtp))
        .route("/smtp/test", post(send_test_mail))
        .route("/security", put(update_security))
}

#[derive(Debug, Serialize)]
pub struct SettingsBody<T> {
    pub settings: T,
}

#[derive(Debug, Serialize)]
pub struct MailTest {
    pub message: String,
    pub timestamp: String,
}

/// Current settings
#[utoipa::path(
    get,
    path = "/admin/api/settings",
    responses((status = 200, description = "`{settings: {platform, smtp, security}}`")),
    tag = "settings"
)]
pub async fn get_settings(State(state): State<Arc<ApiState>>) -> Json<SettingsBody<SystemSettings>> {
    Json(SettingsBody {
        settings: state.settings.snapshot(),
    })
}

/// Update platform settings
#[utoipa::path(
    put,
    path = "/admin/api/settings/platform",
    responses(
        (status = 200, description = "`{success, settings}`"),
        (status = 400, description = "Invalid value")
    ),
    tag = "settings"
)]
pub async fn update_platform(
    State(state): State<Arc<ApiState>>,
    body: LenientJson,
) -> ApiResult<Ack<SettingsBody<PlatformSettings>>> {
    let patch: PlatformPatch = body.parse(&[])?;
    let settings = state.settings.update_platform(patch)?;
    Ok(Ack::new(SettingsBody { settings }))
}

/// Update SMTP settings
#[utoipa::path(
    put,
    path = "/admin/api/settings/smtp",
    responses(
        (status = 200, description = "`{success, settings}`"),
        (status = 400, description = "Invalid value")
    ),
    tag = "settings"
)]
pub async fn update_smtp(
    State(state): State<Arc<ApiState>>,
    body: LenientJson,
) -> ApiResult<Ack<SettingsBody<SmtpSettings>>> {
    let patch: SmtpPatch = body.parse(&["host"])?;
    let settings = state.settings.update_smtp(patch)?;
    Ok(Ack::new(SettingsBody { settings }))
}

/// Update login security settings
#[utoipa::path(
    put,
    path = "/admin/api/settings/security",
    responses(
        (status = 200, description = "`{success, settings}`"),
        (status = 400, description = "Invalid value")
    ),
    tag = "settings"
)]
pub async fn update_security(
    State(state): State<Arc<ApiState>>,
    body: LenientJson,
) -> ApiResult<Ack<SettingsBody<SecuritySettings>>> {
    let patch: SecurityPatch = body.parse(&[])?;
    let settings = state.settings.update_security(patch)?;
    Ok(Ack::new(SettingsBody { settings }))
}

/// Simulated delivery; nothing leaves the process.
#[utoipa::path(
    post,
    path = "/admin/api/settings/smtp/test",
    responses((status = 200, description = "`{success, message, timestamp}`")),
    tag = "settings"
)]
pub async fn send_test_mail(body: LenientJson) -> Ack<MailTest> {
    let to = body
        .value()
        .get("to")
        .and_then(|v| v.as_str())
        .filter(|v| !v.is_empty())
        .unwrap_or(DEFAULT_TEST_RECIPIENT);
    tracing::info!(%to, "smtp test requested");

    Ack::new(MailTest {
        message: format!("测试邮件已发送至 {to}"),
        timestamp: crate::store::now_rfc3339(),
    })
}
