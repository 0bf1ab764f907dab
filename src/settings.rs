//! Mutable system settings
//!
//! One [`SettingsStore`] owns the platform, SMTP and security sections behind a
//! single lock. Every update validates the whole patch before touching state,
//! so a rejected patch leaves the section unchanged.

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::{ApiError, ApiResult};
use crate::validation::{check_min, check_range};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PlatformSettings {
    pub site_name: String,
    pub max_domains: u32,
    pub default_plan: String,
    pub maintenance_mode: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SmtpSettings {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub secure: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SecuritySettings {
    pub max_login_attempts: u32,
    /// Seconds
    pub session_timeout: u32,
    pub ip_whitelist: Vec<String>,
    pub two_factor_required: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SystemSettings {
    pub platform: PlatformSettings,
    pub smtp: SmtpSettings,
    pub security: SecuritySettings,
}

impl Default for SystemSettings {
    fn default() -> Self {
        Self {
            platform: PlatformSettings {
                site_name: "AgentFast CDN".into(),
                max_domains: 10,
                default_plan: "basic".into(),
                maintenance_mode: false,
            },
            smtp: SmtpSettings {
                host: "smtp.agentfast.com".into(),
                port: 465,
                user: "no-reply@agentfast.com".into(),
                secure: true,
            },
            security: SecuritySettings {
                max_login_attempts: 3,
                session_timeout: 1800,
                ip_whitelist: Vec::new(),
                two_factor_required: false,
            },
        }
    }
}

// ============ Patches ============

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformPatch {
    pub site_name: Option<String>,
    pub max_domains: Option<u32>,
    pub default_plan: Option<String>,
    pub maintenance_mode: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SmtpPatch {
    pub host: Option<String>,
    pub port: Option<i64>,
    pub user: Option<String>,
    pub secure: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecurityPatch {
    pub max_login_attempts: Option<i64>,
    pub session_timeout: Option<i64>,
    pub ip_whitelist: Option<Vec<String>>,
    pub two_factor_required: Option<bool>,
}

/// Single owner of [`SystemSettings`]
#[derive(Debug, Default)]
pub struct SettingsStore {
    inner: RwLock<SystemSettings>,
}

impl SettingsStore {
    pub fn new(settings: SystemSettings) -> Self {
        Self {
            inner: RwLock::new(settings),
        }
    }

    /// Copy of the current settings
    pub fn snapshot(&self) -> SystemSettings {
        self.inner.read().clone()
    }

    pub fn update_platform(&self, patch: PlatformPatch) -> ApiResult<PlatformSettings> {
        let mut settings = self.inner.write();
        let platform = &mut settings.platform;
        if let Some(site_name) = patch.site_name {
            platform.site_name = site_name;
        }
        if let Some(max_domains) = patch.max_domains {
            platform.max_domains = max_domains;
        }
        if let Some(default_plan) = patch.default_plan {
            platform.default_plan = default_plan;
        }
        if let Some(maintenance_mode) = patch.maintenance_mode {
            platform.maintenance_mode = maintenance_mode;
        }
        tracing::info!(site = %platform.site_name, "platform settings updated");
        Ok(platform.clone())
    }

    /// `host` is required; `port` must fit 1..=65535.
    pub fn update_smtp(&self, patch: SmtpPatch) -> ApiResult<SmtpSettings> {
        let host = patch.host.ok_or_else(|| ApiError::missing("host"))?;
        let port = match patch.port {
            Some(port) => {
                check_range("port", port, 1, 65535)?;
                Some(u16::try_from(port).map_err(|e| ApiError::Internal(e.to_string()))?)
            }
            None => None,
        };

        let mut settings = self.inner.write();
        let smtp = &mut settings.smtp;
        smtp.host = host;
        if let Some(port) = port {
            smtp.port = port;
        }
        if let Some(user) = patch.user {
            smtp.user = user;
        }
        if let Some(secure) = patch.secure {
            smtp.secure = secure;
        }
        tracing::info!(host = %smtp.host, port = smtp.port, "smtp settings updated");
        Ok(smtp.clone())
    }

    /// Validates every field before writing any.
    pub fn update_security(&self, patch: SecurityPatch) -> ApiResult<SecuritySettings> {
        let max_login_attempts = patch
            .max_login_attempts
            .map(|v| bounded_u32("maxLoginAttempts", v, 1))
            .transpose()?;
        let session_timeout = patch
            .session_timeout
            .map(|v| bounded_u32("sessionTimeout", v, 60))
            .transpose()?;

        let mut settings = self.inner.write();
        let security = &mut settings.security;
        if let Some(v) = max_login_attempts {
            security.max_login_attempts = v;
        }
        if let Some(v) = session_timeout {
            security.session_timeout = v;
        }
        if let Some(list) = patch.ip_whitelist {
            security.ip_whitelist = list;
        }
        if let Some(v) = patch.two_factor_required {
            security.two_factor_required = v;
        }
        tracing::info!("security settings updated");
        Ok(security.clone())
    }
}

fn bounded_u32(field: &str, value: i64, min: i64) -> ApiResult<u32> {
    check_min(field, value, min)?;
    u32::try_from(value).map_err(|_| ApiError::invalid(format!("{field} is too large")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let store = SettingsStore::default();
        let s = store.snapshot();
        assert_eq!(s.platform.site_name, "AgentFast CDN");
        assert_eq!(s.smtp.port, 465);
        assert_eq!(s.security.session_timeout, 1800);
    }

    #[test]
    fn test_platform_merge_keeps_untouched_fields() {
        let store = SettingsStore::default();
        let updated = store
            .update_platform(PlatformPatch {
                maintenance_mode: Some(true),
                ..Default::default()
            })
            .unwrap();
        assert!(updated.maintenance_mode);
        assert_eq!(updated.max_domains, 10);
        assert!(store.snapshot().platform.maintenance_mode);
    }

    #[test]
    fn test_smtp_requires_host() {
        let store = SettingsStore::default();
        let err = store.update_smtp(SmtpPatch::default()).unwrap_err();
        assert_eq!(err.to_string(), "host is required");
    }

    #[test]
    fn test_smtp_port_bounds_leave_state_untouched() {
        let store = SettingsStore::default();
        let err = store
            .update_smtp(SmtpPatch {
                host: Some("mail.example.com".into()),
                port: Some(70000),
                ..Default::default()
            })
            .unwrap_err();
        assert_eq!(err.to_string(), "port must be between 1 and 65535");
        assert_eq!(store.snapshot().smtp.host, "smtp.agentfast.com");

        let ok = store
            .update_smtp(SmtpPatch {
                host: Some("mail.example.com".into()),
                port: Some(587),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(ok.port, 587);
        assert!(ok.secure);
    }

    #[test]
    fn test_security_bounds() {
        let store = SettingsStore::default();
        assert!(store
            .update_security(SecurityPatch {
                max_login_attempts: Some(0),
                ..Default::default()
            })
            .is_err());
        assert!(store
            .update_security(SecurityPatch {
                session_timeout: Some(59),
                ..Default::default()
            })
            .is_err());
        let ok = store
            .update_security(SecurityPatch {
                session_timeout: Some(3600),
                ip_whitelist: Some(vec!["10.0.0.0/8".into()]),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(ok.session_timeout, 3600);
        assert_eq!(ok.max_login_attempts, 3);
    }
}
