//! OpenAPI description

use axum::Json;
use utoipa::OpenApi;

use crate::models::*;
use crate::routes;
use crate::settings::{PlatformSettings, SecuritySettings, SmtpSettings, SystemSettings};

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "AgentFast CDN API",
        description = "Customer control panel and operations back-office"
    ),
    paths(
        routes::health::health_check,
        routes::admin::dashboard::stats,
        routes::admin::customers::list_customers,
        routes::admin::customers::get_customer,
        routes::admin::customers::suspend_customer,
        routes::admin::customers::activate_customer,
        routes::admin::nodes::list_nodes,
        routes::admin::nodes::bring_online,
        routes::admin::nodes::take_offline,
        routes::admin::dns::list_rules,
        routes::admin::dns::create_rule,
        routes::admin::dns::update_rule,
        routes::admin::dns::toggle_rule,
        routes::admin::dns::delete_rule,
        routes::admin::dns::resolver_health,
        routes::admin::domain_review::list_reviews,
        routes::admin::domain_review::review_stats,
        routes::admin::domain_review::approve_domain,
        routes::admin::domain_review::reject_domain,
        routes::admin::finance::overview,
        routes::admin::finance::list_invoices,
        routes::admin::finance::trend,
        routes::admin::security::overview,
        routes::admin::security::list_events,
        routes::admin::security::add_to_blacklist,
        routes::admin::packages::list_packages,
        routes::admin::packages::create_package,
        routes::admin::packages::update_package,
        routes::admin::packages::delete_package,
        routes::admin::tickets::list_tickets,
        routes::admin::audit_logs::list_audit_logs,
        routes::admin::audit_logs::export_audit_logs,
        routes::admin::settings::get_settings,
        routes::admin::settings::update_platform,
        routes::admin::settings::update_smtp,
        routes::admin::settings::update_security,
        routes::admin::settings::send_test_mail,
        routes::user::access_control::list_ip_rules,
        routes::user::access_control::create_ip_rule,
        routes::user::access_control::delete_ip_rule,
        routes::user::access_control::list_referer_rules,
        routes::user::access_control::create_referer_rule,
        routes::user::alerts::list_rules,
        routes::user::alerts::create_rule,
        routes::user::alerts::toggle_rule,
        routes::user::alerts::delete_rule,
        routes::user::alerts::history,
        routes::user::api_keys::list_keys,
        routes::user::api_keys::create_key,
        routes::user::logs::list_logs,
        routes::user::logs::download_link,
        routes::user::origin::list_configs,
        routes::user::origin::create_config,
        routes::user::origin::update_config,
        routes::user::performance::list_configs,
        routes::user::performance::save_config,
        routes::user::tickets::submit_ticket,
    ),
    components(
        schemas(
            routes::health::HealthResponse,
            routes::health::ResourceCounts,
            routes::admin::dashboard::DashboardStats,
            routes::admin::domain_review::ReviewStats,
            routes::admin::dns::DnsRuleCreate,
            routes::admin::packages::PackageCreate,
            Customer, CustomerPlan, CustomerStatus,
            Node, NodeStatus,
            DnsRule, RuleStatus,
            PendingDomain, ReviewStatus,
            Ticket, TicketPriority, TicketStatus,
            AuditLogEntry,
            Package,
            SystemSettings, PlatformSettings, SmtpSettings, SecuritySettings
        )
    ),
    tags(
        (name = "health", description = "Service health"),
        (name = "dashboard", description = "Back-office totals"),
        (name = "customers", description = "Customer accounts"),
        (name = "nodes", description = "Edge nodes"),
        (name = "dns", description = "GSLB scheduling rules"),
        (name = "domains", description = "Domain onboarding review"),
        (name = "packages", description = "Plan packages"),
        (name = "finance", description = "Revenue and invoices"),
        (name = "security", description = "Attack monitoring and IP blocking"),
        (name = "tickets", description = "Support tickets"),
        (name = "audit", description = "Audit trail"),
        (name = "settings", description = "System settings"),
        (name = "access-control", description = "IP and referer rules"),
        (name = "alerts", description = "Alert rules and history"),
        (name = "apikeys", description = "API keys"),
        (name = "logs", description = "Access logs"),
        (name = "origin", description = "Back-to-origin configuration"),
        (name = "performance", description = "Edge optimisation switches")
    )
)]
pub struct ApiDoc;

/// `GET /api-docs/openapi.json`
pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_core_paths() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/admin/api/customers"));
        assert!(doc.paths.paths.contains_key("/admin/api/dns-rules"));
        assert!(doc.paths.paths.contains_key("/health"));
    }

    #[test]
    fn test_document_covers_write_endpoints() {
        let doc = ApiDoc::openapi();
        for path in [
            "/admin/api/customers/{id}/suspend",
            "/admin/api/domains/review/{id}/reject",
            "/admin/api/audit-logs/export",
            "/api/apikeys",
            "/api/alerts/rules/{id}/toggle",
            "/api/origin-config/{domain}",
        ] {
            assert!(doc.paths.paths.contains_key(path), "{path} missing");
        }
    }
}
