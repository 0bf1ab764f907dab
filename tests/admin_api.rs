//! Back-office contract tests

mod common;

use agentfast_api::models::{AuditLogEntry, NodeStatus};
use agentfast_api::store::{seed, InMemoryRepository, Registry};
use axum::http::StatusCode;
use chrono::{TimeZone, Utc};
use common::{is_generated_id, parse_csv, server, server_with};
use serde_json::{json, Value};

// ============ Service ============

#[tokio::test]
async fn test_health() {
    let body: Value = server().get("/health").await.json();
    assert_eq!(body["status"], "healthy");
    assert!(body["version"].is_string());
    assert_eq!(
        body["resources"],
        json!({ "customers": 6, "nodes": 8, "onlineNodes": 6, "pendingDomains": 5 })
    );
}

#[tokio::test]
async fn test_health_degraded_without_online_nodes() {
    let registry = Registry::seeded();
    for node in registry.nodes.list() {
        registry.nodes.update(&node.id, &mut |n| n.status = NodeStatus::Offline);
    }
    let body: Value = server_with(registry).get("/health").await.json();
    assert_eq!(body["status"], "degraded");
    assert_eq!(body["resources"]["onlineNodes"], 0);
}

#[tokio::test]
async fn test_unknown_path_is_json_404() {
    let res = server().get("/admin/api/nope").await;
    assert_eq!(res.status_code(), StatusCode::NOT_FOUND);
    assert_eq!(res.json::<Value>(), json!({ "error": "not found" }));
}

#[tokio::test]
async fn test_openapi_document() {
    let body: Value = server().get("/api-docs/openapi.json").await.json();
    assert!(body["paths"]["/admin/api/customers"].is_object());
}

// ============ Dashboard ============

#[tokio::test]
async fn test_stats_are_computed_from_registry() {
    let body: Value = server().get("/admin/api/stats").await.json();
    assert_eq!(body["totalCustomers"], 6);
    assert_eq!(body["totalNodes"], 8);
    assert_eq!(body["onlineNodes"], 6);
    assert_eq!(body["totalBandwidth"], 1870);
    assert_eq!(body["totalRevenue"], 284_600);
    assert_eq!(body["pendingTickets"], 3);
    assert_eq!(body["pendingDomains"], 4);
}

// ============ Customers ============

#[tokio::test]
async fn test_list_customers() {
    let body: Value = server().get("/admin/api/customers").await.json();
    assert_eq!(body["total"], 6);
    assert_eq!(body["customers"].as_array().unwrap().len(), 6);
    assert_eq!(body["customers"][0]["id"], "c001");
}

#[tokio::test]
async fn test_get_customer() {
    let server = server();
    let body: Value = server.get("/admin/api/customers/c003").await.json();
    assert_eq!(body["status"], "suspended");

    let res = server.get("/admin/api/customers/zzz").await;
    assert_eq!(res.status_code(), StatusCode::NOT_FOUND);
    assert_eq!(res.json::<Value>()["error"], "not found");
}

#[tokio::test]
async fn test_suspend_then_read_back() {
    let server = server();
    let res = server.post("/admin/api/customers/c001/suspend").await;
    assert_eq!(res.status_code(), StatusCode::OK);
    assert_eq!(
        res.json::<Value>(),
        json!({ "success": true, "id": "c001", "status": "suspended" })
    );

    let body: Value = server.get("/admin/api/customers/c001").await.json();
    assert_eq!(body["status"], "suspended");

    let body: Value = server.post("/admin/api/customers/c001/activate").await.json();
    assert_eq!(body["status"], "active");
}

#[tokio::test]
async fn test_customer_transition_unknown_id() {
    let server = server();
    for action in ["suspend", "activate"] {
        let res = server.post(&format!("/admin/api/customers/nope/{action}")).await;
        assert_eq!(res.status_code(), StatusCode::NOT_FOUND);
    }
}

// ============ Nodes ============

#[tokio::test]
async fn test_node_offline() {
    let server = server();
    let res = server.post("/admin/api/nodes/n001/offline").await;
    assert_eq!(res.status_code(), StatusCode::OK);
    assert_eq!(
        res.json::<Value>(),
        json!({ "success": true, "id": "n001", "status": "offline" })
    );

    let body: Value = server.get("/admin/api/nodes").await.json();
    assert_eq!(body["nodes"][0]["status"], "offline");

    let res = server.post("/admin/api/nodes/n999/online").await;
    assert_eq!(res.status_code(), StatusCode::NOT_FOUND);
}

// ============ DNS ============

#[tokio::test]
async fn test_create_dns_rule() {
    let server = server();
    let res = server
        .post("/admin/api/dns-rules")
        .json(&json!({ "name": "R", "match": "CN", "nodeGroup": "east", "weight": 50, "ttl": 30 }))
        .await;
    assert_eq!(res.status_code(), StatusCode::CREATED);

    let body: Value = res.json();
    assert!(is_generated_id(body["id"].as_str().unwrap(), "d"));
    assert_eq!(body["name"], "R");
    assert_eq!(body["match"], "CN");
    assert_eq!(body["nodeGroup"], "east");
    assert_eq!(body["weight"], 50);
    assert_eq!(body["ttl"], 30);
    assert_eq!(body["status"], "active");

    let list: Value = server.get("/admin/api/dns-rules").await.json();
    assert_eq!(list["total"], 7);
}

#[tokio::test]
async fn test_create_dns_rule_defaults() {
    let body: Value = server()
        .post("/admin/api/dns-rules")
        .json(&json!({ "name": "only name" }))
        .await
        .json();
    assert_eq!(body["match"], "");
    assert_eq!(body["nodeGroup"], "");
    assert_eq!(body["weight"], 100);
    assert_eq!(body["ttl"], 60);
}

#[tokio::test]
async fn test_create_dns_rule_validation() {
    let server = server();

    let res = server.post("/admin/api/dns-rules").json(&json!({})).await;
    assert_eq!(res.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(res.json::<Value>(), json!({ "error": "name is required" }));

    let res = server.post("/admin/api/dns-rules").text("{ not json").await;
    assert_eq!(res.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(res.json::<Value>()["error"], "name is required");

    let res = server
        .post("/admin/api/dns-rules")
        .json(&json!({ "name": "R", "weight": 101 }))
        .await;
    assert_eq!(res.status_code(), StatusCode::BAD_REQUEST);
    assert!(res.json::<Value>()["error"].as_str().unwrap().starts_with("weight"));

    let res = server
        .post("/admin/api/dns-rules")
        .json(&json!({ "name": "R", "ttl": 0 }))
        .await;
    assert_eq!(res.status_code(), StatusCode::BAD_REQUEST);
    assert!(res.json::<Value>()["error"].as_str().unwrap().starts_with("ttl"));
}

#[tokio::test]
async fn test_update_dns_rule() {
    let server = server();
    let res = server
        .put("/admin/api/dns-rules/d001")
        .json(&json!({ "weight": 70 }))
        .await;
    assert_eq!(res.status_code(), StatusCode::OK);
    let body: Value = res.json();
    assert_eq!(body["success"], true);
    assert_eq!(body["id"], "d001");
    assert_eq!(body["weight"], 70);
    assert_eq!(body["ttl"], 60);

    let res = server.put("/admin/api/dns-rules/zzz").json(&json!({})).await;
    assert_eq!(res.status_code(), StatusCode::NOT_FOUND);

    let res = server
        .put("/admin/api/dns-rules/d001")
        .json(&json!({ "weight": -1 }))
        .await;
    assert_eq!(res.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_toggle_dns_rule_is_persisted() {
    let server = server();
    let body: Value = server.patch("/admin/api/dns-rules/d006/toggle").await.json();
    assert_eq!(body, json!({ "success": true, "id": "d006", "status": "active" }));

    let list: Value = server.get("/admin/api/dns-rules").await.json();
    let d006 = list["rules"]
        .as_array()
        .unwrap()
        .iter()
        .find(|r| r["id"] == "d006")
        .unwrap()
        .clone();
    assert_eq!(d006["status"], "active");

    let res = server.patch("/admin/api/dns-rules/zzz/toggle").await;
    assert_eq!(res.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_dns_rule_is_unconditional() {
    let server = server();
    let body: Value = server.delete("/admin/api/dns-rules/d001").await.json();
    assert_eq!(body, json!({ "success": true, "id": "d001" }));

    let res = server.delete("/admin/api/dns-rules/d001").await;
    assert_eq!(res.status_code(), StatusCode::OK);

    let list: Value = server.get("/admin/api/dns-rules").await.json();
    assert_eq!(list["total"], 5);
}

#[tokio::test]
async fn test_dns_health() {
    let body: Value = server().get("/admin/api/dns/health").await.json();
    let nodes = body["nodes"].as_array().unwrap();
    assert_eq!(nodes.len(), 8);
    for node in nodes {
        if node["status"] == "offline" {
            assert!(node["latency"].is_null());
        } else {
            let latency = node["latency"].as_u64().unwrap();
            assert!((5..=35).contains(&latency));
        }
        assert!(node["lastCheck"].is_string());
    }
}

// ============ Domain review ============

#[tokio::test]
async fn test_review_stats_follow_transitions() {
    let server = server();
    let stats: Value = server.get("/admin/api/domains/review/stats").await.json();
    assert_eq!(
        stats,
        json!({ "pending": 4, "reviewing": 1, "approved": 0, "rejected": 0, "total": 5 })
    );

    let body: Value = server.post("/admin/api/domains/review/dr001/approve").await.json();
    assert_eq!(body, json!({ "success": true, "id": "dr001", "status": "approved" }));

    let stats: Value = server.get("/admin/api/domains/review/stats").await.json();
    assert_eq!(stats["pending"], 3);
    assert_eq!(stats["approved"], 1);
}

#[tokio::test]
async fn test_reject_requires_reason() {
    let server = server();
    let res = server
        .post("/admin/api/domains/review/dr003/reject")
        .json(&json!({}))
        .await;
    assert_eq!(res.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(res.json::<Value>(), json!({ "error": "reason is required" }));

    let res = server
        .post("/admin/api/domains/review/dr003/reject")
        .json(&json!({ "reason": "未备案" }))
        .await;
    assert_eq!(res.status_code(), StatusCode::OK);
    assert_eq!(
        res.json::<Value>(),
        json!({ "success": true, "id": "dr003", "status": "rejected", "reason": "未备案" })
    );

    let list: Value = server.get("/admin/api/domains/review").await.json();
    let dr003 = list["domains"]
        .as_array()
        .unwrap()
        .iter()
        .find(|d| d["id"] == "dr003")
        .unwrap()
        .clone();
    assert_eq!(dr003["reason"], "未备案");
}

#[tokio::test]
async fn test_review_unknown_id_checked_before_body() {
    let server = server();
    let res = server
        .post("/admin/api/domains/review/nope/reject")
        .json(&json!({}))
        .await;
    assert_eq!(res.status_code(), StatusCode::NOT_FOUND);

    let res = server.post("/admin/api/domains/review/nope/approve").await;
    assert_eq!(res.status_code(), StatusCode::NOT_FOUND);
}

// ============ Finance / security ============

#[tokio::test]
async fn test_finance_endpoints() {
    let server = server();
    let overview: Value = server.get("/admin/api/finance/overview").await.json();
    assert_eq!(overview["month"]["target"], 300_000);
    assert_eq!(overview["pending"]["count"], 8);

    let invoices: Value = server.get("/admin/api/finance/invoices").await.json();
    assert_eq!(invoices["total"], 6);
    assert_eq!(invoices["invoices"][0]["id"], "INV-20260001");
    assert_eq!(invoices["invoices"][3]["status"], "paid");
    assert_eq!(invoices["invoices"][4]["status"], "pending");

    let trend: Value = server.get("/admin/api/finance/trend").await.json();
    assert_eq!(trend["months"].as_array().unwrap().len(), 6);
    assert_eq!(trend["months"][5], json!({ "month": "2026-02", "revenue": 284_600 }));
}

#[tokio::test]
async fn test_security_blacklist() {
    let server = server();
    let res = server.post("/admin/api/security/blacklist").json(&json!({})).await;
    assert_eq!(res.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(res.json::<Value>()["error"], "ip is required");

    let res = server
        .post("/admin/api/security/blacklist")
        .json(&json!({ "ip": "203.0.113.9", "reason": "scanner" }))
        .await;
    assert_eq!(res.status_code(), StatusCode::CREATED);
    let body: Value = res.json();
    assert_eq!(body["success"], true);
    assert_eq!(body["ip"], "203.0.113.9");
    assert_eq!(body["reason"], "scanner");
    assert!(body["addedAt"].is_string());

    let overview: Value = server.get("/admin/api/security/overview").await.json();
    assert_eq!(overview["blacklistCount"], 387);
    assert_eq!(overview["activeDDoS"], 2);

    let events: Value = server.get("/admin/api/security/events").await.json();
    assert_eq!(events["total"], 4);
}

// ============ Packages ============

#[tokio::test]
async fn test_package_lifecycle() {
    let server = server();
    let res = server.post("/admin/api/packages").json(&json!({ "price": 5 })).await;
    assert_eq!(res.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(res.json::<Value>()["error"], "name is required");

    let res = server
        .post("/admin/api/packages")
        .json(&json!({ "name": "Starter" }))
        .await;
    assert_eq!(res.status_code(), StatusCode::CREATED);
    let created: Value = res.json();
    let id = created["id"].as_str().unwrap().to_string();
    assert!(is_generated_id(&id, "p"));
    assert_eq!(created["price"], 0);
    assert_eq!(created["traffic"], "-");
    assert_eq!(created["domains"], 1);
    assert_eq!(created["users"], 0);
    assert_eq!(created["status"], "active");

    let updated: Value = server
        .put("/admin/api/packages/p002")
        .json(&json!({ "price": 399 }))
        .await
        .json();
    assert_eq!(updated["success"], true);
    assert_eq!(updated["id"], "p002");
    assert_eq!(updated["price"], 399);

    let res = server.put("/admin/api/packages/none").json(&json!({})).await;
    assert_eq!(res.status_code(), StatusCode::NOT_FOUND);

    let deleted: Value = server.delete(&format!("/admin/api/packages/{id}")).await.json();
    assert_eq!(deleted, json!({ "success": true, "id": id }));
    let list: Value = server.get("/admin/api/packages").await.json();
    assert_eq!(list["total"], 4);
}

// ============ Tickets ============

#[tokio::test]
async fn test_ticket_status_filter() {
    let server = server();
    let all: Value = server.get("/admin/api/tickets").await.json();
    assert_eq!(all["total"], 5);

    let open: Value = server
        .get("/admin/api/tickets")
        .add_query_param("status", "open")
        .await
        .json();
    assert_eq!(open["total"], 3);
    assert!(open["tickets"].as_array().unwrap().iter().all(|t| t["status"] == "open"));
}

// ============ Audit logs ============

#[tokio::test]
async fn test_audit_filter_by_action() {
    let body: Value = server()
        .get("/admin/api/audit-logs")
        .add_query_param("action", "login")
        .await
        .json();
    let logs = body["logs"].as_array().unwrap();
    assert_eq!(body["total"], 4);
    assert!(logs.iter().all(|l| l["action"] == "login"));
    assert_eq!(body["page"], 1);
    assert_eq!(body["limit"], 20);
}

#[tokio::test]
async fn test_audit_pagination_counts_before_slicing() {
    let server = server();
    let body: Value = server
        .get("/admin/api/audit-logs")
        .add_query_param("page", "1")
        .add_query_param("limit", "5")
        .await
        .json();
    assert_eq!(body["logs"].as_array().unwrap().len(), 5);
    assert_eq!(body["total"], 10);

    let body: Value = server
        .get("/admin/api/audit-logs")
        .add_query_param("page", "3")
        .add_query_param("limit", "5")
        .await
        .json();
    assert!(body["logs"].as_array().unwrap().is_empty());
    assert_eq!(body["total"], 10);

    let body: Value = server
        .get("/admin/api/audit-logs")
        .add_query_param("page", "x")
        .add_query_param("limit", "0")
        .await
        .json();
    assert_eq!(body["page"], 1);
    assert_eq!(body["limit"], 20);
}

#[tokio::test]
async fn test_audit_export_csv() {
    let res = server().get("/admin/api/audit-logs/export").await;
    assert_eq!(res.status_code(), StatusCode::OK);
    assert_eq!(res.header("content-type"), "text/csv; charset=utf-8");
    assert_eq!(
        res.header("content-disposition"),
        "attachment; filename=\"audit-logs.csv\""
    );

    let rows = parse_csv(&res.text());
    assert_eq!(
        rows[0],
        vec!["id", "operator", "action", "resource", "ip", "createdAt", "detail"]
    );
    assert_eq!(rows.len(), 1 + seed::audit_logs().len());
    assert_eq!(rows[1][5], "2026-02-25T08:00:00Z");
}

#[tokio::test]
async fn test_audit_export_quotes_commas() {
    let mut registry = Registry::seeded();
    registry.audit_logs = InMemoryRepository::shared(vec![AuditLogEntry {
        id: "al100".into(),
        operator: "admin".into(),
        action: "update".into(),
        resource: "node".into(),
        ip: "1.2.3.4".into(),
        created_at: Utc.with_ymd_and_hms(2026, 2, 27, 8, 0, 0).unwrap(),
        detail: "moved n001, n002 to \"east\"".into(),
    }]);

    let res = server_with(registry).get("/admin/api/audit-logs/export").await;
    let text = res.text();
    assert!(text.contains("\"moved n001, n002 to \"\"east\"\"\""));

    let rows = parse_csv(&text);
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[1].len(), 7);
    assert_eq!(rows[1][6], "moved n001, n002 to \"east\"");
}

// ============ Settings ============

#[tokio::test]
async fn test_settings_roundtrip() {
    let server = server();
    let body: Value = server.get("/admin/api/settings").await.json();
    assert_eq!(body["settings"]["platform"]["siteName"], "AgentFast CDN");
    assert_eq!(body["settings"]["security"]["ipWhitelist"], json!([]));

    let res = server
        .put("/admin/api/settings/platform")
        .json(&json!({ "maintenanceMode": true }))
        .await;
    assert_eq!(res.status_code(), StatusCode::OK);
    let body: Value = res.json();
    assert_eq!(body["success"], true);
    assert_eq!(body["settings"]["maintenanceMode"], true);
    assert_eq!(body["settings"]["maxDomains"], 10);

    let body: Value = server.get("/admin/api/settings").await.json();
    assert_eq!(body["settings"]["platform"]["maintenanceMode"], true);
}

#[tokio::test]
async fn test_smtp_settings_validation() {
    let server = server();
    let res = server
        .put("/admin/api/settings/smtp")
        .json(&json!({ "port": 25 }))
        .await;
    assert_eq!(res.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(res.json::<Value>(), json!({ "error": "host is required" }));

    let res = server
        .put("/admin/api/settings/smtp")
        .json(&json!({ "host": "mail.example.com", "port": 0 }))
        .await;
    assert_eq!(res.status_code(), StatusCode::BAD_REQUEST);

    let body: Value = server
        .put("/admin/api/settings/smtp")
        .json(&json!({ "host": "mail.example.com", "port": 587 }))
        .await
        .json();
    assert_eq!(body["settings"]["host"], "mail.example.com");
    assert_eq!(body["settings"]["port"], 587);
    assert_eq!(body["settings"]["user"], "no-reply@agentfast.com");
}

#[tokio::test]
async fn test_security_settings_bounds() {
    let server = server();
    let res = server
        .put("/admin/api/settings/security")
        .json(&json!({ "sessionTimeout": 10 }))
        .await;
    assert_eq!(res.status_code(), StatusCode::BAD_REQUEST);

    let res = server
        .put("/admin/api/settings/security")
        .json(&json!({ "maxLoginAttempts": 5, "twoFactorRequired": true }))
        .await;
    assert_eq!(res.status_code(), StatusCode::OK);
    let body: Value = res.json();
    assert_eq!(body["settings"]["maxLoginAttempts"], 5);
    assert_eq!(body["settings"]["twoFactorRequired"], true);
}

#[tokio::test]
async fn test_smtp_test_mail() {
    let server = server();
    let body: Value = server
        .post("/admin/api/settings/smtp/test")
        .json(&json!({ "to": "ops@example.com" }))
        .await
        .json();
    assert_eq!(body["success"], true);
    assert!(body["message"].as_str().unwrap().contains("ops@example.com"));
    assert!(body["timestamp"].is_string());

    let body: Value = server.post("/admin/api/settings/smtp/test").await.json();
    assert!(body["message"].as_str().unwrap().contains("admin@example.com"));
}
