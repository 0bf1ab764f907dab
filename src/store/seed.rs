//! Fixture data loaded into the registry at startup

use chrono::{DateTime, Utc};
use serde_json::{Map, Number};

use crate::models::*;

fn s(v: &str) -> String {
    v.to_string()
}

fn at(rfc3339: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(rfc3339)
        .map(|d| d.with_timezone(&Utc))
        .unwrap_or_default()
}

pub fn customers() -> Vec<Customer> {
    use CustomerPlan::*;
    use CustomerStatus::*;
    let rows = [
        ("c001", "张三", "北京科技有限公司", "zhang@tech.com", Enterprise, Active, 12, "8.4 TB", "¥12,480", "2025-06-01"),
        ("c002", "李四", "上海电商集团", "li@shop.cn", Pro, Active, 5, "3.2 TB", "¥4,680", "2025-08-15"),
        ("c003", "王五", "广州传媒公司", "wang@media.com", Pro, Suspended, 3, "0", "¥2,100", "2025-09-01"),
        ("c004", "赵六", "深圳游戏科技", "zhao@game.io", Enterprise, Active, 8, "15.6 TB", "¥28,900", "2025-07-20"),
        ("c005", "钱七", "杭州教育平台", "qian@edu.cn", Free, Active, 1, "0.3 TB", "¥0", "2026-01-10"),
        ("c006", "孙八", "成都软件公司", "sun@soft.net", Pro, Active, 4, "1.8 TB", "¥3,200", "2025-11-05"),
    ];
    rows.into_iter()
        .map(|(id, name, company, email, plan, status, domains, traffic, spend, joined)| Customer {
            id: s(id),
            name: s(name),
            company: s(company),
            email: s(email),
            plan,
            status,
            domains,
            traffic: s(traffic),
            spend: s(spend),
            joined: s(joined),
        })
        .collect()
}

pub fn nodes() -> Vec<Node> {
    use NodeStatus::*;
    let rows = [
        ("n001", "华东-上海-01", "101.251.12.18", "华东", "上海", "电信", Online, 482, 1000, 34, 61, "99.98%"),
        ("n002", "华东-上海-02", "101.251.12.19", "华东", "上海", "联通", Online, 321, 1000, 28, 54, "99.95%"),
        ("n003", "华南-广州-01", "121.14.22.33", "华南", "广州", "电信", Online, 267, 500, 52, 71, "99.92%"),
        ("n004", "华北-北京-01", "61.135.17.44", "华北", "北京", "联通", Warning, 189, 500, 78, 85, "99.81%"),
        ("n005", "华西-成都-01", "115.171.8.55", "华西", "成都", "电信", Online, 98, 200, 41, 58, "99.99%"),
        ("n006", "香港-HK-01", "203.18.11.66", "香港", "香港", "HKBN", Online, 312, 500, 29, 47, "100%"),
        ("n007", "新加坡-SG-01", "128.199.22.77", "亚太", "新加坡", "Singtel", Online, 201, 500, 33, 52, "99.97%"),
        ("n008", "美西-LA-01", "23.224.33.88", "欧美", "洛杉矶", "Cogent", Offline, 0, 500, 0, 0, "98.12%"),
    ];
    rows.into_iter()
        .map(|(id, name, ip, region, city, isp, status, bandwidth, capacity, cpu, mem, uptime)| Node {
            id: s(id),
            name: s(name),
            ip: s(ip),
            region: s(region),
            city: s(city),
            isp: s(isp),
            status,
            bandwidth,
            capacity,
            cpu,
            mem,
            uptime: s(uptime),
        })
        .collect()
}

pub fn dns_rules() -> Vec<DnsRule> {
    use RuleStatus::*;
    let rows = [
        ("d001", "中国大陆-电信", "CN-Telecom", "华东电信组", 100, 60, Active),
        ("d002", "中国大陆-联通", "CN-Unicom", "华东联通组", 100, 60, Active),
        ("d003", "中国大陆-移动", "CN-Mobile", "华南移动组", 100, 60, Active),
        ("d004", "香港/澳门/台湾", "HK/MO/TW", "香港节点组", 100, 30, Active),
        ("d005", "亚太地区", "APAC", "新加坡节点组", 80, 60, Active),
        ("d006", "欧美地区", "NA/EU", "美西节点组", 60, 120, Inactive),
    ];
    rows.into_iter()
        .map(|(id, name, match_expr, node_group, weight, ttl, status)| DnsRule {
            id: s(id),
            name: s(name),
            match_expr: s(match_expr),
            node_group: s(node_group),
            weight,
            ttl,
            status,
        })
        .collect()
}

pub fn pending_domains() -> Vec<PendingDomain> {
    use ReviewStatus::*;
    let rows = [
        ("dr001", "video.newstream.cn", "张三 / 北京科技", "视频点播", "京ICP备2024001234号", "2026-02-26 09:12:33", Pending),
        ("dr002", "api.fastgame.io", "赵六 / 深圳游戏科技", "动态加速", "粤ICP备2023005678号", "2026-02-26 08:44:01", Pending),
        ("dr003", "img.shopfast.cn", "李四 / 上海电商集团", "静态文件", "沪ICP备2022009012号", "2026-02-25 22:30:15", Reviewing),
        ("dr004", "cdn.badsite.xyz", "匿名用户", "静态文件", "未备案", "2026-02-25 20:11:44", Pending),
        ("dr005", "files.edufast.cn", "钱七 / 杭州教育平台", "下载加速", "浙ICP备2025003456号", "2026-02-25 18:55:22", Pending),
    ];
    rows.into_iter()
        .map(|(id, domain, customer, domain_type, icp, submitted, status)| PendingDomain {
            id: s(id),
            domain: s(domain),
            customer: s(customer),
            domain_type: s(domain_type),
            icp: s(icp),
            submitted: s(submitted),
            status,
            reason: None,
        })
        .collect()
}

pub fn tickets() -> Vec<Ticket> {
    use TicketPriority::*;
    use TicketStatus::*;
    let rows = [
        ("t001", "域名解析不生效，已等待2小时", "张三", High, Open, "2026-02-26 14:23", "客服小王"),
        ("t002", "缓存刷新接口报错 500", "赵六", Urgent, Open, "2026-02-26 13:45", "未分配"),
        ("t003", "申请开具增值税发票", "李四", Low, Pending, "2026-02-26 11:20", "财务小张"),
        ("t004", "带宽告警频繁触发，需调整阈值", "孙八", Medium, Resolved, "2026-02-25 16:30", "客服小王"),
        ("t005", "SSL证书申请失败", "钱七", High, Open, "2026-02-25 09:12", "技术小李"),
    ];
    rows.into_iter()
        .map(|(id, subject, customer, priority, status, created, assigned)| Ticket {
            id: s(id),
            subject: s(subject),
            content: None,
            customer: Some(s(customer)),
            priority,
            status,
            created: s(created),
            assigned: Some(s(assigned)),
        })
        .collect()
}

pub fn audit_logs() -> Vec<AuditLogEntry> {
    let rows = [
        ("al001", "admin", "login", "system", "1.2.3.4", "2026-02-25T08:00:00Z", "管理员登录"),
        ("al002", "admin", "suspend", "customer", "1.2.3.4", "2026-02-25T09:10:00Z", "封禁客户c003"),
        ("al003", "ops1", "login", "system", "5.6.7.8", "2026-02-25T09:30:00Z", "运营登录"),
        ("al004", "admin", "approve", "domain", "1.2.3.4", "2026-02-25T10:00:00Z", "审核域名"),
        ("al005", "ops1", "update", "node", "5.6.7.8", "2026-02-25T11:00:00Z", "更新节点配置"),
        ("al006", "admin", "login", "system", "1.2.3.4", "2026-02-26T08:00:00Z", "管理员登录"),
        ("al007", "ops2", "reject", "domain", "9.10.11.12", "2026-02-26T09:00:00Z", "拒绝域名申请"),
        ("al008", "admin", "update", "settings", "1.2.3.4", "2026-02-26T10:00:00Z", "更新系统配置"),
        ("al009", "ops1", "login", "system", "5.6.7.8", "2026-02-26T10:30:00Z", "运营登录"),
        ("al010", "admin", "delete", "package", "1.2.3.4", "2026-02-26T11:00:00Z", "删除套餐"),
    ];
    rows.into_iter()
        .map(|(id, operator, action, resource, ip, created_at, detail)| AuditLogEntry {
            id: s(id),
            operator: s(operator),
            action: s(action),
            resource: s(resource),
            ip: s(ip),
            created_at: at(created_at),
            detail: s(detail),
        })
        .collect()
}

pub fn packages() -> Vec<Package> {
    let rows = [
        ("p001", "免费版", 0, "10GB/月", 1, 28),
        ("p002", "专业版 Pro", 299, "1TB/月", 10, 142),
        ("p003", "企业版", 1299, "无限流量", 99, 35),
        ("p004", "按量计费", 0, "¥0.12/GB", 5, 67),
    ];
    rows.into_iter()
        .map(|(id, name, price, traffic, domains, users)| Package {
            id: s(id),
            name: s(name),
            price,
            traffic: s(traffic),
            domains,
            status: RuleStatus::Active,
            users,
        })
        .collect()
}

pub fn finance() -> FinanceOverview {
    FinanceOverview {
        today: RevenueWindow { revenue: 18_420, transactions: Some(34), target: None },
        month: RevenueWindow { revenue: 284_600, transactions: None, target: Some(300_000) },
        year: RevenueWindow { revenue: 1_840_000, transactions: None, target: None },
        pending: PendingPayments { amount: 42_300, count: 8 },
    }
}

/// One invoice per customer for the current billing period
pub fn invoices(customers: &[Customer]) -> Vec<Invoice> {
    customers
        .iter()
        .enumerate()
        .map(|(i, c)| Invoice {
            id: format!("INV-2026{:04}", i + 1),
            customer: c.name.clone(),
            company: c.company.clone(),
            plan: c.plan,
            amount: c.spend.clone(),
            status: s(if i < 4 { "paid" } else { "pending" }),
            period: s("2026-02"),
        })
        .collect()
}

pub fn revenue_trend() -> Vec<MonthlyRevenue> {
    [
        ("2025-09", 182_000),
        ("2025-10", 214_000),
        ("2025-11", 238_000),
        ("2025-12", 251_000),
        ("2026-01", 273_000),
        ("2026-02", 284_600),
    ]
    .into_iter()
    .map(|(month, revenue)| MonthlyRevenue { month: s(month), revenue })
    .collect()
}

pub fn security_overview() -> SecurityOverview {
    SecurityOverview {
        blocked_today: 1284,
        active_ddos: 2,
        blacklist_count: 386,
        waf_hits: 437,
        coverage_rate: 99.94,
    }
}

pub fn security_events() -> Vec<SecurityEvent> {
    [
        ("14:23:11", "103.21.244.18", "DDoS UDP Flood", "cdn.shopxyz.cn", "已缓解", "12.4 Gbps"),
        ("13:45:02", "45.138.0.44", "CC攻击", "api.fastgame.io", "已拦截", "8,400 req/s"),
        ("11:20:33", "192.3.88.91", "SQL注入", "多个域名", "已拦截", "-"),
        ("09:12:55", "198.51.100.23", "XSS探测", "img.newsportal.com", "已拦截", "-"),
    ]
    .into_iter()
    .map(|(time, ip, event_type, target, action, peak)| SecurityEvent {
        time: s(time),
        ip: s(ip),
        event_type: s(event_type),
        target: s(target),
        action: s(action),
        peak: s(peak),
    })
    .collect()
}

pub fn alert_rules() -> Vec<AlertRule> {
    use AlertOperator::*;
    let rows: [(&str, &str, &str, u64, &str, AlertOperator, &str, &[&str], bool, u32); 5] = [
        ("ar001", "带宽超限告警", "bandwidth", 500, "Gbps", Gt, "全部域名", &["email", "wechat"], true, 3),
        ("ar002", "5xx错误率告警", "error_rate", 1, "%", Gt, "全部域名", &["email"], true, 1),
        ("ar003", "命中率下降告警", "hit_rate", 90, "%", Lt, "api.gamehub.io", &["email"], true, 0),
        ("ar004", "回源流量异常", "origin_traffic", 100, "GB/h", Gt, "全部域名", &["wechat"], false, 0),
        ("ar005", "节点延迟告警", "latency", 200, "ms", Gt, "全部域名", &["email", "sms"], true, 0),
    ];
    rows.into_iter()
        .map(|(id, name, metric, threshold, unit, operator, domain, channels, enabled, triggered)| AlertRule {
            id: s(id),
            name: s(name),
            metric: Some(s(metric)),
            threshold: Number::from(threshold),
            unit: Some(s(unit)),
            operator: Some(operator),
            domain: Some(s(domain)),
            channels: channels.iter().map(|c| s(c)).collect(),
            enabled,
            triggered,
            extra: Map::new(),
        })
        .collect()
}

pub fn alert_history() -> Vec<AlertEvent> {
    use AlertLevel::*;
    let rows = [
        ("ah001", Critical, "带宽超限告警", "cdn.shopxyz.cn", "带宽达到 612 Gbps，超过阈值 500 Gbps", "2026-02-26 14:32:18", "23分钟"),
        ("ah002", Warning, "5xx错误率告警", "api.gamehub.io", "5xx 错误率 2.3%，超过阈值 1%", "2026-02-26 10:15:44", "8分钟"),
        ("ah003", Critical, "带宽超限告警", "static.example.com", "带宽达到 534 Gbps，超过阈值 500 Gbps", "2026-02-25 20:08:12", "15分钟"),
        ("ah004", Info, "命中率下降告警", "img.newsportal.com", "缓存命中率 88.2%，低于阈值 90%", "2026-02-24 16:44:33", "42分钟"),
        ("ah005", Warning, "带宽超限告警", "cdn.shopxyz.cn", "带宽达到 503 Gbps，超过阈值 500 Gbps", "2026-02-23 11:20:05", "6分钟"),
    ];
    rows.into_iter()
        .map(|(id, level, rule, domain, message, time, duration)| AlertEvent {
            id: s(id),
            level,
            rule: s(rule),
            domain: s(domain),
            message: s(message),
            time: s(time),
            duration: s(duration),
            status: s("resolved"),
        })
        .collect()
}

pub fn api_keys() -> Vec<ApiKey> {
    vec![
        ApiKey {
            id: s("key-001"),
            name: s("生产环境Key"),
            key: s("af_prod****"),
            permissions: vec![s("read"), s("write")],
            created: s("2026-01-15"),
            last_used: Some(s("5分钟前")),
        },
        ApiKey {
            id: s("key-002"),
            name: s("监控系统Key"),
            key: s("af_mon*****"),
            permissions: vec![s("read")],
            created: s("2025-12-01"),
            last_used: Some(s("1小时前")),
        },
    ]
}

pub fn ip_rules() -> Vec<IpRule> {
    use ListKind::*;
    let rows = [
        ("r001", "192.168.1.0/24", Whitelist, "全部域名", "内网白名单", "2026-01-10"),
        ("r002", "103.21.244.0/22", Blacklist, "cdn.shopxyz.cn", "已知爬虫IP段", "2026-02-01"),
        ("r003", "45.138.0.0/16", Blacklist, "全部域名", "恶意扫描", "2026-02-18"),
        ("r004", "10.0.0.0/8", Whitelist, "全部域名", "私有网络", "2025-12-01"),
    ];
    rows.into_iter()
        .map(|(id, ip, kind, domain, remark, created)| IpRule {
            id: s(id),
            ip: s(ip),
            kind,
            domain: Some(s(domain)),
            remark: Some(s(remark)),
            created: s(created),
            extra: Map::new(),
        })
        .collect()
}

pub fn origin_configs() -> Vec<OriginConfig> {
    let rows = [
        ("oc001", "cdn.shopxyz.cn", "https://origin.shopxyz.cn", "HTTPS", 443, 30, true),
        ("oc002", "img.newsportal.com", "http://img-origin.newsportal.com", "HTTP", 80, 15, false),
        ("oc003", "api.fastgame.io", "https://api-origin.fastgame.io", "HTTPS", 443, 10, false),
        ("oc004", "files.edufast.cn", "http://files.edufast.cn:8080", "HTTP", 8080, 60, true),
    ];
    rows.into_iter()
        .map(|(id, domain, origin_url, protocol, port, timeout, follow_redirect)| OriginConfig {
            id: s(id),
            domain: s(domain),
            origin_url: s(origin_url),
            protocol: Some(s(protocol)),
            port: Some(port),
            timeout: Some(timeout),
            follow_redirect: Some(follow_redirect),
            updated: s("2026-02-20T00:00:00.000Z"),
            extra: Map::new(),
        })
        .collect()
}

pub fn performance_configs() -> Vec<PerformanceConfig> {
    use CacheMode::*;
    let rows = [
        ("cdn.shopxyz.cn", [true, true, true, false, true, true, true, true], Smart),
        ("img.newsportal.com", [true, false, true, true, true, false, false, false], Aggressive),
        ("api.fastgame.io", [true, true, true, true, false, false, false, false], Bypass),
        ("files.edufast.cn", [true, false, true, false, false, true, false, false], Standard),
    ];
    rows.into_iter()
        .map(|(domain, [gzip, brotli, http2, http3, webp, lazy_load, minify_js, minify_css], cache_mode)| {
            PerformanceConfig {
                domain: s(domain),
                gzip,
                brotli,
                http2,
                http3,
                webp,
                lazy_load,
                minify_js,
                minify_css,
                cache_mode,
            }
        })
        .collect()
}

const LOG_DOMAINS: [&str; 5] = [
    "static.example.com",
    "cdn.shopxyz.cn",
    "img.newsportal.com",
    "api.gamehub.io",
    "assets.educloud.cn",
];
const LOG_METHODS: [&str; 6] = ["GET", "GET", "GET", "GET", "HEAD", "POST"];
const LOG_STATUSES: [u16; 11] = [200, 200, 200, 200, 200, 200, 200, 304, 404, 206, 500];
const LOG_PATHS: [&str; 7] = [
    "/js/app.js",
    "/css/main.css",
    "/img/banner.jpg",
    "/api/data.json",
    "/fonts/icon.woff2",
    "/video/intro.mp4",
    "/download/file.zip",
];
const LOG_REGIONS: [&str; 5] = ["华东", "华南", "华北", "华西", "海外"];

/// Deterministic edge access log sample of `count` lines
pub fn access_logs(count: usize) -> Vec<AccessLog> {
    (0..count)
        .map(|i| {
            let f = i as f64;
            let status_idx = ((f * 3.0).sin().abs() * LOG_STATUSES.len() as f64) as usize;
            let status = LOG_STATUSES[status_idx.min(LOG_STATUSES.len() - 1)];
            let domain = LOG_DOMAINS[i % LOG_DOMAINS.len()];
            let cache = if status == 304 || i % 10 != 9 { "HIT" } else { "MISS" };
            AccessLog {
                id: format!("log-{}", i + 1),
                time: format!(
                    "2026-02-26 {:02}:{:02}:{:02}",
                    (i / 6) % 24,
                    (i * 7) % 60,
                    (i * 13) % 60
                ),
                ip: format!(
                    "{}.{}.{}.{}",
                    (i * 7 + 1) % 255,
                    (i * 13 + 1) % 255,
                    (i * 3 + 1) % 255,
                    (i * 17 + 1) % 255
                ),
                method: s(LOG_METHODS[i % LOG_METHODS.len()]),
                domain: s(domain),
                url: format!("https://{}{}", domain, LOG_PATHS[i % LOG_PATHS.len()]),
                status,
                size: (1024.0 + f.sin().abs() * 512_000.0).round() as u64,
                duration: (5.0 + (f * 2.0).sin().abs() * 200.0).round() as u32,
                cache: s(cache),
                region: s(LOG_REGIONS[i % LOG_REGIONS.len()]),
                node: format!("node-{:03}", (i / 3) % 8 + 1),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_seed_ids_unique() {
        fn unique<I: IntoIterator<Item = String>>(ids: I) -> bool {
            let ids: Vec<_> = ids.into_iter().collect();
            ids.iter().collect::<HashSet<_>>().len() == ids.len()
        }
        assert!(unique(customers().into_iter().map(|c| c.id)));
        assert!(unique(nodes().into_iter().map(|n| n.id)));
        assert!(unique(dns_rules().into_iter().map(|r| r.id)));
        assert!(unique(audit_logs().into_iter().map(|l| l.id)));
    }

    #[test]
    fn test_seed_respects_bounds() {
        assert!(nodes().iter().all(|n| n.cpu <= 100 && n.mem <= 100));
        assert!(dns_rules().iter().all(|r| r.weight <= 100 && r.ttl > 0));
    }

    #[test]
    fn test_access_logs_deterministic() {
        let a = access_logs(100);
        let b = access_logs(100);
        assert_eq!(a.len(), 100);
        assert_eq!(a[42].url, b[42].url);
        assert_eq!(a[42].status, b[42].status);
        assert_eq!(a[0].id, "log-1");
    }

    #[test]
    fn test_audit_timestamps_parse() {
        let logs = audit_logs();
        assert_eq!(logs[0].created_at.to_rfc3339(), "2026-02-25T08:00:00+00:00");
    }
}
