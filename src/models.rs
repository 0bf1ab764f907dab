//! API Models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};
use utoipa::ToSchema;

// ============ Customers ============

/// Customer account
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Customer {
    pub id: String,
    pub name: String,
    pub company: String,
    pub email: String,
    pub plan: CustomerPlan,
    pub status: CustomerStatus,
    pub domains: u32,
    pub traffic: String,
    pub spend: String,
    pub joined: String,
}

/// Subscription plan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum CustomerPlan {
    Free,
    Pro,
    Enterprise,
}

/// Account status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum CustomerStatus {
    Active,
    Suspended,
}

// ============ Nodes ============

/// Edge node
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Node {
    pub id: String,
    pub name: String,
    pub ip: String,
    pub region: String,
    pub city: String,
    pub isp: String,
    pub status: NodeStatus,
    /// Current bandwidth in Mbps
    pub bandwidth: u64,
    pub capacity: u64,
    /// CPU usage percent, 0-100
    pub cpu: u8,
    /// Memory usage percent, 0-100
    pub mem: u8,
    pub uptime: String,
}

/// Node status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum NodeStatus {
    Online,
    Warning,
    Offline,
}

// ============ DNS scheduling ============

/// GSLB scheduling rule
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DnsRule {
    pub id: String,
    pub name: String,
    #[serde(rename = "match")]
    pub match_expr: String,
    pub node_group: String,
    /// Traffic weight, 0-100
    pub weight: u32,
    /// Record TTL in seconds, > 0
    pub ttl: u32,
    pub status: RuleStatus,
}

/// Enabled state shared by rules and packages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum RuleStatus {
    Active,
    Inactive,
}

impl RuleStatus {
    pub fn toggled(self) -> Self {
        match self {
            RuleStatus::Active => RuleStatus::Inactive,
            RuleStatus::Inactive => RuleStatus::Active,
        }
    }
}

// ============ Domain review ============

/// Domain awaiting onboarding review
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PendingDomain {
    pub id: String,
    pub domain: String,
    pub customer: String,
    #[serde(rename = "type")]
    pub domain_type: String,
    pub icp: String,
    pub submitted: String,
    pub status: ReviewStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Review status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ReviewStatus {
    Pending,
    Reviewing,
    Approved,
    Rejected,
}

// ============ Tickets ============

/// Support ticket
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Ticket {
    pub id: String,
    pub subject: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer: Option<String>,
    pub priority: TicketPriority,
    pub status: TicketStatus,
    pub created: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum TicketPriority {
    Low,
    #[default]
    Medium,
    High,
    Urgent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum TicketStatus {
    Open,
    Pending,
    Resolved,
}

impl TicketStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            TicketStatus::Open => "open",
            TicketStatus::Pending => "pending",
            TicketStatus::Resolved => "resolved",
        }
    }
}

// ============ Audit ============

/// Back-office audit trail entry
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuditLogEntry {
    pub id: String,
    pub operator: String,
    pub action: String,
    pub resource: String,
    pub ip: String,
    pub created_at: DateTime<Utc>,
    pub detail: String,
}

// ============ Packages ============

/// Sellable plan package
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Package {
    pub id: String,
    pub name: String,
    /// Monthly price in CNY
    pub price: u32,
    pub traffic: String,
    pub domains: u32,
    pub status: RuleStatus,
    pub users: u32,
}

// ============ Finance / security ============

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FinanceOverview {
    pub today: RevenueWindow,
    pub month: RevenueWindow,
    pub year: RevenueWindow,
    pub pending: PendingPayments,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RevenueWindow {
    pub revenue: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transactions: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PendingPayments {
    pub amount: u64,
    pub count: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Invoice {
    pub id: String,
    pub customer: String,
    pub company: String,
    pub plan: CustomerPlan,
    pub amount: String,
    pub status: String,
    pub period: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MonthlyRevenue {
    pub month: String,
    pub revenue: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SecurityOverview {
    pub blocked_today: u64,
    #[serde(rename = "activeDDoS")]
    pub active_ddos: u32,
    pub blacklist_count: u64,
    pub waf_hits: u64,
    pub coverage_rate: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SecurityEvent {
    pub time: String,
    pub ip: String,
    #[serde(rename = "type")]
    pub event_type: String,
    pub target: String,
    pub action: String,
    pub peak: String,
}

/// Platform-wide IP block entry
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BlacklistEntry {
    pub ip: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    pub added_at: String,
}

// ============ Alerts ============

/// Threshold alert rule
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertRule {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metric: Option<String>,
    pub threshold: Number,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operator: Option<AlertOperator>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    #[serde(default)]
    pub channels: Vec<String>,
    pub enabled: bool,
    pub triggered: u32,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum AlertOperator {
    Gt,
    Lt,
}

/// Fired alert
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AlertEvent {
    pub id: String,
    pub level: AlertLevel,
    pub rule: String,
    pub domain: String,
    pub message: String,
    pub time: String,
    pub duration: String,
    pub status: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum AlertLevel {
    Info,
    Warning,
    Critical,
}

// ============ API keys ============

/// API key. `key` holds the full secret only in the creation response.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApiKey {
    pub id: String,
    pub name: String,
    pub key: String,
    pub permissions: Vec<String>,
    pub created: String,
    pub last_used: Option<String>,
}

// ============ Access control ============

/// Allow/deny list kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ListKind {
    Whitelist,
    Blacklist,
}

/// IP allow/deny rule
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IpRule {
    pub id: String,
    pub ip: String,
    #[serde(rename = "type")]
    pub kind: ListKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remark: Option<String>,
    pub created: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Hotlink protection rule
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefererRule {
    pub id: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<ListKind>,
    pub values: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

// ============ Origin / performance ============

/// Back-to-origin settings for one accelerated domain
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OriginConfig {
    pub id: String,
    pub domain: String,
    pub origin_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protocol: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub follow_redirect: Option<bool>,
    pub updated: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Edge optimisation switches for one domain
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceConfig {
    pub domain: String,
    pub gzip: bool,
    pub brotli: bool,
    pub http2: bool,
    pub http3: bool,
    pub webp: bool,
    pub lazy_load: bool,
    pub minify_js: bool,
    pub minify_css: bool,
    pub cache_mode: CacheMode,
}

impl PerformanceConfig {
    /// Defaults for a domain with no saved configuration
    pub fn for_domain(domain: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            gzip: true,
            brotli: false,
            http2: true,
            http3: false,
            webp: false,
            lazy_load: false,
            minify_js: false,
            minify_css: false,
            cache_mode: CacheMode::Standard,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum CacheMode {
    Smart,
    Aggressive,
    Standard,
    Bypass,
}

// ============ Access logs ============

/// One edge access log line
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AccessLog {
    pub id: String,
    pub time: String,
    pub ip: String,
    pub method: String,
    pub domain: String,
    pub url: String,
    pub status: u16,
    pub size: u64,
    pub duration: u32,
    pub cache: String,
    pub region: String,
    pub node: String,
}
