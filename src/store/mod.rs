//! Resource registry
//!
//! Every collection sits behind the [`Repository`] trait. The in-memory
//! implementation keeps records in insertion order under a single
//! `parking_lot::RwLock`, so reads share the lock and each write (including a
//! read-modify-write `update`) is applied atomically. State lives for the
//! lifetime of the process and is rebuilt from [`seed`] on start.

pub mod seed;

use parking_lot::RwLock;
use std::sync::Arc;

use crate::models::*;

/// A record addressable by a string key.
pub trait Record: Clone + Send + Sync + 'static {
    fn id(&self) -> &str;
}

/// Collection operations used by the handlers.
pub trait Repository<T: Record>: Send + Sync {
    /// All records in insertion order
    fn list(&self) -> Vec<T>;

    /// Record with this id
    fn get(&self, id: &str) -> Option<T>;

    /// Append a record. Ids are not checked for uniqueness.
    fn create(&self, record: T) -> T;

    /// Apply `apply` to the record with this id and return the result.
    fn update(&self, id: &str, apply: &mut dyn FnMut(&mut T)) -> Option<T>;

    /// Replace the record with the same id, or append it.
    fn upsert(&self, record: T) -> T;

    /// Apply `apply` to the record with this id, appending `init()` first if
    /// there is none. Lookup, insert and `apply` happen under one write.
    fn upsert_with(&self, id: &str, init: &mut dyn FnMut() -> T, apply: &mut dyn FnMut(&mut T)) -> T;

    /// Remove every record with this id; returns whether anything was removed.
    fn delete(&self, id: &str) -> bool;

    /// Number of records matching `pred`
    fn count_where(&self, pred: &dyn Fn(&T) -> bool) -> usize {
        self.list().iter().filter(|r| pred(r)).count()
    }

    /// First record matching `pred`
    fn find_where(&self, pred: &dyn Fn(&T) -> bool) -> Option<T> {
        self.list().into_iter().find(|r| pred(r))
    }
}

/// Vec-backed repository
pub struct InMemoryRepository<T> {
    records: RwLock<Vec<T>>,
}

impl<T: Record> InMemoryRepository<T> {
    pub fn new(records: Vec<T>) -> Self {
        Self {
            records: RwLock::new(records),
        }
    }

    /// Shared handle, ready to drop into a [`Registry`] field
    pub fn shared(records: Vec<T>) -> Arc<dyn Repository<T>> {
        Arc::new(Self::new(records))
    }
}

impl<T: Record> Default for InMemoryRepository<T> {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl<T: Record> Repository<T> for InMemoryRepository<T> {
    fn list(&self) -> Vec<T> {
        self.records.read().clone()
    }

    fn get(&self, id: &str) -> Option<T> {
        self.records.read().iter().find(|r| r.id() == id).cloned()
    }

    fn create(&self, record: T) -> T {
        self.records.write().push(record.clone());
        record
    }

    fn update(&self, id: &str, apply: &mut dyn FnMut(&mut T)) -> Option<T> {
        let mut records = self.records.write();
        let record = records.iter_mut().find(|r| r.id() == id)?;
        apply(record);
        Some(record.clone())
    }

    fn upsert(&self, record: T) -> T {
        let mut records = self.records.write();
        match records.iter_mut().find(|r| r.id() == record.id()) {
            Some(existing) => *existing = record.clone(),
            None => records.push(record.clone()),
        }
        record
    }

    fn upsert_with(&self, id: &str, init: &mut dyn FnMut() -> T, apply: &mut dyn FnMut(&mut T)) -> T {
        let mut records = self.records.write();
        let index = match records.iter().position(|r| r.id() == id) {
            Some(index) => index,
            None => {
                records.push(init());
                records.len() - 1
            }
        };
        apply(&mut records[index]);
        records[index].clone()
    }

    fn delete(&self, id: &str) -> bool {
        let mut records = self.records.write();
        let before = records.len();
        records.retain(|r| r.id() != id);
        records.len() != before
    }

    fn count_where(&self, pred: &dyn Fn(&T) -> bool) -> usize {
        self.records.read().iter().filter(|r| pred(r)).count()
    }

    fn find_where(&self, pred: &dyn Fn(&T) -> bool) -> Option<T> {
        self.records.read().iter().find(|r| pred(r)).cloned()
    }
}

macro_rules! impl_record {
    ($($ty:ty => $field:ident),* $(,)?) => {
        $(impl Record for $ty {
            fn id(&self) -> &str {
                &self.$field
            }
        })*
    };
}

impl_record! {
    Customer => id,
    Node => id,
    DnsRule => id,
    PendingDomain => id,
    Ticket => id,
    AuditLogEntry => id,
    Package => id,
    AlertRule => id,
    AlertEvent => id,
    ApiKey => id,
    IpRule => id,
    RefererRule => id,
    OriginConfig => id,
    PerformanceConfig => domain,
    BlacklistEntry => ip,
}

/// Named collections backing the API
#[derive(Clone)]
pub struct Registry {
    pub customers: Arc<dyn Repository<Customer>>,
    pub nodes: Arc<dyn Repository<Node>>,
    pub dns_rules: Arc<dyn Repository<DnsRule>>,
    pub pending_domains: Arc<dyn Repository<PendingDomain>>,
    pub tickets: Arc<dyn Repository<Ticket>>,
    pub audit_logs: Arc<dyn Repository<AuditLogEntry>>,
    pub packages: Arc<dyn Repository<Package>>,
    pub alert_rules: Arc<dyn Repository<AlertRule>>,
    pub alert_history: Arc<dyn Repository<AlertEvent>>,
    pub api_keys: Arc<dyn Repository<ApiKey>>,
    pub ip_rules: Arc<dyn Repository<IpRule>>,
    pub referer_rules: Arc<dyn Repository<RefererRule>>,
    pub origin_configs: Arc<dyn Repository<OriginConfig>>,
    pub performance_configs: Arc<dyn Repository<PerformanceConfig>>,
    pub blacklist: Arc<dyn Repository<BlacklistEntry>>,
    pub finance: FinanceOverview,
}

impl Registry {
    /// Registry loaded with the fixture data
    pub fn seeded() -> Self {
        Self {
            customers: InMemoryRepository::shared(seed::customers()),
            nodes: InMemoryRepository::shared(seed::nodes()),
            dns_rules: InMemoryRepository::shared(seed::dns_rules()),
            pending_domains: InMemoryRepository::shared(seed::pending_domains()),
            tickets: InMemoryRepository::shared(seed::tickets()),
            audit_logs: InMemoryRepository::shared(seed::audit_logs()),
            packages: InMemoryRepository::shared(seed::packages()),
            alert_rules: InMemoryRepository::shared(seed::alert_rules()),
            alert_history: InMemoryRepository::shared(seed::alert_history()),
            api_keys: InMemoryRepository::shared(seed::api_keys()),
            ip_rules: InMemoryRepository::shared(seed::ip_rules()),
            referer_rules: InMemoryRepository::shared(Vec::new()),
            origin_configs: InMemoryRepository::shared(seed::origin_configs()),
            performance_configs: InMemoryRepository::shared(seed::performance_configs()),
            blacklist: InMemoryRepository::shared(Vec::new()),
            finance: seed::finance(),
        }
    }

    /// Registry with every collection empty
    pub fn empty() -> Self {
        Self {
            customers: InMemoryRepository::shared(Vec::new()),
            nodes: InMemoryRepository::shared(Vec::new()),
            dns_rules: InMemoryRepository::shared(Vec::new()),
            pending_domains: InMemoryRepository::shared(Vec::new()),
            tickets: InMemoryRepository::shared(Vec::new()),
            audit_logs: InMemoryRepository::shared(Vec::new()),
            packages: InMemoryRepository::shared(Vec::new()),
            alert_rules: InMemoryRepository::shared(Vec::new()),
            alert_history: InMemoryRepository::shared(Vec::new()),
            api_keys: InMemoryRepository::shared(Vec::new()),
            ip_rules: InMemoryRepository::shared(Vec::new()),
            referer_rules: InMemoryRepository::shared(Vec::new()),
            origin_configs: InMemoryRepository::shared(Vec::new()),
            performance_configs: InMemoryRepository::shared(Vec::new()),
            blacklist: InMemoryRepository::shared(Vec::new()),
            finance: seed::finance(),
        }
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::seeded()
    }
}

/// `{prefix}-{unix millis}`
pub fn next_id(prefix: &str) -> String {
    format!("{}-{}", prefix, chrono::Utc::now().timestamp_millis())
}

/// `T-` plus the last six digits of the millisecond clock
pub fn next_ticket_id() -> String {
    let millis = chrono::Utc::now().timestamp_millis().rem_euclid(1_000_000);
    format!("T-{:06}", millis)
}

/// Current time as an RFC 3339 string with millisecond precision
pub fn now_rfc3339() -> String {
    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(id: &str, weight: u32) -> DnsRule {
        DnsRule {
            id: id.into(),
            name: format!("rule {id}"),
            match_expr: "CN".into(),
            node_group: "group".into(),
            weight,
            ttl: 60,
            status: RuleStatus::Active,
        }
    }

    #[test]
    fn test_list_keeps_insertion_order() {
        let repo = InMemoryRepository::new(vec![rule("b", 1), rule("a", 2)]);
        repo.create(rule("c", 3));
        let ids: Vec<_> = repo.list().into_iter().map(|r| r.id).collect();
        assert_eq!(ids, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_update_is_visible_to_later_reads() {
        let repo = InMemoryRepository::new(vec![rule("d001", 100)]);
        let updated = repo.update("d001", &mut |r| r.status = r.status.toggled()).unwrap();
        assert_eq!(updated.status, RuleStatus::Inactive);
        assert_eq!(repo.get("d001").unwrap().status, RuleStatus::Inactive);
        assert!(repo.update("missing", &mut |r| r.weight = 0).is_none());
    }

    #[test]
    fn test_delete_is_idempotent() {
        let repo = InMemoryRepository::new(vec![rule("d001", 100)]);
        assert!(repo.delete("d001"));
        assert!(!repo.delete("d001"));
        assert!(repo.list().is_empty());
    }

    #[test]
    fn test_upsert_replaces_or_appends() {
        let repo = InMemoryRepository::new(vec![rule("d001", 100)]);
        repo.upsert(rule("d001", 10));
        repo.upsert(rule("d002", 20));
        assert_eq!(repo.list().len(), 2);
        assert_eq!(repo.get("d001").unwrap().weight, 10);
    }

    #[test]
    fn test_concurrent_upsert_with_keeps_every_change() {
        let repo = InMemoryRepository::<DnsRule>::default();
        std::thread::scope(|scope| {
            for _ in 0..8 {
                scope.spawn(|| {
                    for _ in 0..50 {
                        repo.upsert_with("d100", &mut || rule("d100", 0), &mut |r| r.weight += 1);
                    }
                });
            }
        });
        assert_eq!(repo.list().len(), 1);
        assert_eq!(repo.get("d100").unwrap().weight, 400);
    }

    #[test]
    fn test_create_permits_duplicate_ids() {
        let repo = InMemoryRepository::<DnsRule>::default();
        repo.create(rule("x", 1));
        repo.create(rule("x", 2));
        assert_eq!(repo.count_where(&|r| r.id == "x"), 2);
    }

    #[test]
    fn test_generated_ids() {
        let id = next_id("d");
        let (prefix, digits) = id.split_once('-').unwrap();
        assert_eq!(prefix, "d");
        assert!(digits.chars().all(|c| c.is_ascii_digit()));

        let ticket = next_ticket_id();
        assert_eq!(ticket.len(), 8);
        assert!(ticket.starts_with("T-"));
    }

    #[test]
    fn test_seeded_registry_has_fixtures() {
        let registry = Registry::seeded();
        assert_eq!(registry.customers.list().len(), 6);
        assert_eq!(registry.nodes.list().len(), 8);
        assert!(registry.dns_rules.get("d001").is_some());
        assert!(Registry::empty().customers.list().is_empty());
    }
}
