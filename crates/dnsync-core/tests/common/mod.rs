//! Test doubles and common utilities for reconciler tests
//!
//! These mocks track call counts with atomic counters so tests can assert
//! exactly which provider and resolver calls a pass performed.

use std::net::Ipv4Addr;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use dnsync_core::error::{Error, Result};
use dnsync_core::record::RemoteRecord;
use dnsync_core::traits::{DnsProvider, IpResolver};

/// A mock DnsProvider backed by an in-memory record list
///
/// Create and update calls mutate the list (with `proxied` forced to true,
/// like the real provider), so consecutive passes observe each other's
/// writes.
pub struct MockDnsProvider {
    records: Mutex<Vec<RemoteRecord>>,
    list_calls: AtomicUsize,
    create_calls: AtomicUsize,
    update_calls: AtomicUsize,
    next_id: AtomicUsize,
    /// When set, every create/update call fails with a provider error
    fail_mutations: bool,
}

impl MockDnsProvider {
    pub fn new(existing: Vec<RemoteRecord>) -> Arc<Self> {
        Arc::new(Self {
            records: Mutex::new(existing),
            list_calls: AtomicUsize::new(0),
            create_calls: AtomicUsize::new(0),
            update_calls: AtomicUsize::new(0),
            next_id: AtomicUsize::new(1),
            fail_mutations: false,
        })
    }

    pub fn failing_mutations(existing: Vec<RemoteRecord>) -> Arc<Self> {
        Arc::new(Self {
            records: Mutex::new(existing),
            list_calls: AtomicUsize::new(0),
            create_calls: AtomicUsize::new(0),
            update_calls: AtomicUsize::new(0),
            next_id: AtomicUsize::new(1),
            fail_mutations: true,
        })
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn create_calls(&self) -> usize {
        self.create_calls.load(Ordering::SeqCst)
    }

    pub fn update_calls(&self) -> usize {
        self.update_calls.load(Ordering::SeqCst)
    }

    /// Snapshot of the provider-side records
    pub fn records(&self) -> Vec<RemoteRecord> {
        self.records.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl DnsProvider for MockDnsProvider {
    async fn list_a_records(&self) -> Result<Vec<RemoteRecord>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.records.lock().unwrap().clone())
    }

    async fn create_a_record(&self, name: &str, content: &str) -> Result<RemoteRecord> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_mutations {
            return Err(Error::provider("mock", "create rejected"));
        }

        let id = format!("rec-{}", self.next_id.fetch_add(1, Ordering::SeqCst));
        let record = RemoteRecord {
            id,
            name: name.to_string(),
            content: content.to_string(),
            proxied: true,
        };
        self.records.lock().unwrap().push(record.clone());
        Ok(record)
    }

    async fn update_a_record(&self, id: &str, name: &str, content: &str) -> Result<RemoteRecord> {
        self.update_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_mutations {
            return Err(Error::provider("mock", "update rejected"));
        }

        let mut records = self.records.lock().unwrap();
        let record = records
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| Error::not_found(format!("no record with id {id}")))?;
        record.name = name.to_string();
        record.content = content.to_string();
        record.proxied = true;
        Ok(record.clone())
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }
}

/// A mock IpResolver returning a fixed address and counting calls
pub struct MockIpResolver {
    ip: Ipv4Addr,
    calls: AtomicUsize,
    fail: bool,
}

impl MockIpResolver {
    pub fn new(ip: Ipv4Addr) -> Arc<Self> {
        Arc::new(Self {
            ip,
            calls: AtomicUsize::new(0),
            fail: false,
        })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            ip: Ipv4Addr::UNSPECIFIED,
            calls: AtomicUsize::new(0),
            fail: true,
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl IpResolver for MockIpResolver {
    async fn current_ipv4(&self) -> Result<Ipv4Addr> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(Error::network("echo service unreachable"));
        }
        Ok(self.ip)
    }
}

/// Shorthand for an existing remote A record
pub fn remote(id: &str, name: &str, content: &str) -> RemoteRecord {
    RemoteRecord {
        id: id.to_string(),
        name: name.to_string(),
        content: content.to_string(),
        proxied: false,
    }
}
