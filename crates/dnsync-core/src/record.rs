//! Record types exchanged between triggers, the reconciler and the provider

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A record the caller wants present in the zone
///
/// Deserialized from an inbound request body or a local record file.
/// Lives only for the duration of one reconciliation pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DesiredRecord {
    /// DNS record name (e.g., "host.example.com"). Must be non-empty.
    pub name: String,

    /// Target IPv4 address. Empty or absent means "use the host's current
    /// public IP", resolved once per pass.
    #[serde(default)]
    pub addr: String,
}

impl DesiredRecord {
    /// Create a desired record with an explicit address
    pub fn new(name: impl Into<String>, addr: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            addr: addr.into(),
        }
    }

    /// Create a desired record that follows the host's public IP
    pub fn host_ip(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            addr: String::new(),
        }
    }

    /// Validate the record
    pub fn validate(&self) -> Result<()> {
        if self.name.is_empty() {
            return Err(Error::validation("record name cannot be empty"));
        }
        Ok(())
    }
}

/// An A record as it exists at the DNS provider
///
/// Owned by the provider; the reconciler only reads it and mutates it via
/// API calls, never persists it locally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteRecord {
    /// Opaque provider-assigned record ID
    pub id: String,

    /// DNS record name
    pub name: String,

    /// Record content (an IPv4 address)
    pub content: String,

    /// Whether traffic is routed through the provider's edge network
    #[serde(default)]
    pub proxied: bool,
}

/// A batch of desired records, as carried by both triggers
///
/// Wire shape: `{"records": [{"name": ..., "addr": ...}]}`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordBatch {
    /// Records to reconcile, in input order
    pub records: Vec<DesiredRecord>,
}

impl RecordBatch {
    /// Create a batch from a list of desired records
    pub fn new(records: Vec<DesiredRecord>) -> Self {
        Self { records }
    }

    /// Parse a batch from JSON bytes
    pub fn from_json_slice(bytes: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }

    /// Validate every record in the batch
    ///
    /// Fails on the first invalid record; a batch is applied all-or-nothing
    /// by the triggers.
    pub fn validate(&self) -> Result<()> {
        for record in &self.records {
            record.validate()?;
        }
        Ok(())
    }
}
