//! DNS provider trait
//!
//! Defines the interface for reading and mutating A records in a zone via a
//! provider's API.
//!
//! Implementations are thin API clients. They must not retry, cache, or
//! decide whether a change is needed; the [`Reconciler`](crate::Reconciler)
//! owns all of that. One trait call maps to one API call.

use async_trait::async_trait;

use crate::error::Result;
use crate::record::RemoteRecord;

/// Trait for DNS provider implementations
///
/// The zone the provider operates on is part of its construction-time
/// configuration; every method implicitly targets that zone.
///
/// # Proxied flag
///
/// Every record created or updated through this interface must carry the
/// provider's `proxied` flag forced to `true`, overriding whatever the
/// existing record had. Callers cannot opt out.
///
/// # Thread safety
///
/// Implementations must be thread-safe; the HTTP trigger shares one provider
/// handle across concurrent passes.
#[async_trait]
pub trait DnsProvider: Send + Sync {
    /// List all A records currently present in the zone
    async fn list_a_records(&self) -> Result<Vec<RemoteRecord>>;

    /// Create an A record with the given name and content
    ///
    /// Returns the provider's view of the created record (including its
    /// assigned ID).
    async fn create_a_record(&self, name: &str, content: &str) -> Result<RemoteRecord>;

    /// Update the A record with the given provider ID to new content
    ///
    /// The `id` must come from a record previously returned by
    /// [`list_a_records`](Self::list_a_records).
    async fn update_a_record(&self, id: &str, name: &str, content: &str) -> Result<RemoteRecord>;

    /// Get the provider name (for logging/debugging)
    fn provider_name(&self) -> &'static str;
}
