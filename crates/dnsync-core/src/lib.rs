//! # dnsync-core
//!
//! Core library for the dnsync DNS record synchronizer.
//!
//! This library provides the pieces shared by every trigger:
//! - **DesiredRecord / RemoteRecord**: the record model exchanged with triggers
//!   and the DNS provider
//! - **DnsProvider**: trait for listing and mutating A records in a zone
//! - **IpResolver**: trait for resolving the host's current public IPv4 address
//! - **Reconciler**: one reconciliation pass, diffing desired records against
//!   the zone and applying the minimal set of create/update calls
//!
//! ## Design principles
//!
//! 1. **Explicit handles**: the provider client and resolver are constructed at
//!    startup and passed into the reconciler, never held as global state
//! 2. **No retries**: any provider or resolver failure aborts the pass and is
//!    surfaced to the trigger
//! 3. **No local state**: the zone is the only source of truth; every pass
//!    re-reads it

pub mod error;
pub mod reconciler;
pub mod record;
pub mod traits;

pub use error::{Error, Result};
pub use reconciler::{PassSummary, Reconciler, RecordOutcome};
pub use record::{DesiredRecord, RecordBatch, RemoteRecord};
pub use traits::{DnsProvider, IpResolver};
