//! Core traits for the synchronizer
//!
//! This module defines the abstract interfaces the reconciler depends on.
//!
//! - [`DnsProvider`]: list and mutate A records in a zone
//! - [`IpResolver`]: resolve the host's current public IPv4 address

pub mod dns_provider;
pub mod ip_resolver;

pub use dns_provider::DnsProvider;
pub use ip_resolver::IpResolver;
