//! Public-IP resolver trait

use std::net::Ipv4Addr;

use async_trait::async_trait;

use crate::error::Result;

/// Trait for resolving the host's current public IPv4 address
///
/// The reconciler consults the resolver at most once per pass, and only when
/// a desired record relies on the host IP fallback. A resolution failure is
/// fatal to the pass; implementations must not retry.
#[async_trait]
pub trait IpResolver: Send + Sync {
    /// Resolve the current public IPv4 address
    async fn current_ipv4(&self) -> Result<Ipv4Addr>;
}
