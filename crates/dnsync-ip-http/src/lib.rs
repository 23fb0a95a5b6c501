//! HTTP public-IP resolver
//!
//! Resolves the host's current public IPv4 address by querying a plain-text
//! IP echo service (api.ipify.org and friends return the caller's address as
//! the response body).
//!
//! The full response body is read before parsing, so a padded or chunked
//! response can never truncate the address; anything that does not parse as
//! an IPv4 address after trimming is an error.

use std::net::Ipv4Addr;
use std::time::Duration;

use dnsync_core::error::{Error, Result};
use dnsync_core::traits::IpResolver;

/// Default IP echo service
pub const DEFAULT_IP_ECHO_URL: &str = "https://api.ipify.org";

/// HTTP timeout for echo-service requests
const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(10);

/// IP resolver backed by an HTTP echo service
pub struct HttpIpResolver {
    /// URL to fetch the IP from
    url: String,

    /// HTTP client
    client: reqwest::Client,
}

impl HttpIpResolver {
    /// Create a resolver for the given echo-service URL
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            client: reqwest::Client::builder()
                .timeout(DEFAULT_HTTP_TIMEOUT)
                .build()
                .unwrap_or_default(),
        }
    }
}

impl Default for HttpIpResolver {
    fn default() -> Self {
        Self::new(DEFAULT_IP_ECHO_URL)
    }
}

#[async_trait::async_trait]
impl IpResolver for HttpIpResolver {
    async fn current_ipv4(&self) -> Result<Ipv4Addr> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| Error::network(format!("IP echo request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(Error::network(format!(
                "IP echo service returned {}",
                response.status()
            )));
        }

        // Read to stream end rather than a bounded chunk.
        let body = response
            .text()
            .await
            .map_err(|e| Error::network(format!("failed to read IP echo response: {e}")))?;

        let trimmed = body.trim();
        let ip: Ipv4Addr = trimmed.parse().map_err(|_| {
            Error::network(format!("IP echo service returned an invalid address: {trimmed:?}"))
        })?;

        tracing::debug!(%ip, url = %self.url, "resolved public IP");
        Ok(ip)
    }
}
