//! Environment configuration
//!
//! All configuration comes from process environment variables, optionally
//! seeded from a `.env` file at startup:
//!
//! - `CLOUDFLARE_API_TOKEN`: provider API token (required)
//! - `CLOUDFLARE_ZONE_ID`: zone to reconcile records in (required)
//! - `AUTH_HEADER`: shared secret for the HTTP trigger (required in server
//!   mode; unused in poller mode)
//! - `DNSYNC_IP_ECHO_URL`: IP echo service URL (default: api.ipify.org)
//! - `DNSYNC_LOG_LEVEL`: trace|debug|info|warn|error (default: info)

use std::env;

use anyhow::Result;

/// Application configuration
pub struct Config {
    pub api_token: String,
    pub zone_id: String,
    pub auth_token: Option<String>,
    pub ip_echo_url: String,
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            api_token: env::var("CLOUDFLARE_API_TOKEN").map_err(|_| {
                anyhow::anyhow!(
                    "CLOUDFLARE_API_TOKEN is required. \
                    Set it via: export CLOUDFLARE_API_TOKEN=your_token"
                )
            })?,
            zone_id: env::var("CLOUDFLARE_ZONE_ID").map_err(|_| {
                anyhow::anyhow!(
                    "CLOUDFLARE_ZONE_ID is required. \
                    Set it via: export CLOUDFLARE_ZONE_ID=your_zone_id"
                )
            })?,
            auth_token: env::var("AUTH_HEADER").ok(),
            ip_echo_url: env::var("DNSYNC_IP_ECHO_URL")
                .unwrap_or_else(|_| dnsync_ip_http::DEFAULT_IP_ECHO_URL.to_string()),
            log_level: env::var("DNSYNC_LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
        })
    }

    /// Validate the configuration
    ///
    /// `server_mode` requires the shared secret to be present and non-empty;
    /// an empty secret would never authorize any request, so it is rejected
    /// at startup instead.
    pub fn validate(&self, server_mode: bool) -> Result<()> {
        if self.api_token.is_empty() {
            anyhow::bail!("CLOUDFLARE_API_TOKEN cannot be empty");
        }

        if self.zone_id.is_empty() {
            anyhow::bail!("CLOUDFLARE_ZONE_ID cannot be empty");
        }

        if server_mode && self.auth_token.as_ref().is_none_or(|t| t.is_empty()) {
            anyhow::bail!(
                "AUTH_HEADER is required in server mode. \
                Set it via: export AUTH_HEADER=your_shared_secret"
            );
        }

        if !self.ip_echo_url.starts_with("https://") && !self.ip_echo_url.starts_with("http://") {
            anyhow::bail!(
                "DNSYNC_IP_ECHO_URL must use HTTP or HTTPS scheme. Got: {}",
                self.ip_echo_url
            );
        }

        match self.log_level.to_lowercase().as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => anyhow::bail!(
                "DNSYNC_LOG_LEVEL '{}' is not valid. \
                Valid levels: trace, debug, info, warn, error",
                self.log_level
            ),
        }

        Ok(())
    }
}
