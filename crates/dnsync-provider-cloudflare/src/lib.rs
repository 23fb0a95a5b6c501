//! Cloudflare DNS provider
//!
//! Implements [`DnsProvider`] against the Cloudflare API v4:
//!
//! - List A records: GET `/zones/:zone_id/dns_records?type=A&per_page=100`
//! - Create record:  POST `/zones/:zone_id/dns_records`
//! - Update record:  PUT `/zones/:zone_id/dns_records/:record_id`
//!
//! Every create/update payload carries `proxied: true`, overriding whatever
//! the existing record had. The provider makes exactly one HTTP request per
//! trait call and propagates every failure to the reconciler; there is no
//! retry, backoff, or caching here.
//!
//! ## Security
//!
//! The API token never appears in logs or `Debug` output.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

use dnsync_core::error::{Error, Result};
use dnsync_core::record::RemoteRecord;
use dnsync_core::traits::DnsProvider;

/// Cloudflare API base URL
const CLOUDFLARE_API_BASE: &str = "https://api.cloudflare.com/client/v4";

/// HTTP timeout for API requests
const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Cloudflare API page size for record listing
const LIST_PAGE_SIZE: u32 = 100;

/// Cloudflare DNS provider
///
/// Construct once at startup and share across passes; the inner reqwest
/// client pools connections and is safe to use from concurrent tasks.
pub struct CloudflareProvider {
    /// Cloudflare API token. Never log this value.
    api_token: String,

    /// Zone the provider operates on
    zone_id: String,

    /// API base URL; overridable so tests can target a local mock server
    api_base: String,

    /// HTTP client for API requests
    client: reqwest::Client,
}

impl std::fmt::Debug for CloudflareProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CloudflareProvider")
            .field("api_token", &"<REDACTED>")
            .field("zone_id", &self.zone_id)
            .field("api_base", &self.api_base)
            .finish()
    }
}

/// Envelope every Cloudflare v4 response is wrapped in
#[derive(Debug, Deserialize)]
struct ApiResponse<T> {
    success: bool,
    result: Option<T>,
    #[serde(default)]
    errors: Vec<ApiError>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    code: i64,
    message: String,
}

/// A DNS record as returned by the Cloudflare API
#[derive(Debug, Deserialize)]
struct ApiRecord {
    id: String,
    name: String,
    content: String,
    #[serde(default)]
    proxied: bool,
}

impl From<ApiRecord> for RemoteRecord {
    fn from(record: ApiRecord) -> Self {
        RemoteRecord {
            id: record.id,
            name: record.name,
            content: record.content,
            proxied: record.proxied,
        }
    }
}

impl CloudflareProvider {
    /// Create a new Cloudflare provider for a zone
    ///
    /// Fails with a configuration error if the token or zone ID is empty.
    pub fn new(api_token: impl Into<String>, zone_id: impl Into<String>) -> Result<Self> {
        Self::with_api_base(api_token, zone_id, CLOUDFLARE_API_BASE)
    }

    /// Create a provider pointed at a custom API base URL (used by tests)
    pub fn with_api_base(
        api_token: impl Into<String>,
        zone_id: impl Into<String>,
        api_base: impl Into<String>,
    ) -> Result<Self> {
        let api_token = api_token.into();
        if api_token.is_empty() {
            return Err(Error::config("Cloudflare API token cannot be empty"));
        }

        let zone_id = zone_id.into();
        if zone_id.is_empty() {
            return Err(Error::config("Cloudflare zone ID cannot be empty"));
        }

        let client = reqwest::Client::builder()
            .timeout(DEFAULT_HTTP_TIMEOUT)
            .build()
            .map_err(|e| Error::config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            api_token,
            zone_id,
            api_base: api_base.into(),
            client,
        })
    }

    fn records_url(&self) -> String {
        format!("{}/zones/{}/dns_records", self.api_base, self.zone_id)
    }

    /// Map a non-success HTTP response to a specific error
    async fn error_from_response(response: reqwest::Response, what: &str) -> Error {
        let status = response.status();
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "unable to read error response".to_string());

        match status.as_u16() {
            401 | 403 => Error::authentication(format!(
                "invalid API token or insufficient permissions (status {status})"
            )),
            404 => Error::not_found(format!("{what}: {status} - {body}")),
            429 => Error::rate_limited(format!("{what}: {status}")),
            500..=599 => Error::provider(
                "cloudflare",
                format!("server error (transient): {status} - {body}"),
            ),
            _ => Error::provider("cloudflare", format!("{what} failed: {status} - {body}")),
        }
    }

    /// Unwrap the Cloudflare response envelope, surfacing API-level errors
    fn unwrap_envelope<T>(envelope: ApiResponse<T>, what: &str) -> Result<T> {
        if !envelope.success {
            let messages: Vec<String> = envelope
                .errors
                .iter()
                .map(|e| format!("{} (code {})", e.message, e.code))
                .collect();
            return Err(Error::provider(
                "cloudflare",
                format!("{what} failed: {}", messages.join("; ")),
            ));
        }

        envelope.result.ok_or_else(|| {
            Error::provider("cloudflare", format!("{what}: response carried no result"))
        })
    }

    /// JSON payload for create/update calls. `proxied` is always true.
    fn record_payload(name: &str, content: &str) -> serde_json::Value {
        json!({
            "type": "A",
            "name": name,
            "content": content,
            "proxied": true,
        })
    }
}

#[async_trait]
impl DnsProvider for CloudflareProvider {
    async fn list_a_records(&self) -> Result<Vec<RemoteRecord>> {
        let url = format!(
            "{}?type=A&per_page={}",
            self.records_url(),
            LIST_PAGE_SIZE
        );
        tracing::debug!(zone_id = %self.zone_id, "listing A records");

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.api_token)
            .send()
            .await
            .map_err(|e| Error::network(format!("record list request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(Self::error_from_response(response, "record list").await);
        }

        let envelope: ApiResponse<Vec<ApiRecord>> = response
            .json()
            .await
            .map_err(|e| Error::provider("cloudflare", format!("failed to parse response: {e}")))?;

        let records = Self::unwrap_envelope(envelope, "record list")?;
        Ok(records.into_iter().map(RemoteRecord::from).collect())
    }

    async fn create_a_record(&self, name: &str, content: &str) -> Result<RemoteRecord> {
        tracing::debug!(name, content, "creating A record");

        let response = self
            .client
            .post(self.records_url())
            .bearer_auth(&self.api_token)
            .json(&Self::record_payload(name, content))
            .send()
            .await
            .map_err(|e| Error::network(format!("record create request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(Self::error_from_response(response, "record create").await);
        }

        let envelope: ApiResponse<ApiRecord> = response
            .json()
            .await
            .map_err(|e| Error::provider("cloudflare", format!("failed to parse response: {e}")))?;

        Ok(Self::unwrap_envelope(envelope, "record create")?.into())
    }

    async fn update_a_record(&self, id: &str, name: &str, content: &str) -> Result<RemoteRecord> {
        tracing::debug!(id, name, content, "updating A record");

        let url = format!("{}/{}", self.records_url(), id);
        let response = self
            .client
            .put(&url)
            .bearer_auth(&self.api_token)
            .json(&Self::record_payload(name, content))
            .send()
            .await
            .map_err(|e| Error::network(format!("record update request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(Self::error_from_response(response, "record update").await);
        }

        let envelope: ApiResponse<ApiRecord> = response
            .json()
            .await
            .map_err(|e| Error::provider("cloudflare", format!("failed to parse response: {e}")))?;

        Ok(Self::unwrap_envelope(envelope, "record update")?.into())
    }

    fn provider_name(&self) -> &'static str {
        "cloudflare"
    }
}
