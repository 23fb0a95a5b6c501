//! Core reconciliation pass
//!
//! The [`Reconciler`] diffs a batch of desired A records against the records
//! that exist in the zone and applies the minimal set of create/update calls:
//!
//! 1. List all existing A records once per pass
//! 2. For each desired record, in input order:
//!    - effective address = the record's `addr`, or the host's public IP
//!      (resolved at most once per pass) when `addr` is empty
//!    - first existing record with the same name (ASCII case-insensitive)
//!      wins; equal content is a no-op, differing content is an update by
//!      provider ID, no match is a create
//! 3. The first provider or resolver error aborts the pass; no rollback,
//!    no continuation to remaining records
//!
//! Every mutation is a live call against the provider; there is no local
//! persisted state, so running the same pass twice against unchanged remote
//! state performs zero mutations the second time.

use std::sync::Arc;

use tracing::{debug, info};

use crate::error::Result;
use crate::record::RecordBatch;
use crate::traits::{DnsProvider, IpResolver};

/// Outcome of reconciling a single desired record
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordOutcome {
    /// No record with this name existed; one was created
    Created {
        name: String,
        id: String,
        content: String,
    },

    /// A record existed with different content; it was updated in place
    Updated {
        name: String,
        id: String,
        previous: String,
        content: String,
    },

    /// A record existed with the desired content already
    Unchanged { name: String, content: String },
}

/// Summary of one reconciliation pass
#[derive(Debug, Clone, Default)]
pub struct PassSummary {
    /// Per-record outcomes, in input order
    pub outcomes: Vec<RecordOutcome>,
}

impl PassSummary {
    /// Number of records created during the pass
    pub fn created(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, RecordOutcome::Created { .. }))
            .count()
    }

    /// Number of records updated during the pass
    pub fn updated(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, RecordOutcome::Updated { .. }))
            .count()
    }

    /// Number of records that already matched
    pub fn unchanged(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, RecordOutcome::Unchanged { .. }))
            .count()
    }
}

/// Reconciles desired records against a DNS provider's zone
///
/// Constructed once at startup with explicit provider and resolver handles
/// and shared by reference across passes. Each pass is sequential; when the
/// HTTP trigger runs concurrent passes, last writer wins at the provider.
pub struct Reconciler {
    resolver: Arc<dyn IpResolver>,
    provider: Arc<dyn DnsProvider>,
}

impl Reconciler {
    /// Create a new reconciler
    pub fn new(resolver: Arc<dyn IpResolver>, provider: Arc<dyn DnsProvider>) -> Self {
        Self { resolver, provider }
    }

    /// Run one reconciliation pass over the batch
    ///
    /// Returns the per-record outcomes, or the first error encountered from
    /// the resolver or any provider call. On error, records later in the
    /// batch have not been touched.
    pub async fn run_pass(&self, batch: &RecordBatch) -> Result<PassSummary> {
        let existing = self.provider.list_a_records().await?;

        info!(
            provider = self.provider.provider_name(),
            existing = existing.len(),
            desired = batch.records.len(),
            "starting reconciliation pass"
        );

        // Shared fallback for records without an explicit address, resolved
        // lazily so passes with only explicit addresses never hit the echo
        // service.
        let mut host_ip: Option<String> = None;

        let mut outcomes = Vec::with_capacity(batch.records.len());

        for desired in &batch.records {
            let content = if desired.addr.is_empty() {
                match &host_ip {
                    Some(ip) => ip.clone(),
                    None => {
                        let ip = self.resolver.current_ipv4().await?.to_string();
                        info!(host_ip = %ip, "resolved host public IP");
                        host_ip = Some(ip.clone());
                        ip
                    }
                }
            } else {
                desired.addr.clone()
            };

            // First name match wins; duplicate remote records are not deduped.
            let found = existing
                .iter()
                .find(|remote| remote.name.eq_ignore_ascii_case(&desired.name));

            match found {
                Some(remote) if remote.content == content => {
                    debug!(name = %remote.name, content = %content, "record already correct");
                    outcomes.push(RecordOutcome::Unchanged {
                        name: remote.name.clone(),
                        content,
                    });
                }
                Some(remote) => {
                    let updated = self
                        .provider
                        .update_a_record(&remote.id, &desired.name, &content)
                        .await?;
                    info!(name = %updated.name, id = %updated.id, content = %content, "updated record");
                    outcomes.push(RecordOutcome::Updated {
                        name: updated.name,
                        id: updated.id,
                        previous: remote.content.clone(),
                        content,
                    });
                }
                None => {
                    let created = self
                        .provider
                        .create_a_record(&desired.name, &content)
                        .await?;
                    info!(name = %created.name, id = %created.id, content = %content, "created record");
                    outcomes.push(RecordOutcome::Created {
                        name: created.name,
                        id: created.id,
                        content,
                    });
                }
            }
        }

        let summary = PassSummary { outcomes };
        info!(
            created = summary.created(),
            updated = summary.updated(),
            unchanged = summary.unchanged(),
            "reconciliation pass complete"
        );
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_counts_by_outcome() {
        let summary = PassSummary {
            outcomes: vec![
                RecordOutcome::Created {
                    name: "a.example.com".into(),
                    id: "1".into(),
                    content: "1.2.3.4".into(),
                },
                RecordOutcome::Unchanged {
                    name: "b.example.com".into(),
                    content: "1.2.3.4".into(),
                },
                RecordOutcome::Unchanged {
                    name: "c.example.com".into(),
                    content: "1.2.3.4".into(),
                },
            ],
        };

        assert_eq!(summary.created(), 1);
        assert_eq!(summary.updated(), 0);
        assert_eq!(summary.unchanged(), 2);
    }
}
