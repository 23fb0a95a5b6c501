//! Local-file poller trigger
//!
//! Reads a JSON `{"records": [...]}` file and reconciles it immediately at
//! startup and then on a fixed interval. The initial run is fatal on any
//! read/parse/validate/reconcile failure; failures on later ticks are logged
//! and the scheduler keeps going.
//!
//! Ticks are serialized: the loop awaits each pass before sleeping again,
//! and missed ticks are delayed rather than stacked, so two passes never
//! overlap against the same remote state.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::time::MissedTickBehavior;
use tracing::{error, info};

use dnsync_core::{PassSummary, Reconciler, RecordBatch};

/// Interval between scheduled reconciliation runs
pub const POLL_INTERVAL: Duration = Duration::from_secs(60);

/// Run one read-and-reconcile cycle from the record file
async fn run_once(reconciler: &Reconciler, path: &Path) -> dnsync_core::Result<PassSummary> {
    let bytes = tokio::fs::read(path).await?;
    let batch = RecordBatch::from_json_slice(&bytes)?;
    batch.validate()?;
    reconciler.run_pass(&batch).await
}

/// Poll the record file until ctrl-c
pub async fn run(reconciler: Arc<Reconciler>, path: &Path) -> anyhow::Result<()> {
    info!(path = %path.display(), "starting file poller");

    // The first run is part of startup; any failure here is fatal.
    run_once(&reconciler, path)
        .await
        .with_context(|| format!("initial reconciliation from {} failed", path.display()))?;

    let mut ticker = tokio::time::interval(POLL_INTERVAL);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // The first tick completes immediately; consume it so the next fires
    // after a full interval.
    ticker.tick().await;

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                if let Err(e) = run_once(&reconciler, path).await {
                    error!("scheduled reconciliation run failed: {e}");
                }
            }

            _ = tokio::signal::ctrl_c() => {
                info!("shutdown signal received");
                return Ok(());
            }
        }
    }
}
