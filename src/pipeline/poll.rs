// Poll scheduler: drives one fetch/dedupe/forward cycle per tick, forever.
//
// Everything below startup is contained here: a failed fetch skips the
// cycle, a failed ledger lookup or insert skips the candidate, a failed
// forward is logged and forgotten. Only the ledger write decides whether
// an ID counts as seen.

use std::time::Duration;

use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use crate::db::{Ledger, RecordOutcome};
use crate::feed::FeedSource;
use crate::forward::EventSink;

/// What happened during a single cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CycleReport {
    /// Candidates returned by the feed
    pub fetched: usize,
    /// Newly recorded in the ledger (each one was handed to the forwarder)
    pub recorded: usize,
    /// Already in the ledger
    pub duplicates: usize,
    /// Ledger lookup or insert failed
    pub skipped: usize,
    /// Recorded, but delivery failed
    pub forward_failures: usize,
    /// The fetch itself failed; nothing else ran
    pub fetch_failed: bool,
}

/// Run one full cycle. Never fails: every error is logged and counted.
pub async fn run_cycle(
    feed: &dyn FeedSource,
    ledger: &dyn Ledger,
    sink: &dyn EventSink,
) -> CycleReport {
    let mut report = CycleReport::default();

    let candidates = match feed.fetch_today().await {
        Ok(candidates) => candidates,
        Err(e) => {
            warn!(error = %e, "Error checking daily pastes");
            report.fetch_failed = true;
            return report;
        }
    };
    report.fetched = candidates.len();

    for candidate in &candidates {
        let id = candidate.id.as_str();

        match ledger.contains(id).await {
            Ok(true) => {
                report.duplicates += 1;
                continue;
            }
            Ok(false) => {}
            Err(e) => {
                warn!(paste_id = id, error = %e, "Failed to query ledger, skipping");
                report.skipped += 1;
                continue;
            }
        }

        match ledger.record(id).await {
            Ok(RecordOutcome::Inserted) => report.recorded += 1,
            Ok(RecordOutcome::Duplicate) => {
                report.duplicates += 1;
                continue;
            }
            Err(e) => {
                warn!(paste_id = id, error = %e, "Error saving paste_id to ledger, skipping");
                report.skipped += 1;
                continue;
            }
        }

        if let Err(e) = sink.forward(id).await {
            warn!(paste_id = id, error = %e, "Failed to forward event");
            report.forward_failures += 1;
        } else {
            debug!(paste_id = id, tags = %candidate.tags, "Forwarded new paste");
        }
    }

    report
}

/// Run cycles forever, one per `interval`. The first cycle starts
/// immediately. Cycles never overlap: a slow cycle delays the next tick
/// rather than stacking up missed ones.
pub async fn run(
    interval: Duration,
    feed: &dyn FeedSource,
    ledger: &dyn Ledger,
    sink: &dyn EventSink,
) {
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;
        info!("Checking psbdmp.cc for updates");

        let report = run_cycle(feed, ledger, sink).await;
        if !report.fetch_failed {
            info!(
                fetched = report.fetched,
                recorded = report.recorded,
                duplicates = report.duplicates,
                skipped = report.skipped,
                forward_failures = report.forward_failures,
                "Cycle complete"
            );
        }
    }
}
