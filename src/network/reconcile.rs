//! Metric reconciliation: match an ordered name list against a fresh
//! snapshot and write the new metrics back to the OS.

use super::provider::{NetworkProvider, UpdateError};
use super::snapshot::find_by_name;
use super::Interface;

#[cfg(test)]
#[path = "reconcile_tests.rs"]
mod tests;

/// Spacing between consecutive assigned metrics.
///
/// Position 1 gets 10, position 2 gets 20, and so on. The gaps leave room
/// for manual tweaks between two managed interfaces.
pub const METRIC_STEP: u32 = 10;

/// One successful metric assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedMetric {
    /// Name the operator supplied.
    pub name: String,
    /// Metric written to the OS.
    pub metric: u32,
    /// Whether the automatic-metric flag was cleared in the same write.
    pub cleared_automatic: bool,
}

/// One failed metric assignment.
#[derive(Debug)]
pub struct FailedUpdate {
    /// Name the operator supplied.
    pub name: String,
    /// Metric that was attempted.
    pub metric: u32,
    /// What the OS reported.
    pub error: UpdateError,
}

/// Outcome of one reconciliation pass.
///
/// A pass runs to its natural end: per-interface failures accumulate here
/// instead of aborting the remaining names, because reordering nine
/// interfaces should not be blocked by one failing to update.
#[derive(Debug, Default)]
pub struct ReconcileReport {
    /// Successful assignments, in application order.
    pub applied: Vec<AppliedMetric>,
    /// Names that matched no live interface. Surfaced as a warning; an
    /// unplugged adapter between load and save lands here.
    pub skipped: usize,
    /// Per-interface write failures.
    pub failures: Vec<FailedUpdate>,
}

impl ReconcileReport {
    /// Returns true if every matched name was written successfully.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Applies the operator's priority order to the given snapshot.
///
/// For each name in input order, the first live interface with a byte-exact
/// equal name is assigned `position * 10`, where the 1-based position only
/// advances on a match. That keeps the assigned metrics a dense, gap-free
/// `10, 20, 30, ...` sequence in the operator's intended order no matter
/// how many stale or misspelled names appear in the edited text.
///
/// Interfaces whose `automatic_metric` flag is set get the flag cleared as
/// part of the same write; interfaces never mentioned in the input are left
/// untouched. Duplicate live names resolve to the first in enumeration
/// order, and duplicate input names re-match that same interface.
///
/// The snapshot must be freshly enumerated by the caller; reconciling
/// against a stale one risks writing through identities the OS has already
/// recycled.
pub fn apply_order<P: NetworkProvider + ?Sized>(
    provider: &P,
    interfaces: &[Interface],
    names: &[String],
) -> ReconcileReport {
    let mut report = ReconcileReport::default();
    let mut position: u32 = 0;

    for name in names {
        let Some(matched) = find_by_name(interfaces, name) else {
            tracing::warn!("Cannot find interface '{name}', maybe it has been disabled? skipping");
            report.skipped += 1;
            continue;
        };

        position += 1;
        let metric = position * METRIC_STEP;
        let clear_automatic = matched.automatic_metric;

        match provider.set_metric(matched.id, metric, clear_automatic) {
            Ok(()) => {
                tracing::info!("Interface '{name}' updated, new metric: {metric}");
                report.applied.push(AppliedMetric {
                    name: name.clone(),
                    metric,
                    cleared_automatic: clear_automatic,
                });
            }
            Err(error) => {
                tracing::error!("Cannot update metric for interface '{name}': {error}");
                report.failures.push(FailedUpdate {
                    name: name.clone(),
                    metric,
                    error,
                });
            }
        }
    }

    report
}
