//! Conflict aggregation.
//!
//! Runs every active rule over a snapshot, merges and deduplicates the
//! results, and returns one consolidated, deterministically ordered
//! report. A single failing rule never aborts the pass: its kind is
//! recorded as degraded and every other rule still runs.

use std::collections::{BTreeMap, BTreeSet};

use tracing::{debug, warn};

use crate::models::{Conflict, ConflictKind, ConflictTarget, RuleKind, Severity, Snapshot};
use crate::rules::all_rules;

/// Consolidated result of one aggregation pass.
///
/// Ordering is deterministic: severity descending, then first target id
/// ascending. Repeated passes over an unchanged snapshot produce an
/// identical report.
#[derive(Debug, Clone, Default)]
pub struct ConflictReport {
    /// Deduplicated conflicts in report order.
    pub conflicts: Vec<Conflict>,
    /// Rules that failed to evaluate this pass. Their conflicts are
    /// unknown, not absent.
    pub degraded: Vec<RuleKind>,
}

impl ConflictReport {
    /// Number of conflicts.
    #[inline]
    pub fn count(&self) -> usize {
        self.conflicts.len()
    }

    /// Whether the pass found no conflicts and no rule degraded.
    pub fn is_clean(&self) -> bool {
        self.conflicts.is_empty() && self.degraded.is_empty()
    }

    /// Conflict counts per severity.
    pub fn severity_breakdown(&self) -> BTreeMap<Severity, usize> {
        let mut breakdown = BTreeMap::new();
        for conflict in &self.conflicts {
            *breakdown.entry(conflict.severity).or_insert(0) += 1;
        }
        breakdown
    }

    /// Conflicts of one kind.
    pub fn of_kind(&self, kind: ConflictKind) -> Vec<&Conflict> {
        self.conflicts.iter().filter(|c| c.kind == kind).collect()
    }

    /// Merges extra conflicts into the report, re-deduplicating and
    /// restoring report order.
    pub fn merged_with(mut self, extra: Vec<Conflict>) -> Self {
        self.conflicts.extend(extra);
        self.conflicts = dedup_and_sort(self.conflicts);
        self
    }
}

/// Deduplicates by (kind, targets) and applies report order: severity
/// descending, then first target id ascending, then kind, then the
/// full target list. The last key makes the order total, so conflicts
/// tying on the first three cannot keep input order.
fn dedup_and_sort(mut conflicts: Vec<Conflict>) -> Vec<Conflict> {
    let mut seen: BTreeSet<(ConflictKind, Vec<ConflictTarget>)> = BTreeSet::new();
    conflicts.retain(|c| seen.insert((c.kind, c.targets.clone())));
    conflicts.sort_by(|a, b| {
        b.severity
            .cmp(&a.severity)
            .then_with(|| a.primary_target_id().cmp(b.primary_target_id()))
            .then_with(|| a.kind.cmp(&b.kind))
            .then_with(|| a.targets.cmp(&b.targets))
    });
    conflicts
}

/// Runs all active rules over the snapshot and consolidates the result.
///
/// Disabled rules are skipped entirely. Symmetric duplicates (same kind
/// and target set) collapse to one conflict. A rule returning an error
/// is logged, recorded in `degraded`, and skipped.
pub fn check_all(snapshot: &Snapshot) -> ConflictReport {
    let mut merged: Vec<Conflict> = Vec::new();
    let mut degraded: Vec<RuleKind> = Vec::new();

    for rule in all_rules() {
        if !snapshot.config.is_rule_enabled(rule.kind()) {
            debug!(rule = %rule.kind(), "rule disabled, skipping");
            continue;
        }
        match rule.evaluate(snapshot) {
            Ok(conflicts) => merged.extend(conflicts),
            Err(err) => {
                warn!(rule = %rule.kind(), %err, "rule evaluation failed, result degraded");
                degraded.push(rule.kind());
            }
        }
    }

    // Targets are sorted at construction, so A-vs-B and B-vs-A
    // collapse under the (kind, targets) key.
    let merged = dedup_and_sort(merged);

    debug!(
        conflicts = merged.len(),
        degraded = degraded.len(),
        "conflict check complete"
    );

    ConflictReport {
        conflicts: merged,
        degraded,
    }
}
