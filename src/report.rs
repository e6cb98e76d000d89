//! Per-stage counts reported after a run.

use serde::Serialize;
use tracing::info;

/// Operator-facing summary of one resolution run.
///
/// The identifier counts exist for sanity-checking curated data between
/// runs: `unique_after_markers` always equals `unique_after_conflicts`
/// plus `declared_splits`, because a run that violates that arithmetic
/// aborts instead of producing a report.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct RunReport {
    /// Raw batting rows read from the source.
    pub batting_rows: usize,
    /// Raw pitching rows read from the source.
    pub pitching_rows: usize,
    /// Rows after the batting/pitching outer join.
    pub merged_rows: usize,
    /// Rows renamed by the correction overlay.
    pub corrections_applied: usize,
    /// Distinct base identifiers before suffix separation.
    pub unique_bases: usize,
    /// Distinct full identifiers after conflict resolution.
    pub unique_after_conflicts: usize,
    /// Identity splits declared by the duplicate-marker table.
    pub declared_splits: usize,
    /// Distinct full identifiers after duplicate adjudication.
    pub unique_after_markers: usize,
}

impl RunReport {
    /// Emit the summary at info level.
    pub fn log(&self) {
        info!(
            batting = self.batting_rows,
            pitching = self.pitching_rows,
            merged = self.merged_rows,
            corrections = self.corrections_applied,
            bases = self.unique_bases,
            after_conflicts = self.unique_after_conflicts,
            splits = self.declared_splits,
            after_markers = self.unique_after_markers,
            "resolution run complete"
        );
    }
}
